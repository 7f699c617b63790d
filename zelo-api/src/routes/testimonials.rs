//! Testimonial CRUD endpoints.
//!
//! One server-backed path, shaped like projects: reads are public, mutations
//! require an ADMIN session.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
    response::{created, success, Envelope},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use zelo_shared::{
    auth::{authorization::require_admin, session::SessionClaims},
    models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial},
};

/// Testimonial creation request
///
/// Fields default to empty so a missing field fails its validator instead
/// of rejecting the body outright.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Partial testimonial update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTestimonialRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Text is required"))]
    pub text: Option<String>,
}

pub async fn list_testimonials(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<Testimonial>>>> {
    let testimonials = Testimonial::list(&state.db).await?;
    Ok(success("Testimonials retrieved successfully", testimonials))
}

pub async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Testimonial>>> {
    let testimonial = Testimonial::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Testimonial not found".to_string()))?;

    Ok(success("Testimonial retrieved successfully", testimonial))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<CreateTestimonialRequest>,
) -> ApiResult<(axum::http::StatusCode, Json<Envelope<Testimonial>>)> {
    require_admin(&claims)?;
    req.validate().map_err(validation_error)?;

    let testimonial = Testimonial::create(
        &state.db,
        CreateTestimonial {
            name: req.name,
            text: req.text,
        },
    )
    .await?;

    Ok(created("Testimonial created successfully", testimonial))
}

pub async fn update_testimonial(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTestimonialRequest>,
) -> ApiResult<Json<Envelope<Testimonial>>> {
    require_admin(&claims)?;
    req.validate().map_err(validation_error)?;

    let testimonial = Testimonial::update(
        &state.db,
        id,
        UpdateTestimonial {
            name: req.name,
            text: req.text,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Testimonial not found".to_string()))?;

    Ok(success("Testimonial updated successfully", testimonial))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Testimonial>>> {
    require_admin(&claims)?;

    let testimonial = Testimonial::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Testimonial not found".to_string()))?;

    Ok(success("Testimonial deleted successfully", testimonial))
}
