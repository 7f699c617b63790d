//! Project CRUD endpoints.
//!
//! Reads are public; mutations require an ADMIN session. The slug is always
//! derived server-side from the title and recomputed when the title changes.
//!
//! - `GET /projects` — all projects, newest first
//! - `POST /projects` — create (ADMIN)
//! - `GET /projects/:id`
//! - `PUT /projects/:id` — partial update (ADMIN)
//! - `DELETE /projects/:id` — returns the deleted record (ADMIN)

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
    models::project::{CreateProject, Project, UpdateProject},
};

/// Project creation request
///
/// Fields default to empty so a missing field fails its validator instead
/// of rejecting the body outright.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Long description is required"))]
    pub long_description: String,

    pub tags: Option<Vec<String>>,

    pub live_preview: Option<String>,

    pub image: Option<String>,
}

/// Partial project update request; each present field is validated on its own
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,

    #[validate(length(min = 1, message = "Long description is required"))]
    pub long_description: Option<String>,

    pub tags: Option<Vec<String>>,

    pub live_preview: Option<String>,

    pub image: Option<String>,
}

pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<Project>>>> {
    let projects = Project::list(&state.db).await?;
    Ok(success("Projects retrieved successfully", projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Project>>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(success("Project retrieved successfully", project))
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(axum::http::StatusCode, Json<Envelope<Project>>)> {
    require_admin(&claims)?;
    req.validate().map_err(validation_error)?;

    let project = Project::create(
        &state.db,
        CreateProject {
            title: req.title,
            category: req.category,
            description: req.description,
            long_description: req.long_description,
            tags: req.tags,
            live_preview: req.live_preview,
            image: req.image,
        },
    )
    .await?;

    Ok(created("Project created successfully", project))
}

pub async fn update_project(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Envelope<Project>>> {
    require_admin(&claims)?;
    req.validate().map_err(validation_error)?;

    let project = Project::update(
        &state.db,
        id,
        UpdateProject {
            title: req.title,
            category: req.category,
            description: req.description,
            long_description: req.long_description,
            tags: req.tags,
            live_preview: req.live_preview,
            image: req.image,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(success("Project updated successfully", project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Project>>> {
    require_admin(&claims)?;

    let project = Project::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(success("Project deleted successfully", project))
}
