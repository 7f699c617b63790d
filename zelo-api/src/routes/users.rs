//! User management endpoints, all ADMIN-only.
//!
//! Two self-targeted actions are refused outright: an admin can neither
//! change their own role nor delete their own account through this surface.
//! Email uniqueness is re-checked before any update that changes it, and the
//! password hash never appears in a response.

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
    auth::{
        authorization::{require_admin, AuthzError, Role},
        password::hash_password,
        session::SessionClaims,
    },
    models::user::{CreateUser, UpdateUser, User, UserProfile},
};

/// User creation request
///
/// Fields default to empty so a missing field fails its validator instead
/// of rejecting the body outright.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub role: Option<Role>,
}

/// Partial user update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,

    /// Empty string means "leave the password unchanged" (admin form quirk)
    pub password: Option<String>,

    pub role: Option<Role>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> ApiResult<Json<Envelope<Vec<UserProfile>>>> {
    require_admin(&claims)?;

    let users = User::list(&state.db).await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(User::into_profile).collect();

    Ok(success("Users retrieved successfully", profiles))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<UserProfile>>> {
    require_admin(&claims)?;

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(success("User retrieved successfully", user.into_profile()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(axum::http::StatusCode, Json<Envelope<UserProfile>>)> {
    require_admin(&claims)?;
    req.validate().map_err(validation_error)?;

    let role = req.role.ok_or_else(|| {
        ApiError::Validation(vec![crate::error::FieldError {
            field: "role".to_string(),
            message: "Role is required".to_string(),
        }])
    })?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already in use.".to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash: Some(password_hash),
            role,
        },
    )
    .await?;

    Ok(created("User created successfully", user.into_profile()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<Envelope<UserProfile>>> {
    require_admin(&claims)?;
    req.validate().map_err(validation_error)?;

    if req.role.is_some() && claims.sub == id {
        return Err(AuthzError::SelfActionDenied("Cannot change your own role.").into());
    }

    if let Some(ref email) = req.email {
        if User::email_taken_by_other(&state.db, email, id).await? {
            return Err(ApiError::Conflict("Email already in use.".to_string()));
        }
    }

    // Empty password strings come from untouched form fields.
    let password_hash = match req.password.as_deref() {
        Some("") | None => None,
        Some(password) => {
            if password.len() < 6 {
                return Err(ApiError::Validation(vec![crate::error::FieldError {
                    field: "password".to_string(),
                    message: "Password must be at least 6 characters".to_string(),
                }]));
            }
            Some(hash_password(password)?)
        }
    };

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(success("User updated successfully", user.into_profile()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<UserProfile>>> {
    require_admin(&claims)?;

    if claims.sub == id {
        return Err(
            AuthzError::SelfActionDenied("You cannot delete your own account.").into(),
        );
    }

    let user = User::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(success("User deleted successfully", user.into_profile()))
}
