//! Self-service profile update.
//!
//! `PUT /user/update` lets any authenticated user change their display name;
//! only an ADMIN may change their own email. On success the active session
//! is refreshed in place: the new name/email are merged into the claims and
//! a re-minted cookie is set, without re-checking the password. The merge
//! goes through [`ProfilePatch`], so role and id cannot travel this path.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
    response::{success, Envelope},
};
use axum::{extract::State, Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;
use zelo_shared::{
    auth::{
        authorization::Role,
        session::{mint_token, ProfilePatch, SessionClaims},
    },
    models::user::{UpdateUser, User, UserProfile},
};

use super::auth::session_cookie;

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
}

/// Updates the caller's own profile and refreshes the session cookie.
///
/// # Errors
///
/// - `400`: validation failed, or no fields to update
/// - `403`: non-ADMIN attempted to change email
/// - `404`: the session's user no longer exists
/// - `409`: new email already in use
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    jar: CookieJar,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<(CookieJar, Json<Envelope<UserProfile>>)> {
    req.validate().map_err(validation_error)?;

    if claims.role != Role::Admin && req.email.is_some() {
        return Err(ApiError::Forbidden(
            "Forbidden. You can only update your name.".to_string(),
        ));
    }

    if req.name.is_none() && req.email.is_none() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    if let Some(ref email) = req.email {
        if *email != claims.email && User::email_taken_by_other(&state.db, email, claims.sub).await?
        {
            return Err(ApiError::Conflict("Email already in use".to_string()));
        }
    }

    let updated = User::update(
        &state.db,
        claims.sub,
        UpdateUser {
            name: req.name.clone(),
            email: req.email.clone(),
            ..Default::default()
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    // Push the new display fields into the active session.
    let refreshed = claims.merge_profile(&ProfilePatch {
        name: req.name,
        email: req.email,
    });
    let token = mint_token(&refreshed, state.session_secret())?;

    Ok((
        jar.add(session_cookie(token)),
        success("Profile updated successfully", updated.into_profile()),
    ))
}
