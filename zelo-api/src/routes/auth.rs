//! Authentication endpoints.
//!
//! - `POST /register` — create a MEMBER account
//! - `POST /login` — verify credentials, set the session cookie
//! - `POST /logout` — clear the session cookie
//!
//! Login failure is a single `401 Invalid email or password` regardless of
//! whether the email exists, the account has no password, or the password is
//! wrong — the response never reveals which.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
    response::{created, success, Envelope},
};
use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use validator::Validate;
use zelo_shared::{
    auth::{
        authorization::Role,
        credentials::verify_credentials,
        middleware::SESSION_COOKIE,
        password::hash_password,
        session::{mint_token, SessionClaims},
    },
    models::user::{CreateUser, User, UserProfile},
};

/// Register request
///
/// Fields default to empty so a missing field fails its validator instead
/// of rejecting the body outright.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    pub password: String,
}

/// Builds the session cookie carrying a freshly minted token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}

/// Registers a new MEMBER account.
///
/// # Errors
///
/// - `400`: validation failed (every failing field listed)
/// - `409`: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(axum::http::StatusCode, Json<Envelope<UserProfile>>)> {
    req.validate().map_err(validation_error)?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash: Some(password_hash),
            role: Role::Member,
        },
    )
    .await?;

    Ok(created(
        "User created successfully",
        user.into_profile(),
    ))
}

/// Verifies credentials and establishes a session.
///
/// # Errors
///
/// - `400`: validation failed
/// - `401`: credentials rejected (cause deliberately unspecified)
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<Envelope<UserProfile>>)> {
    req.validate().map_err(validation_error)?;

    let identity = verify_credentials(&state.db, &req.email, &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let claims = SessionClaims::new(
        identity.id,
        Some(identity.name.clone()),
        identity.email.clone(),
        identity.role,
        state.config.session_lifetime(),
    );
    let token = mint_token(&claims, state.session_secret())?;

    Ok((
        jar.add(session_cookie(token)),
        success("Login successful", identity),
    ))
}

/// Destroys the session by clearing the cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Envelope<serde_json::Value>>) {
    (
        jar.remove(expired_session_cookie()),
        success("Logged out successfully", serde_json::Value::Null),
    )
}

/// The login entry point the route guard redirects to.
pub async fn login_page() -> Json<Envelope<serde_json::Value>> {
    success(
        "Login required",
        serde_json::json!({ "login": "/login" }),
    )
}
