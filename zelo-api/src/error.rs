//! Error handling for the API server.
//!
//! All handlers return `Result<T, ApiError>`; conversion into an HTTP
//! response produces the standard error envelope
//! `{ message, data: null, status: "error" }` with the matching status code.
//! Validation failures additionally carry an `issues` array listing every
//! offending field, never a single opaque message.
//!
//! Unexpected failures (store, hashing) map to 500 with the underlying
//! message surfaced as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use zelo_shared::auth::{
    authorization::AuthzError, credentials::CredentialError, password::PasswordError,
    session::SessionError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Schema validation failed (400), one entry per offending field
    Validation(Vec<FieldError>),

    /// No valid session (401)
    Unauthorized(String),

    /// Authenticated but not allowed (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Uniqueness violation (409), e.g. duplicate email
    Conflict(String),

    /// Unexpected failure (500); the message is surfaced to the caller
    Internal(String),
}

/// A single failing field in a validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error envelope body
#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    message: String,
    data: Option<serde_json::Value>,
    status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<Vec<FieldError>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Validation(issues) => {
                write!(f, "Validation failed: {} issues", issues.len())
            }
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, issues) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                "Invalid input".to_string(),
                Some(issues),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };

        let body = Json(ErrorBody {
            message,
            data: None,
            status: "error",
            issues,
        });

        (status, body).into_response()
    }
}

/// Collects every failing field from a validator error into one envelope.
pub fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let issues: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::Validation(issues)
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already in use.".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }
                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::CreateError(msg) => {
                ApiError::Internal(format!("Failed to create session: {}", msg))
            }
            SessionError::InvalidToken(_) => ApiError::Unauthorized("Unauthorized".to_string()),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Database(e) => e.into(),
            CredentialError::Password(e) => e.into(),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::InsufficientRole => ApiError::Forbidden("Forbidden".to_string()),
            AuthzError::SelfActionDenied(msg) => ApiError::BadRequest(msg.to_string()),
        }
    }
}
