//! The uniform response envelope.
//!
//! Every endpoint answers with `{ message, data, status }`, where `status`
//! is `"success"` or `"error"` and `data` is the payload or null. Error
//! responses are produced by [`crate::error::ApiError`]; this module covers
//! the success side.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Envelope status discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The `{message, data, status}` shape shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    pub data: Option<T>,
    pub status: Status,
}

/// 200 success envelope.
pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        message: message.into(),
        data: Some(data),
        status: Status::Success,
    })
}

/// 201 success envelope for freshly created records.
pub fn created<T: Serialize>(
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, success(message, data))
}
