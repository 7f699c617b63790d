//! File upload collaborator.
//!
//! `POST /upload` (session required) accepts a single multipart file, writes
//! it under the configured public directory, and returns the public path for
//! use as an `image` field value. Filenames are prefixed with a millisecond
//! timestamp and have whitespace rewritten to underscores.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::{success, Envelope},
};
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

/// Upload response payload
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    /// Public path to reference the stored file
    pub path: String,
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Envelope<UploadedFile>>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
        .ok_or_else(|| ApiError::BadRequest("No file uploaded.".to_string()))?;

    let original_name = field
        .file_name()
        .map(|name| name.to_string())
        .ok_or_else(|| ApiError::BadRequest("No file uploaded.".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

    let filename = format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        original_name.replace(char::is_whitespace, "_"),
    );

    let dir = std::path::Path::new(&state.config.upload.dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Error saving file: {}", e)))?;
    tokio::fs::write(dir.join(&filename), &bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Error saving file: {}", e)))?;

    tracing::info!(filename = %filename, size = bytes.len(), "File uploaded");

    Ok(success(
        "File uploaded successfully",
        UploadedFile {
            path: format!("/uploads/{}", filename),
        },
    ))
}
