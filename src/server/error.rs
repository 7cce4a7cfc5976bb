//! Upload endpoint error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors surfaced to upload callers. Display strings are the response bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Unsupported file type")]
    UnsupportedMediaType,

    #[error("File too large")]
    PayloadTooLarge,

    /// Cause is logged, never returned to the caller.
    #[error("Failed to process file.")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFileProvided | ApiError::UnsupportedMediaType => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            tracing::error!("Upload processing failed: {}", cause);
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
