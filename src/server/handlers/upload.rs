//! Document upload and analysis.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use super::super::error::ApiError;
use super::super::AppState;
use crate::analysis::AnalysisResult;
use crate::ocr::{ExtractionError, MediaKind};
use crate::pipeline::UploadedAsset;

/// Multipart field carrying the document.
pub const UPLOAD_FIELD: &str = "file";

/// Accept a single-file multipart upload and return its analysis.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let asset = read_file_field(&mut multipart, state.max_upload_bytes)
        .await?
        .ok_or(ApiError::NoFileProvided)?;

    info!(
        "Received {} ({}, {} bytes)",
        asset.filename,
        asset.media_type,
        asset.size()
    );

    let result = state
        .pipeline
        .process(&asset)
        .await
        .map_err(|e| match e {
            ExtractionError::UnsupportedMediaType(_) => ApiError::UnsupportedMediaType,
            other => ApiError::Internal(other.to_string()),
        })?;

    Ok(Json(result))
}

/// Find the `file` part, rejecting unsupported types before the payload is buffered.
async fn read_file_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<Option<UploadedAsset>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let media_type = match field.content_type() {
            Some(declared) => declared.to_string(),
            None => mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        if MediaKind::classify(&media_type).is_none() {
            return Err(ApiError::UnsupportedMediaType);
        }

        let payload = field.bytes().await.map_err(multipart_error)?;
        if payload.len() > max_bytes {
            return Err(ApiError::PayloadTooLarge);
        }

        return Ok(Some(UploadedAsset::new(payload, media_type, filename)));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        warn!("Malformed multipart upload: {}", err.body_text());
        ApiError::NoFileProvided
    }
}
