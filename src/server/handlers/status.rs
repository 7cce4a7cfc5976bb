//! Liveness and diagnostics endpoints.

use axum::{extract::State, response::IntoResponse, Json};

use super::super::AppState;

/// Plain-text liveness banner.
pub async fn index() -> &'static str {
    "Backend server is running..."
}

/// API endpoint exposing absorbed analysis failures to operators.
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    let diagnostics = state.pipeline.diagnostics().snapshot();

    Json(serde_json::json!({
        "status": "ok",
        "max_upload_bytes": state.max_upload_bytes,
        "analysis": diagnostics,
    }))
}
