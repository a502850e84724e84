use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::instrument;

/// Health check endpoint.
#[instrument(skip_all)]
pub(super) async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
