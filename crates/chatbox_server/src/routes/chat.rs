//! Streaming chat endpoint.

use crate::{ApiError, AppState, relay};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{StatusCode, header},
    response::Response,
};
use chatbox_core::Turn;
use chatbox_error::ValidationError;
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Response header naming the upstream model.
pub const MODEL_HEADER: &str = "x-model-used";

#[derive(Debug, Deserialize)]
struct ChatRequest {
    messages: Vec<Turn>,
}

/// `POST /api/chat`: streams the reply to the conversation in the body.
///
/// Failures before the first fragment are JSON errors; later failures end
/// the text body with the interruption notice.
#[instrument(skip_all, fields(model = state.driver().model_name()))]
pub(super) async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    state.driver().ensure_ready().map_err(ApiError::chat)?;

    let request: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Malformed chat request");
        ApiError::chat(ValidationError::new("Invalid request format").into())
    })?;

    let fragments = state
        .driver()
        .stream_chat(&request.messages)
        .await
        .map_err(ApiError::chat)?;

    info!(turns = request.messages.len(), "Streaming reply");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(MODEL_HEADER, state.driver().model_name())
        .body(Body::from_stream(relay(fragments, *state.relay())))
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
