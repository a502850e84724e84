//! Mapping of domain errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chatbox_error::{ChatboxError, ChatboxErrorKind};
use serde_json::json;
use tracing::{error, warn};

/// An error rendered as `{"error": "<message>"}` with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error response with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Maps a chat failure: rate limiting is 429, everything else 500.
    pub fn chat(err: ChatboxError) -> Self {
        let status = if err.is_rate_limited() {
            StatusCode::TOO_MANY_REQUESTS
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error!(status = %status, error = %err, "API Error");
        Self::new(status, err.user_message())
    }

    /// Maps a todo or note failure onto 400, 404 or 500.
    pub fn records(err: ChatboxError) -> Self {
        let status = match err.kind() {
            ChatboxErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
            ChatboxErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(status = %status, error = %err, "API Error");
        } else {
            warn!(status = %status, error = %err, "Request rejected");
        }
        Self::new(status, err.user_message())
    }

    /// Status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message placed in the `error` field.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbox_error::{
        ConfigError, NotFoundError, UpstreamError, UpstreamErrorKind, ValidationError,
    };

    #[test]
    fn test_chat_status_mapping() {
        let limited = ApiError::chat(
            UpstreamError::new(UpstreamErrorKind::RateLimited("quota".into())).into(),
        );
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

        let config = ApiError::chat(ConfigError::new("Google API key is not configured").into());
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.message(), "Google API key is not configured");

        let invalid = ApiError::chat(ValidationError::new("No user message found").into());
        assert_eq!(invalid.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_records_status_mapping() {
        let invalid = ApiError::records(ValidationError::new("bad").into());
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::records(NotFoundError::new("Todo not found").into());
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.message(), "Todo not found");
    }
}
