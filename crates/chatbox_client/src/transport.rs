//! Delivery of chat requests to the server.

use async_trait::async_trait;
use chatbox_core::Turn;
use chatbox_error::{ChatboxError, ChatboxResult, HttpError};
use futures_util::{Stream, StreamExt};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::pin::Pin;
use tracing::{debug, instrument, warn};

/// Reply body as raw byte chunks; an `Err` item ends it.
pub type ChunkStream = Pin<Box<dyn Stream<Item = ChatboxResult<Vec<u8>>> + Send>>;

/// Outcome of one delivered request.
pub enum ChatResponse {
    /// Success; the reply follows as a chunked body
    Streaming(ChunkStream),
    /// The server answered 429
    RateLimited(String),
    /// Any other non-success answer, with the message to surface
    Rejected(String),
}

impl std::fmt::Debug for ChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatResponse::Streaming(_) => f.write_str("Streaming(..)"),
            ChatResponse::RateLimited(m) => f.debug_tuple("RateLimited").field(m).finish(),
            ChatResponse::Rejected(m) => f.debug_tuple("Rejected").field(m).finish(),
        }
    }
}

/// Sends a conversation window to the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Delivers `turns`.
    ///
    /// Returns `Err` only when no response was received at all.
    async fn send(&self, turns: &[Turn]) -> ChatboxResult<ChatResponse>;
}

/// Message surfaced for a non-success response body.
///
/// The JSON `error` field when present; the status text when the body is
/// JSON without one; a generic message when the body is not JSON.
pub fn failure_message(status_text: &str, body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => match json.get("error").and_then(Value::as_str) {
            Some(error) if !error.is_empty() => error.to_string(),
            _ => format!("Network response was not ok: {}", status_text),
        },
        Err(_) => "Unknown error occurred.".to_string(),
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Turn],
}

/// [`ChatTransport`] over HTTP to `{base_url}/api/chat`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn body_error(e: reqwest::Error) -> ChatboxError {
    HttpError::new(format!("Failed to read response: {}", e)).into()
}

#[async_trait]
impl ChatTransport for HttpTransport {
    #[instrument(skip(self, turns), fields(endpoint = %self.endpoint, turns = turns.len()))]
    async fn send(&self, turns: &[Turn]) -> ChatboxResult<ChatResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { messages: turns })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request failed");
                HttpError::new(format!("Failed to reach server: {}", e))
            })?;

        let status = response.status();
        debug!(status = %status, "Received response");

        if status.is_success() {
            let chunks = response
                .bytes_stream()
                .map(|chunk| chunk.map(|b| b.to_vec()).map_err(body_error));
            return Ok(ChatResponse::Streaming(Box::pin(chunks)));
        }

        let status_text = status.canonical_reason().unwrap_or_default();
        let body = response.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        let message = failure_message(status_text, &body);

        if status == StatusCode::TOO_MANY_REQUESTS {
            Ok(ChatResponse::RateLimited(message))
        } else {
            Ok(ChatResponse::Rejected(message))
        }
    }
}
