//! Streaming client for the Gemini generative-language API.

use crate::gemini::conversions;
use crate::{ChatDriver, FragmentStream};
use async_trait::async_trait;
use chatbox_core::{
    GenerateRequest, GenerationConfig, HISTORY_WINDOW, Turn, ensure_ends_with_user, history_window,
};
use chatbox_error::{ChatboxResult, ConfigError, UpstreamError, UpstreamErrorKind};
use derive_getters::Getters;
use futures_util::{Stream, StreamExt};
use reqwest::{Client, StatusCode};
use reqwest_sse::EventSource;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Public endpoint of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GeminiConfig {
    /// API credential; requests fail with a configuration error without it
    #[builder(default)]
    api_key: Option<String>,
    /// Model identifier
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// API base URL, without trailing path
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Number of trailing turns sent upstream; at least 1
    #[builder(default = "HISTORY_WINDOW")]
    history_window: usize,
    /// Sampling parameters
    #[builder(default)]
    generation: GenerationConfig,
    /// Bound on the wait for response headers; unbounded when unset
    #[builder(default)]
    request_timeout: Option<Duration>,
}

impl GeminiConfig {
    /// Returns a builder with the public endpoint and default model.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

impl GeminiConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.history_window == Some(0) {
            return Err("history_window must be at least 1".to_string());
        }
        Ok(())
    }
}

/// [`ChatDriver`] backed by `streamGenerateContent` over server-sent events.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client from configuration.
    #[instrument(skip(config), fields(model = %config.model(), url = %config.base_url()))]
    pub fn new(config: GeminiConfig) -> Self {
        if config.api_key().is_none() {
            warn!("No Google API key configured; chat requests will be rejected");
        }
        debug!("Created Gemini client");
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    #[track_caller]
    fn api_key(&self) -> ChatboxResult<&str> {
        Ok(self
            .config
            .api_key()
            .as_deref()
            .ok_or_else(|| ConfigError::new("Google API key is not configured"))?)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.config.base_url().trim_end_matches('/'),
            self.config.model()
        )
    }
}

#[async_trait]
impl ChatDriver for GeminiClient {
    fn model_name(&self) -> &str {
        self.config.model()
    }

    fn ensure_ready(&self) -> ChatboxResult<()> {
        self.api_key().map(|_| ())
    }

    #[instrument(skip(self, turns), fields(model = %self.config.model(), turns = turns.len()))]
    async fn stream_chat(&self, turns: &[Turn]) -> ChatboxResult<FragmentStream> {
        let api_key = self.api_key()?;

        ensure_ends_with_user(turns)?;

        let window = history_window(turns, *self.config.history_window());
        let request = GenerateRequest::new(window.to_vec(), self.config.generation().clone());
        let body = conversions::to_generate_content_request(&request);

        debug!(window = window.len(), "Sending streaming generation request");

        let send = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send();

        let response = match self.config.request_timeout() {
            Some(limit) => tokio::time::timeout(*limit, send).await.map_err(|_| {
                warn!(timeout = ?limit, "Upstream request timed out");
                let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                UpstreamError::new(UpstreamErrorKind::Timeout(millis))
            })?,
            None => send.await,
        }
        .map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            UpstreamError::new(UpstreamErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = conversions::error_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string())
            });
            error!(status = %status, error = %message, "API error");

            let kind = if status == StatusCode::TOO_MANY_REQUESTS {
                UpstreamErrorKind::RateLimited(message)
            } else {
                UpstreamErrorKind::Status {
                    status_code: status.as_u16(),
                    message,
                }
            };
            return Err(UpstreamError::new(kind).into());
        }

        let events = response.events().await.map_err(|e| {
            error!(error = %e, "Upstream response is not an event stream");
            UpstreamError::new(UpstreamErrorKind::Decode(e.to_string()))
        })?;

        Ok(fragments(events.map(|event| event.map(|event| event.data))))
    }
}

/// Turns the `data` payloads of an event stream into text fragments.
///
/// The first failure (body read, malformed event, in-band error) is yielded
/// as the final item.
fn fragments<S, E>(events: S) -> FragmentStream
where
    S: Stream<Item = Result<String, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut events = Box::pin(events);
        let mut delivered = 0usize;

        while let Some(event) = events.next().await {
            let data = match event {
                Ok(data) => data,
                Err(e) => {
                    warn!(delivered, error = %e, "Upstream body failed mid-stream");
                    yield Err(UpstreamError::new(UpstreamErrorKind::Stream(e.to_string())).into());
                    return;
                }
            };
            if data.is_empty() {
                continue;
            }

            match conversions::fragment_from_event(&data) {
                Ok(Some(text)) => {
                    delivered += 1;
                    yield Ok(text);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(delivered, error = %e, "Upstream event rejected");
                    yield Err(e);
                    return;
                }
            }
        }

        debug!(delivered, "Upstream stream finished");
    })
}
