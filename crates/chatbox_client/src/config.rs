//! Client configuration.

use chatbox_core::HISTORY_WINDOW;
use derive_getters::Getters;
use std::time::Duration;

/// Server the client talks to when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Backoff policy for rate-limited submissions.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct RetryConfig {
    /// Total number of requests per submission, the first one included
    #[builder(default = "3")]
    max_attempts: usize,
    /// Wait before the second request
    #[builder(default = "Duration::from_millis(1000)")]
    initial_backoff: Duration,
    /// Upper bound on any single wait
    #[builder(default = "Duration::from_secs(30)")]
    max_backoff: Duration,
    /// Growth factor between consecutive waits
    #[builder(default = "2.0")]
    backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Returns a builder seeded with the defaults.
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    /// The wait that follows `current`.
    pub fn next_backoff(&self, current: Duration) -> Duration {
        std::cmp::min(
            Duration::from_secs_f64(current.as_secs_f64() * self.backoff_multiplier),
            self.max_backoff,
        )
    }
}

/// Settings of a [`ChatClient`](crate::ChatClient).
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ClientConfig {
    /// Base URL of the Chatbox server
    #[builder(default = "DEFAULT_SERVER_URL.to_string()")]
    base_url: String,
    /// Number of trailing turns sent with each request
    #[builder(default = "HISTORY_WINDOW")]
    history_window: usize,
    /// Rate-limit backoff policy
    #[builder(default)]
    retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            history_window: HISTORY_WINDOW,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Returns a builder seeded with the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}
