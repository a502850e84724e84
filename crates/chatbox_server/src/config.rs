//! Server configuration.

use crate::RelayOptions;
use chatbox_core::{GenerationConfig, HISTORY_WINDOW};
use chatbox_error::{ChatboxResult, ConfigError};
use chatbox_models::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Address the server listens on when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// File stem looked up in the working directory when no path is given.
const DEFAULT_CONFIG_NAME: &str = "chatbox";

/// Prefix of environment overrides, e.g. `CHATBOX_BIND_ADDR`.
const ENV_PREFIX: &str = "CHATBOX";

/// Environment variable holding the upstream credential.
const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Configuration of the HTTP server and its upstream driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[serde(default)]
#[builder(setter(into), default)]
pub struct ServerConfig {
    /// Socket address to bind
    bind_addr: String,
    /// Upstream model identifier
    model: String,
    /// Upstream API base URL
    base_url: String,
    /// Number of trailing turns forwarded upstream
    history_window: usize,
    /// Bound on the upstream request until response headers arrive
    upstream_timeout_secs: Option<u64>,
    /// Bound on the idle gap between streamed fragments
    fragment_timeout_secs: Option<u64>,
    /// Sampling parameters
    generation: GenerationConfig,
    /// Upstream credential
    #[serde(skip_serializing)]
    api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            history_window: HISTORY_WINDOW,
            upstream_timeout_secs: None,
            fragment_timeout_secs: None,
            generation: GenerationConfig::default(),
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// Returns a builder seeded with the defaults.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Loads configuration from a TOML file overlaid with `CHATBOX_*`
    /// environment variables.
    ///
    /// With `path` set the file must exist. Without it, `chatbox.toml` in
    /// the working directory is used when present. When no key is
    /// configured, `GOOGLE_API_KEY` is consulted.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> ChatboxResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?;

        let config = Self::from_settings(settings)?.with_env_credential();
        debug!(
            bind_addr = %config.bind_addr,
            model = %config.model,
            has_key = config.api_key.is_some(),
            "Loaded server configuration"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text alone.
    pub fn from_toml(text: &str) -> ChatboxResult<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> ChatboxResult<Self> {
        let config: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the listen address.
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.bind_addr = bind_addr.into();
        self
    }

    /// Fills a missing credential from `GOOGLE_API_KEY`.
    pub fn with_env_credential(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        }
        self
    }

    /// Rejects settings the server cannot run with.
    #[track_caller]
    pub fn validate(&self) -> ChatboxResult<()> {
        if self.history_window == 0 {
            return Err(ConfigError::new("history_window must be at least 1").into());
        }
        if self.model.is_empty() {
            return Err(ConfigError::new("model must not be empty").into());
        }
        Ok(())
    }

    /// Upstream driver settings derived from this configuration.
    pub fn to_gemini_config(&self) -> ChatboxResult<GeminiConfig> {
        GeminiConfig::builder()
            .api_key(self.api_key.clone())
            .model(self.model.clone())
            .base_url(self.base_url.clone())
            .history_window(self.history_window)
            .generation(self.generation.clone())
            .request_timeout(self.upstream_timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid upstream configuration: {}", e)).into())
    }

    /// Relay settings derived from this configuration.
    pub fn relay_options(&self) -> RelayOptions {
        RelayOptions::new(self.fragment_timeout_secs.map(Duration::from_secs))
    }
}
