//! Crate-level error aggregation.

use crate::{ConfigError, HttpError, JsonError, NotFoundError, UpstreamError, ValidationError};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum ChatboxErrorKind {
    /// Missing credential or bad configuration
    #[display("{_0}")]
    Config(ConfigError),
    /// Malformed input
    #[display("{_0}")]
    Validation(ValidationError),
    /// Unknown record
    #[display("{_0}")]
    NotFound(NotFoundError),
    /// Upstream provider failure
    #[display("{_0}")]
    Upstream(UpstreamError),
    /// Client-side transport failure
    #[display("{_0}")]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[display("{_0}")]
    Json(JsonError),
}

impl ChatboxErrorKind {
    /// The message meant for end users, without source location.
    pub fn user_message(&self) -> String {
        match self {
            ChatboxErrorKind::Config(e) => e.message.clone(),
            ChatboxErrorKind::Validation(e) => e.message.clone(),
            ChatboxErrorKind::NotFound(e) => e.message.clone(),
            ChatboxErrorKind::Upstream(e) => e.kind().to_string(),
            ChatboxErrorKind::Http(e) => e.message.clone(),
            ChatboxErrorKind::Json(e) => e.message.clone(),
        }
    }
}

/// Chatbox error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Chatbox Error: {}", _0)]
pub struct ChatboxError(Box<ChatboxErrorKind>);

impl ChatboxError {
    /// Create a new error from a kind.
    pub fn new(kind: ChatboxErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChatboxErrorKind {
        &self.0
    }

    /// The message meant for end users, without source location.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatbox_error::{ChatboxError, ValidationError};
    ///
    /// let err: ChatboxError = ValidationError::new("No user message found").into();
    /// assert_eq!(err.user_message(), "No user message found");
    /// ```
    pub fn user_message(&self) -> String {
        self.0.user_message()
    }

    /// True when the upstream provider signalled rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind(), ChatboxErrorKind::Upstream(e) if e.kind().is_rate_limited())
    }
}

impl std::error::Error for ChatboxError {}

// Generic From implementation for any type that converts to ChatboxErrorKind
impl<T> From<T> for ChatboxError
where
    T: Into<ChatboxErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Chatbox operations.
pub type ChatboxResult<T> = std::result::Result<T, ChatboxError>;
