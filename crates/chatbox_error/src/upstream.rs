//! Upstream generative-language provider errors.

/// Failure conditions when talking to the upstream provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// Provider signalled rate limiting (HTTP 429).
    #[display("Rate limit exceeded: {_0}")]
    RateLimited(String),
    /// Provider answered with a non-success status.
    #[display("HTTP {status_code} error: {message}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Error message reported by the provider
        message: String,
    },
    /// Request could not be delivered.
    #[display("Upstream request failed: {_0}")]
    Transport(String),
    /// The fragment stream failed after it started.
    #[display("Stream interrupted: {_0}")]
    Stream(String),
    /// A streamed payload could not be decoded.
    #[display("Failed to decode upstream payload: {_0}")]
    Decode(String),
    /// No response within the configured bound.
    #[display("Upstream timed out after {_0} ms")]
    Timeout(u64),
}

impl UpstreamErrorKind {
    /// Whether the caller may recover by backing off and retrying.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, UpstreamErrorKind::RateLimited(_))
    }
}

/// Upstream error with source location tracking.
///
/// # Examples
///
/// ```
/// use chatbox_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(UpstreamErrorKind::RateLimited("quota".into()));
/// assert!(err.kind().is_rate_limited());
/// assert!(format!("{}", err).contains("Rate limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    kind: UpstreamErrorKind,
    line: u32,
    file: &'static str,
}

impl UpstreamError {
    /// Create a new upstream error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UpstreamErrorKind {
        &self.kind
    }
}

impl From<UpstreamErrorKind> for UpstreamError {
    #[track_caller]
    fn from(kind: UpstreamErrorKind) -> Self {
        Self::new(kind)
    }
}
