//! Driver trait for upstream chat providers.

use async_trait::async_trait;
use chatbox_core::Turn;
use chatbox_error::ChatboxResult;
use futures_util::Stream;
use std::pin::Pin;

/// Lazy, finite, non-restartable sequence of generated text fragments.
///
/// An `Err` item means the upstream failed mid-stream; nothing follows it.
pub type FragmentStream = Pin<Box<dyn Stream<Item = ChatboxResult<String>> + Send>>;

/// A provider that turns a conversation into a stream of text fragments.
#[async_trait]
pub trait ChatDriver: Send + Sync {
    /// Model identifier reported to callers.
    fn model_name(&self) -> &str;

    /// Fails when the driver cannot issue requests at all.
    ///
    /// Callers may use this to report configuration problems before they
    /// look at the request.
    fn ensure_ready(&self) -> ChatboxResult<()> {
        Ok(())
    }

    /// Starts a streaming generation for `turns`.
    ///
    /// The last turn must come from the user. Failures that happen before
    /// the first fragment (missing credential, invalid turns, rejected
    /// request) are returned as `Err`; later failures arrive as stream items.
    async fn stream_chat(&self, turns: &[Turn]) -> ChatboxResult<FragmentStream>;
}
