//! Forwarding of upstream fragments into a response body.

use axum::body::Bytes;
use chatbox_models::FragmentStream;
use derive_getters::Getters;
use futures_util::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Text appended in-band when the upstream fails after streaming began.
pub const STREAM_INTERRUPTED_NOTICE: &str = "\n\n[Error: Stream interrupted. Please try again.]";

/// Tuning of [`relay`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct RelayOptions {
    /// Longest wait for the next fragment; unbounded when unset
    fragment_timeout: Option<Duration>,
}

impl RelayOptions {
    /// Creates relay options.
    pub fn new(fragment_timeout: Option<Duration>) -> Self {
        Self { fragment_timeout }
    }
}

/// Relays fragments as UTF-8 body chunks, in arrival order.
///
/// An upstream error, or an idle gap longer than the configured fragment
/// timeout, ends the body with [`STREAM_INTERRUPTED_NOTICE`]. The body
/// itself never fails, so clients always see a cleanly terminated response.
pub fn relay(
    fragments: FragmentStream,
    options: RelayOptions,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    async_stream::stream! {
        let mut fragments = fragments;
        let mut sent = 0usize;

        loop {
            let next = match options.fragment_timeout {
                Some(limit) => match tokio::time::timeout(limit, fragments.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(sent, timeout = ?limit, "Upstream went idle");
                        yield Ok(Bytes::from_static(STREAM_INTERRUPTED_NOTICE.as_bytes()));
                        break;
                    }
                },
                None => fragments.next().await,
            };

            match next {
                Some(Ok(text)) => {
                    sent += 1;
                    yield Ok(Bytes::from(text));
                }
                Some(Err(e)) => {
                    error!(sent, error = %e, "Stream error");
                    yield Ok(Bytes::from_static(STREAM_INTERRUPTED_NOTICE.as_bytes()));
                    break;
                }
                None => break,
            }
        }

        debug!(sent, "Relay finished");
    }
}
