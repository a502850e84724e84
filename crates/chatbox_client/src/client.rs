//! Submission with rate-limit backoff.

use crate::{
    AttemptState, ChatResponse, ChatTransport, ChunkStream, ClientConfig, Conversation,
    HttpTransport, Utf8Decoder,
};
use chatbox_core::Turn;
use chatbox_error::{ChatboxResult, ValidationError};
use derive_getters::Getters;
use futures_util::StreamExt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Appended once when every attempt was rate limited.
pub const EXHAUSTED_NOTICE: &str = "Failed to get a response after multiple attempts due to API limits. Please wait a moment and try again.";

/// Assistant-role text reporting a failed submission.
pub fn failure_notice(message: &str) -> String {
    format!("Sorry, an error occurred: {}. Please try again.", message)
}

/// What happened during one [`ChatClient::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SubmissionReport {
    /// Terminal state reached
    final_state: AttemptState,
    /// Requests sent
    attempts: usize,
    /// Waits taken between requests, in order
    backoffs: Vec<Duration>,
}

/// Sends user messages and collects streamed replies.
#[derive(Debug, Clone)]
pub struct ChatClient<T> {
    transport: T,
    config: ClientConfig,
}

impl ChatClient<HttpTransport> {
    /// Creates a client talking HTTP to `config.base_url`.
    pub fn connect(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.base_url());
        Self::new(transport, config)
    }
}

impl<T: ChatTransport> ChatClient<T> {
    /// Creates a client over an explicit transport.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits `input` as the next user turn of `conversation`.
    ///
    /// The user turn is appended immediately. Rate-limited requests are
    /// retried with exponential backoff up to `max_attempts` requests;
    /// other failures are not retried. Every failure leaves an assistant
    /// turn with a readable notice. `observer` receives the text decoded
    /// from each body chunk as it arrives.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without touching the conversation, when
    /// `input` is blank.
    #[instrument(skip_all, fields(history = conversation.len()))]
    pub async fn submit<F>(
        &self,
        conversation: &mut Conversation,
        input: &str,
        mut observer: F,
    ) -> ChatboxResult<SubmissionReport>
    where
        F: FnMut(&str) + Send,
    {
        if input.trim().is_empty() {
            return Err(ValidationError::new("Message must not be empty").into());
        }

        conversation.push(Turn::user(input));
        let mut state = AttemptState::Idle;

        let retry = self.config.retry();
        let max_attempts = (*retry.max_attempts()).max(1);
        let mut delay = *retry.initial_backoff();
        let mut attempts = 0;
        let mut backoffs = Vec::new();

        loop {
            attempts += 1;
            state = transition(state, AttemptState::Attempting);

            let window = conversation.window(*self.config.history_window());
            let response = self.transport.send(window).await;

            match response {
                Ok(ChatResponse::Streaming(body)) => {
                    state = transition(state, read_reply(conversation, body, &mut observer).await);
                    break;
                }
                Ok(ChatResponse::RateLimited(message)) => {
                    warn!(attempt = attempts, max_attempts, error = %message, "Rate limit hit");
                    if attempts >= max_attempts {
                        conversation.push(Turn::assistant(EXHAUSTED_NOTICE));
                        state = transition(state, AttemptState::FailedFinal);
                        break;
                    }
                    state = transition(state, AttemptState::BackoffWait);
                    debug!(backoff = ?delay, "Backing off");
                    backoffs.push(delay);
                    sleep(delay).await;
                    delay = retry.next_backoff(delay);
                }
                Ok(ChatResponse::Rejected(message)) => {
                    warn!(attempt = attempts, error = %message, "Request rejected");
                    conversation.push(Turn::assistant(failure_notice(&message)));
                    state = transition(state, AttemptState::FailedFinal);
                    break;
                }
                Err(e) => {
                    warn!(attempt = attempts, error = %e, "Request not delivered");
                    conversation.push(Turn::assistant(failure_notice(&e.user_message())));
                    state = transition(state, AttemptState::FailedFinal);
                    break;
                }
            }
        }

        info!(state = %state, attempts, "Submission finished");
        Ok(SubmissionReport {
            final_state: state,
            attempts,
            backoffs,
        })
    }
}

fn transition(from: AttemptState, to: AttemptState) -> AttemptState {
    debug!(from = %from, to = %to, "State change");
    to
}

/// Streams a successful reply into a fresh assistant turn.
async fn read_reply<F>(
    conversation: &mut Conversation,
    mut body: ChunkStream,
    observer: &mut F,
) -> AttemptState
where
    F: FnMut(&str) + Send,
{
    conversation.push(Turn::assistant(""));
    let mut decoder = Utf8Decoder::default();
    let mut chunks = 0usize;

    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                chunks += 1;
                let text = decoder.push(&bytes);
                conversation.append_assistant_text(&text);
                observer(&text);
            }
            Err(e) => {
                if let Some(rest) = decoder.finish() {
                    conversation.append_assistant_text(&rest);
                    observer(&rest);
                }
                warn!(chunks, error = %e, "Reply interrupted");
                conversation.push(Turn::assistant(failure_notice(&e.user_message())));
                return AttemptState::FailedFinal;
            }
        }
    }

    if let Some(rest) = decoder.finish() {
        conversation.append_assistant_text(&rest);
        observer(&rest);
    }
    debug!(chunks, "Reply complete");
    AttemptState::Succeeded
}
