//! Bounded conversation history.
//!
//! Both the relay and the chat client send only the most recent turns
//! upstream. The window size lives here so the two sides agree on it.

use crate::{Role, Turn};
use chatbox_error::{ChatboxResult, ValidationError};
use tracing::{debug, instrument};

/// Number of trailing turns sent upstream with each request.
pub const HISTORY_WINDOW: usize = 10;

/// Returns the trailing `min(max, turns.len())` turns, preserving order.
///
/// # Examples
///
/// ```
/// use chatbox_core::{Turn, history_window};
///
/// let turns = vec![Turn::user("a"), Turn::assistant("b"), Turn::user("c")];
/// let window = history_window(&turns, 2);
/// assert_eq!(window, &turns[1..]);
///
/// // Fewer turns than the window: returned unchanged
/// assert_eq!(history_window(&turns, 10), &turns[..]);
/// ```
pub fn history_window(turns: &[Turn], max: usize) -> &[Turn] {
    &turns[turns.len().saturating_sub(max)..]
}

/// Checks that a conversation can start a generation.
///
/// The sequence must be non-empty and end with a user turn.
#[instrument(skip(turns), fields(turns = turns.len()))]
pub fn ensure_ends_with_user(turns: &[Turn]) -> ChatboxResult<()> {
    match turns.last() {
        Some(last) if *last.role() == Role::User => Ok(()),
        _ => {
            debug!("Rejecting conversation without a trailing user turn");
            Err(ValidationError::new("No user message found").into())
        }
    }
}
