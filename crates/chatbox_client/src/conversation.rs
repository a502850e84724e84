//! Local conversation log.

use chatbox_core::{Role, Turn, history_window};
use serde::{Deserialize, Serialize};

/// Ordered turns kept by the caller across submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a conversation from existing turns.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The trailing `max` turns.
    pub fn window(&self, max: usize) -> &[Turn] {
        history_window(&self.turns, max)
    }

    /// Appends a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Extends the last turn if it is an assistant turn, otherwise starts one.
    pub fn append_assistant_text(&mut self, text: &str) {
        match self.turns.last_mut() {
            Some(last) if *last.role() == Role::Assistant => last.push_str(text),
            _ => self.turns.push(Turn::assistant(text)),
        }
    }

    /// The most recent turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns were recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
