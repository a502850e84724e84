//! Conversation turns.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single message in a conversation.
///
/// # Examples
///
/// ```
/// use chatbox_core::{Role, Turn};
///
/// let turn = Turn::user("Hello!");
///
/// assert_eq!(*turn.role(), Role::User);
/// assert_eq!(turn.content(), "Hello!");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Turn {
    /// The role of the message sender
    role: Role,
    /// The text of the message
    content: String,
}

impl Turn {
    /// Creates a new turn with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns a builder for constructing a Turn.
    pub fn builder() -> TurnBuilder {
        TurnBuilder::default()
    }

    /// Appends streamed text to this turn.
    pub fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }
}
