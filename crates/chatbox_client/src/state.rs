//! Submission lifecycle.

/// Phase of a submission.
///
/// `Idle → Attempting → {Succeeded | BackoffWait → Attempting | FailedFinal}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AttemptState {
    /// User turn recorded, no request sent yet
    Idle,
    /// Request in flight or reply streaming
    Attempting,
    /// Rate limited, waiting before the next request
    BackoffWait,
    /// Reply fully received
    Succeeded,
    /// Gave up; a notice was appended to the conversation
    FailedFinal,
}

impl AttemptState {
    /// True for [`Succeeded`](Self::Succeeded) and
    /// [`FailedFinal`](Self::FailedFinal).
    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptState::Succeeded | AttemptState::FailedFinal)
    }
}
