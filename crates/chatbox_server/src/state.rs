//! Shared handler state.

use crate::RelayOptions;
use chatbox_models::ChatDriver;
use chatbox_store::{NoteCatalog, TodoStore};
use derive_getters::Getters;
use std::sync::Arc;

/// Dependencies injected into every handler.
#[derive(Clone, Getters)]
pub struct AppState {
    /// Upstream chat provider
    driver: Arc<dyn ChatDriver>,
    /// Todo storage
    todos: Arc<dyn TodoStore>,
    /// Note catalog
    notes: Arc<NoteCatalog>,
    /// Relay tuning for chat responses
    relay: RelayOptions,
}

impl AppState {
    /// Creates state with default relay options.
    pub fn new(
        driver: Arc<dyn ChatDriver>,
        todos: Arc<dyn TodoStore>,
        notes: Arc<NoteCatalog>,
    ) -> Self {
        Self {
            driver,
            todos,
            notes,
            relay: RelayOptions::default(),
        }
    }

    /// Replaces the relay options.
    pub fn with_relay(mut self, relay: RelayOptions) -> Self {
        self.relay = relay;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("model", &self.driver.model_name())
            .field("notes", &self.notes.notes().len())
            .field("relay", &self.relay)
            .finish_non_exhaustive()
    }
}
