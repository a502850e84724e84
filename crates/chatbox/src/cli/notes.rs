use chatbox_error::{ChatboxResult, JsonError};
use chatbox_store::{ListNotesInput, ListNotesOutput, NoteCatalog, NoteFilter};
use serde::Serialize;

/// Handle the `notes` command against the built-in catalog.
pub fn handle_notes_command(
    query: Option<String>,
    filter: NoteFilter,
    max_results: u32,
) -> ChatboxResult<ListNotesOutput> {
    NoteCatalog::mock().list_notes(&ListNotesInput::new(max_results, query, filter))
}

/// Pretty-prints a command result as JSON.
pub fn render_json<T: Serialize>(value: &T) -> ChatboxResult<String> {
    Ok(serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to render output: {}", e)))?)
}
