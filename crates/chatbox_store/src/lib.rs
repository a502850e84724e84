//! Record stores backing the Chatbox todo and note endpoints.
//!
//! State lives in explicit objects handed to the HTTP layer:
//!
//! - [`TodoStore`] with the [`InMemoryTodoStore`] implementation
//! - [`NoteCatalog`] with the filtered [`NoteCatalog::list_notes`] query

mod notes;
mod todo;

pub use notes::{
    ListNotesInput, ListNotesOutput, MAX_RESULTS_LIMIT, Note, NoteCatalog, NoteFilter, NoteStatus,
};
pub use todo::{InMemoryTodoStore, Todo, TodoStore};
