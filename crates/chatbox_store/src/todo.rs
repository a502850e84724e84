//! Todo records and their store.

use async_trait::async_trait;
use chatbox_error::{ChatboxResult, NotFoundError, ValidationError};
use chrono::{DateTime, Duration, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// A todo item as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    id: String,
    /// Free-form title
    title: String,
    /// Completion flag
    completed: bool,
    /// Creation time
    created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a todo record.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed,
            created_at,
        }
    }
}

/// Storage for todo items.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Returns all todos, newest first.
    async fn list(&self) -> ChatboxResult<Vec<Todo>>;

    /// Creates an open todo and places it at the front of the list.
    ///
    /// Fails with a validation error when the title is empty.
    async fn create(&self, title: &str) -> ChatboxResult<Todo>;

    /// Sets the completion flag of an existing todo.
    ///
    /// Fails with a not-found error for unknown ids.
    async fn set_completed(&self, id: &str, completed: bool) -> ChatboxResult<Todo>;

    /// Removes a todo. Unknown ids are ignored.
    async fn delete(&self, id: &str) -> ChatboxResult<()>;
}

/// Process-local [`TodoStore`].
///
/// Clones share the same underlying list.
#[derive(Debug, Clone)]
pub struct InMemoryTodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoStore {
    /// Creates a store holding the three starter todos.
    pub fn new() -> Self {
        let now = Utc::now();
        Self::with_todos(vec![
            Todo::new("1", "Learn Next.js", false, now),
            Todo::new("2", "Build a Todo API", true, now - Duration::days(1)),
            Todo::new("3", "Integrate with AI", false, now - Duration::days(2)),
        ])
    }

    /// Creates a store with no todos.
    pub fn new_empty() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Creates a store holding the given todos, in list order.
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos)),
        }
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Millisecond timestamp id, bumped past any id already in use.
fn next_id(todos: &[Todo], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    while todos.iter().any(|t| t.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list(&self) -> ChatboxResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    #[instrument(skip(self, title), fields(title_len = title.len()))]
    async fn create(&self, title: &str) -> ChatboxResult<Todo> {
        if title.is_empty() {
            return Err(ValidationError::new("Title must be a valid string").into());
        }

        let mut todos = self.todos.write().await;
        let now = Utc::now();
        let todo = Todo::new(next_id(&todos, now), title, false, now);
        todos.insert(0, todo.clone());

        debug!(id = %todo.id, total = todos.len(), "Created todo");
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn set_completed(&self, id: &str, completed: bool) -> ChatboxResult<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| NotFoundError::new("Todo not found"))?;
        todo.completed = completed;

        debug!("Updated todo");
        Ok(todo.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ChatboxResult<()> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);

        debug!(removed = before - todos.len(), "Deleted todo");
        Ok(())
    }
}
