//! Behaviour of the in-memory todo store.

use chatbox_error::ChatboxErrorKind;
use chatbox_store::{InMemoryTodoStore, TodoStore};
use std::sync::Arc;

#[tokio::test]
async fn test_seeded_store_lists_starter_todos() {
    let store = InMemoryTodoStore::new();
    let todos = store.list().await.unwrap();

    let titles: Vec<&str> = todos.iter().map(|t| t.title().as_str()).collect();
    assert_eq!(
        titles,
        vec!["Learn Next.js", "Build a Todo API", "Integrate with AI"]
    );
    assert!(!*todos[0].completed());
    assert!(*todos[1].completed());
    assert!(todos[1].created_at() < todos[0].created_at());
    assert!(todos[2].created_at() < todos[1].created_at());
}

#[tokio::test]
async fn test_create_prepends_open_todo() {
    let store = InMemoryTodoStore::new();
    let created = store.create("Write tests").await.unwrap();

    assert_eq!(created.title(), "Write tests");
    assert!(!*created.completed());

    let todos = store.list().await.unwrap();
    assert_eq!(todos.len(), 4);
    assert_eq!(todos[0], created);
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let store = InMemoryTodoStore::new_empty();
    let err = store.create("").await.unwrap_err();

    assert!(matches!(err.kind(), ChatboxErrorKind::Validation(_)));
    assert_eq!(err.user_message(), "Title must be a valid string");
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rapid_creates_get_distinct_ids() {
    let store = InMemoryTodoStore::new_empty();
    let mut ids = Vec::new();
    for i in 0..20 {
        ids.push(store.create(&format!("todo {}", i)).await.unwrap().id().clone());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_set_completed_updates_record() {
    let store = InMemoryTodoStore::new();
    let updated = store.set_completed("1", true).await.unwrap();
    assert!(*updated.completed());

    let todos = store.list().await.unwrap();
    assert!(*todos.iter().find(|t| t.id() == "1").unwrap().completed());
}

#[tokio::test]
async fn test_set_completed_unknown_id() {
    let store = InMemoryTodoStore::new();
    let err = store.set_completed("missing", true).await.unwrap_err();

    assert!(matches!(err.kind(), ChatboxErrorKind::NotFound(_)));
    assert_eq!(err.user_message(), "Todo not found");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = InMemoryTodoStore::new();
    store.delete("2").await.unwrap();
    store.delete("2").await.unwrap();
    store.delete("never-existed").await.unwrap();

    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .iter()
        .map(|t| t.id().clone())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_clones_share_state_across_tasks() {
    let store: Arc<dyn TodoStore> = Arc::new(InMemoryTodoStore::new_empty());

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create(&format!("task {}", i)).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.list().await.unwrap().len(), 8);
}
