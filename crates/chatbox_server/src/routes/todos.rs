//! Todo CRUD endpoints.

use crate::{ApiError, AppState};
use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use chatbox_error::ValidationError;
use chatbox_store::Todo;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct UpdateTodo {
    id: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct DeleteTodo {
    id: String,
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|_| ApiError::records(ValidationError::new("Invalid request format").into()))
}

#[instrument(skip_all)]
pub(super) async fn list(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.todos().list().await.map_err(ApiError::records)?;
    Ok(Json(todos))
}

/// `POST /api/todos` with `{title}`; the title must be a non-empty string.
#[instrument(skip_all)]
pub(super) async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let value: Value = parse(&body)?;
    let title = value
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::records(ValidationError::new("Title must be a valid string").into()))?;

    let todo = state.todos().create(title).await.map_err(ApiError::records)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[instrument(skip_all)]
pub(super) async fn update(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let update: UpdateTodo = parse(&body)?;
    let todo = state
        .todos()
        .set_completed(&update.id, update.completed)
        .await
        .map_err(ApiError::records)?;
    Ok(Json(todo))
}

#[instrument(skip_all)]
pub(super) async fn delete(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let delete: DeleteTodo = parse(&body)?;
    state
        .todos()
        .delete(&delete.id)
        .await
        .map_err(ApiError::records)?;
    Ok(Json(json!({ "success": true })))
}
