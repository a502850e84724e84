//! Route table.

mod chat;
mod health;
mod notes;
mod todos;

pub use chat::MODEL_HEADER;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Creates the API router over the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat::chat))
        .route(
            "/api/todos",
            get(todos::list)
                .post(todos::create)
                .patch(todos::update)
                .delete(todos::delete),
        )
        .route("/api/notes", get(notes::list))
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
