use crate::{ApiError, AppState};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use chatbox_store::{ListNotesInput, ListNotesOutput};
use tracing::instrument;

/// `GET /api/notes?maxResults=&query=&filter=`
#[instrument(skip_all)]
pub(super) async fn list(
    State(state): State<AppState>,
    input: Result<Query<ListNotesInput>, QueryRejection>,
) -> Result<Json<ListNotesOutput>, ApiError> {
    let Query(input) = input.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
    let output = state.notes().list_notes(&input).map_err(ApiError::records)?;
    Ok(Json(output))
}
