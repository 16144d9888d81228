use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::modules::timers::core::entry::Checkpoint;
use crate::modules::timers::use_cases::stop_timer::handler::StopTimer;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

/// The request body is the end payload itself.
pub async fn handle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<Checkpoint>, JsonRejection>,
) -> impl IntoResponse {
    let Json(end) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state
        .stop_timer
        .handle(StopTimer { entry_id: id, end })
        .await
    {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => error_response(err),
    }
}
