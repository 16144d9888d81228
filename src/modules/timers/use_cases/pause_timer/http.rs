use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.pause_timer.handle(id).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => error_response(err),
    }
}
