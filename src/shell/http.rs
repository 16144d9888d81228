use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use serde_json::json;

use crate::modules::timers::core::error::TimerError;
use crate::modules::timers::use_cases::delete_entry::http as delete_http;
use crate::modules::timers::use_cases::edit_entry::http as edit_http;
use crate::modules::timers::use_cases::list_entries::http as list_http;
use crate::modules::timers::use_cases::pause_timer::http as pause_http;
use crate::modules::timers::use_cases::resume_timer::http as resume_http;
use crate::modules::timers::use_cases::start_timer::http as start_http;
use crate::modules::timers::use_cases::stop_timer::http as stop_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/timers", post(start_http::handle))
        .route("/timers", get(list_http::handle))
        .route("/timers/{id}/pause", post(pause_http::handle))
        .route("/timers/{id}/resume", post(resume_http::handle))
        .route("/timers/{id}/stop", post(stop_http::handle))
        .route("/timers/{id}", patch(edit_http::handle))
        .route("/timers/{id}", delete(delete_http::handle))
        .with_state(state)
}

/// Single mapping from the domain taxonomy onto wire responses. The body
/// always carries a machine-readable `error` plus the human-readable reason.
pub fn error_response(err: TimerError) -> Response {
    let (status, code) = match &err {
        TimerError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
        TimerError::InvalidState { .. } => (StatusCode::CONFLICT, "invalid_state"),
        TimerError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
        TimerError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        TimerError::TransientStore(_) => (StatusCode::SERVICE_UNAVAILABLE, "transient_store"),
    };
    (
        status,
        Json(json!({ "error": code, "message": err.to_string() })),
    )
        .into_response()
}
