use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::timers::core::entry::{GeoPoint, ReviewStatus};
use crate::modules::timers::use_cases::edit_entry::handler::EditEntry;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize, Default)]
pub struct EditEntryBody {
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub start_location_label: Option<String>,
    pub start_coordinates: Option<GeoPoint>,
    pub end_time: Option<DateTime<Utc>>,
    pub end_location_label: Option<String>,
    pub end_coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub append_photo_refs: Vec<String>,
    pub review_status: Option<ReviewStatus>,
    pub verification_flag: Option<bool>,
    pub verifier_ref: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<EditEntryBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = EditEntry {
        entry_id: id,
        description: body.description,
        start_time: body.start_time,
        start_location_label: body.start_location_label,
        start_coordinates: body.start_coordinates,
        end_time: body.end_time,
        end_location_label: body.end_location_label,
        end_coordinates: body.end_coordinates,
        append_photo_refs: body.append_photo_refs,
        review_status: body.review_status,
        verification_flag: body.verification_flag,
        verifier_ref: body.verifier_ref,
    };

    match state.edit_entry.handle(command).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => error_response(err),
    }
}
