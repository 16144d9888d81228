use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::modules::timers::use_cases::list_entries::handler::ListEntries;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListEntriesParams {
    pub worker_id: Option<String>,
    /// `YYYY-MM-DD`; unparsable values are dropped, not rejected.
    pub from: Option<String>,
    pub to: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

fn parse_day(raw: Option<&str>, key: &'static str) -> Option<NaiveDate> {
    let raw = raw?;
    match raw.parse::<NaiveDate>() {
        Ok(day) => Some(day),
        Err(_) => {
            tracing::warn!(key, raw, "unparsable date filter dropped from listing");
            None
        }
    }
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListEntriesParams>,
) -> impl IntoResponse {
    let query = ListEntries {
        worker_id: params.worker_id,
        from: parse_day(params.from.as_deref(), "from"),
        to: parse_day(params.to.as_deref(), "to"),
        search: params.search,
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(0),
    };

    match state.list_entries.handle(query).await {
        Ok(page) => Json(page).into_response(),
        Err(err) => error_response(err),
    }
}
