// Query/filter façade: paginated listing plus the aggregation summary.
//
// The summary is computed over the unpaginated filtered set; leave counting
// additionally scans the full unfiltered history, so page and date filters
// never change a worker's leave total.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::timers::core::aggregate::{EntrySummary, summarize};
use crate::modules::timers::core::duration::{live_worked_minutes, worked_minutes};
use crate::modules::timers::core::entry::{
    Checkpoint, EntryState, PauseInterval, ReviewStatus, TimeEntry,
};
use crate::modules::timers::core::error::TimerError;
use crate::modules::timers::use_cases::support::store_error;
use crate::shared::infrastructure::entry_store::{EntryFilter, EntryStore};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEntries {
    pub worker_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
    /// 1-based; 0 is coerced to 1.
    pub page: u64,
    /// Defaults to 20, capped at 100.
    pub page_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub id: Uuid,
    pub worker_id: String,
    pub project_ref: Option<String>,
    pub task_ref: Option<String>,
    pub state: EntryState,
    pub start: Checkpoint,
    pub end: Option<Checkpoint>,
    pub pause_intervals: Vec<PauseInterval>,
    pub description: String,
    pub photo_refs: Vec<String>,
    pub verification_flag: bool,
    pub review_status: ReviewStatus,
    pub verifier_ref: Option<String>,
    /// Authoritative only once the entry is closed; `null` before that.
    pub worked_minutes: Option<i64>,
    /// Display-only estimate for open entries; never persisted.
    pub live_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EntryView {
    pub fn from_entry(entry: &TimeEntry, now: DateTime<Utc>) -> Self {
        let worked = worked_minutes(entry);
        let live = entry
            .is_open()
            .then(|| live_worked_minutes(entry, now));
        Self {
            id: entry.id,
            worker_id: entry.worker_id.clone(),
            project_ref: entry.project_ref.clone(),
            task_ref: entry.task_ref.clone(),
            state: entry.state,
            start: entry.start.clone(),
            end: entry.end.clone(),
            pause_intervals: entry.pause_intervals.clone(),
            description: entry.description.clone(),
            photo_refs: entry.photo_refs.clone(),
            verification_flag: entry.verification_flag,
            review_status: entry.review_status,
            verifier_ref: entry.verifier_ref.clone(),
            worked_minutes: worked,
            live_minutes: live,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPage {
    pub items: Vec<EntryView>,
    pub summary: EntrySummary,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

pub struct ListEntriesHandler<TStore>
where
    TStore: EntryStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> ListEntriesHandler<TStore>
where
    TStore: EntryStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListEntries) -> Result<EntryPage, TimerError> {
        let (from, to) = degrade_range(query.from, query.to);
        let filter = EntryFilter {
            worker_id: query.worker_id.clone(),
            created_from: from.map(start_of_day),
            created_before: to.map(day_after_start),
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned),
        };

        let filtered = self.store.query(&filter).await.map_err(store_error)?;
        let history = self
            .store
            .history(query.worker_id.as_deref())
            .await
            .map_err(store_error)?;

        let now = Utc::now();
        let summary = summarize(&filtered, &history, now.date_naive());

        let page = query.page.max(1);
        let page_size = match query.page_size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };
        let total = filtered.len() as u64;
        let total_pages = total.div_ceil(page_size);

        let offset = (page - 1).saturating_mul(page_size) as usize;
        let items = filtered
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|entry| EntryView::from_entry(entry, now))
            .collect();

        Ok(EntryPage {
            items,
            summary,
            page,
            page_size,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1 && total > 0,
        })
    }
}

/// An inverted date range is dropped instead of failing the whole request.
fn degrade_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match (from, to) {
        (Some(f), Some(t)) if f > t => {
            tracing::warn!(from = %f, to = %t, "inverted date range dropped from listing filter");
            (None, None)
        }
        range => range,
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN))
        .and_utc()
}

/// Exclusive upper bound for an inclusive `to` day: midnight of the next
/// day, so timestamps in the final sub-millisecond of the day still match.
fn day_after_start(day: NaiveDate) -> DateTime<Utc> {
    day.succ_opt()
        .map(start_of_day)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
