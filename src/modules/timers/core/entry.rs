// TimeEntry is the canonical record of one work session.
//
// Boundaries
// - This file must not perform input or output.
// - Keep it framework-free.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a work session. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Active,
    Paused,
    Closed,
}

impl EntryState {
    /// An entry counts as an open timer while it is not closed.
    pub fn is_open(self) -> bool {
        !matches!(self, EntryState::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Where and when a session started or ended, with any photos taken there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub time: DateTime<Utc>,
    pub location_label: Option<String>,
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub photo_refs: Vec<String>,
}

/// A span excluded from worked time. `resumed_at` is absent only for the
/// last interval of a currently paused entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PauseInterval {
    pub paused_at: DateTime<Utc>,
    pub resumed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Active,
    Approved,
    Flagged,
    Archived,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub worker_id: String,
    pub project_ref: Option<String>,
    pub task_ref: Option<String>,
    pub state: EntryState,
    pub start: Checkpoint,
    pub end: Option<Checkpoint>,
    pub pause_intervals: Vec<PauseInterval>,
    /// Running total of completed pause intervals. A cache: aggregation
    /// recomputes from `pause_intervals` instead of trusting this.
    pub accumulated_paused_minutes: i64,
    pub description: String,
    /// Append-only union of start, end and corrective-edit photo refs.
    pub photo_refs: Vec<String>,
    pub verification_flag: bool,
    pub review_status: ReviewStatus,
    pub verifier_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version, managed by the store.
    pub version: u64,
}

impl TimeEntry {
    /// A fresh `Active` entry as created by the start operation.
    pub fn started(
        id: Uuid,
        worker_id: String,
        project_ref: Option<String>,
        task_ref: Option<String>,
        description: String,
        start: Checkpoint,
        now: DateTime<Utc>,
    ) -> Self {
        let photo_refs = start.photo_refs.clone();
        Self {
            id,
            worker_id,
            project_ref,
            task_ref,
            state: EntryState::Active,
            start,
            end: None,
            pause_intervals: Vec::new(),
            accumulated_paused_minutes: 0,
            description,
            photo_refs,
            verification_flag: false,
            review_status: ReviewStatus::Active,
            verifier_ref: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The calendar day (UTC) the session started on.
    pub fn start_day(&self) -> NaiveDate {
        self.start.time.date_naive()
    }

    /// The trailing interval with no `resumed_at` yet, if any.
    pub fn open_pause(&self) -> Option<&PauseInterval> {
        self.pause_intervals
            .last()
            .filter(|interval| interval.resumed_at.is_none())
    }
}
