// Port for the timer record store, the only shared mutable resource.
//
// The two invariant-bearing writes are atomic at this boundary:
// - `insert_new` is a conditional insert that fails while the worker still
//   has an open entry (check-then-create under one lock).
// - `update` is version-checked, and `WriteGuard::NoOtherOpenForWorker`
//   evaluates the single-open-timer invariant under the same lock a resume
//   write takes.

pub mod in_memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::modules::timers::core::entry::TimeEntry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("worker {worker_id} already has an open entry {entry_id}")]
    OpenEntryExists { worker_id: String, entry_id: Uuid },

    #[error("entry {entry_id} not found")]
    NotFound { entry_id: Uuid },

    #[error("stale write for entry {entry_id}: expected version {expected}, actual {actual}")]
    VersionMismatch {
        entry_id: Uuid,
        expected: u64,
        actual: u64,
    },

    #[error("store backend unavailable: {0}")]
    Backend(String),

    #[error("store operation timed out after {0}ms")]
    Timeout(u64),
}

/// Filter for the listing façade. All bounds are optional and apply to
/// `created_at`; `created_from` is inclusive, `created_before` exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub worker_id: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// Case-insensitive substring match against the description.
    pub search: Option<String>,
}

/// Extra invariant check evaluated atomically with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteGuard {
    None,
    /// Reject the write while another open entry exists for the same worker.
    /// Used by resume so it cannot create a second running timer.
    NoOtherOpenForWorker,
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Conditional insert: fails with `OpenEntryExists` if the worker has an
    /// entry in `Active` or `Paused`. The stored entry gets version 1.
    async fn insert_new(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError>;

    async fn find(&self, entry_id: Uuid) -> Result<Option<TimeEntry>, StoreError>;

    /// Version-checked replace; bumps the version on success.
    async fn update(
        &self,
        entry: TimeEntry,
        expected_version: u64,
        guard: WriteGuard,
    ) -> Result<TimeEntry, StoreError>;

    /// Unconditional administrative delete; returns the removed entry.
    async fn remove(&self, entry_id: Uuid) -> Result<TimeEntry, StoreError>;

    /// Unpaginated filter scan, ordered by `created_at` ascending.
    async fn query(&self, filter: &EntryFilter) -> Result<Vec<TimeEntry>, StoreError>;

    /// Full unfiltered history for leave counting: one worker's entries, or
    /// every entry in the store when `worker_id` is `None`.
    async fn history(&self, worker_id: Option<&str>) -> Result<Vec<TimeEntry>, StoreError>;
}
