// Shared builders for unit tests. Timestamps are fixed so duration and
// calendar assertions stay deterministic.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::timers::core::entry::{Checkpoint, EntryState, TimeEntry};
use crate::shared::infrastructure::entry_store::in_memory::InMemoryEntryStore;
use crate::shared::infrastructure::entry_store::{
    EntryFilter, EntryStore, StoreError, WriteGuard,
};

pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("fixture timestamp must parse")
}

pub fn checkpoint_at(time: DateTime<Utc>) -> Checkpoint {
    Checkpoint {
        time,
        location_label: Some("Barn 3".into()),
        coordinates: None,
        photo_refs: Vec::new(),
    }
}

pub fn entry_started_at(worker_id: &str, start: DateTime<Utc>) -> TimeEntry {
    TimeEntry::started(
        Uuid::now_v7(),
        worker_id.into(),
        Some("project-0007".into()),
        None,
        "Fence repair".into(),
        checkpoint_at(start),
        start,
    )
}

pub fn closed_entry(worker_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeEntry {
    let mut entry = entry_started_at(worker_id, start);
    entry.end = Some(checkpoint_at(end));
    entry.state = EntryState::Closed;
    entry.updated_at = end;
    entry
}

/// Store decorator that reports the first `stale_updates` version-checked
/// writes as stale and delegates everything else. Makes the retry loop in
/// the mutation handlers deterministic to test: no timing, no real race.
pub struct ContendedEntryStore {
    inner: InMemoryEntryStore,
    stale_updates_left: AtomicU32,
}

impl ContendedEntryStore {
    pub fn with_stale_updates(stale_updates: u32) -> Self {
        Self {
            inner: InMemoryEntryStore::new(),
            stale_updates_left: AtomicU32::new(stale_updates),
        }
    }
}

#[async_trait]
impl EntryStore for ContendedEntryStore {
    async fn insert_new(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        self.inner.insert_new(entry).await
    }

    async fn find(&self, entry_id: Uuid) -> Result<Option<TimeEntry>, StoreError> {
        self.inner.find(entry_id).await
    }

    async fn update(
        &self,
        entry: TimeEntry,
        expected_version: u64,
        guard: WriteGuard,
    ) -> Result<TimeEntry, StoreError> {
        let went_stale = self
            .stale_updates_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                left.checked_sub(1)
            })
            .is_ok();
        if went_stale {
            return Err(StoreError::VersionMismatch {
                entry_id: entry.id,
                expected: expected_version,
                actual: expected_version + 1,
            });
        }
        self.inner.update(entry, expected_version, guard).await
    }

    async fn remove(&self, entry_id: Uuid) -> Result<TimeEntry, StoreError> {
        self.inner.remove(entry_id).await
    }

    async fn query(&self, filter: &EntryFilter) -> Result<Vec<TimeEntry>, StoreError> {
        self.inner.query(filter).await
    }

    async fn history(&self, worker_id: Option<&str>) -> Result<Vec<TimeEntry>, StoreError> {
        self.inner.history(worker_id).await
    }
}
