// In-memory entry store.
//
// Purpose
// - Exercise the state machine and the listing façade without a database.
// - Mirror the fault modes of a real backend: offline toggle, injected
//   write delay, bounded operation timeout.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::timers::core::entry::TimeEntry;
use crate::shared::infrastructure::entry_store::{
    EntryFilter, EntryStore, StoreError, WriteGuard,
};

const DEFAULT_OP_TIMEOUT_MS: u64 = 5_000;

pub struct InMemoryEntryStore {
    rows: RwLock<HashMap<Uuid, TimeEntry>>,
    is_offline: bool,
    write_delay_ms: u64,
    op_timeout_ms: u64,
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            is_offline: false,
            write_delay_ms: 0,
            op_timeout_ms: DEFAULT_OP_TIMEOUT_MS,
        }
    }

    pub fn with_op_timeout_ms(op_timeout_ms: u64) -> Self {
        Self {
            op_timeout_ms,
            ..Self::new()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Widens the race window between concurrent writers in tests.
    pub fn set_write_delay_ms(&mut self, delay_ms: u64) {
        self.write_delay_ms = delay_ms;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("entry store offline".into()));
        }
        Ok(())
    }

    async fn bounded<T>(
        &self,
        work: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(Duration::from_millis(self.op_timeout_ms), work).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.op_timeout_ms)),
        }
    }

    async fn write_delay(&self) {
        if self.write_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.write_delay_ms)).await;
        }
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn insert_new(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        self.check_online()?;
        self.bounded(async {
            self.write_delay().await;
            let mut rows = self.rows.write().await;
            if let Some(open) = rows
                .values()
                .find(|existing| existing.worker_id == entry.worker_id && existing.is_open())
            {
                return Err(StoreError::OpenEntryExists {
                    worker_id: entry.worker_id.clone(),
                    entry_id: open.id,
                });
            }
            let mut entry = entry;
            entry.version = 1;
            rows.insert(entry.id, entry.clone());
            Ok(entry)
        })
        .await
    }

    async fn find(&self, entry_id: Uuid) -> Result<Option<TimeEntry>, StoreError> {
        self.check_online()?;
        self.bounded(async { Ok(self.rows.read().await.get(&entry_id).cloned()) })
            .await
    }

    async fn update(
        &self,
        entry: TimeEntry,
        expected_version: u64,
        write_guard: WriteGuard,
    ) -> Result<TimeEntry, StoreError> {
        self.check_online()?;
        self.bounded(async {
            self.write_delay().await;
            let mut rows = self.rows.write().await;
            let current = rows.get(&entry.id).ok_or(StoreError::NotFound {
                entry_id: entry.id,
            })?;
            if current.version != expected_version {
                return Err(StoreError::VersionMismatch {
                    entry_id: entry.id,
                    expected: expected_version,
                    actual: current.version,
                });
            }
            if write_guard == WriteGuard::NoOtherOpenForWorker {
                if let Some(open) = rows.values().find(|existing| {
                    existing.id != entry.id
                        && existing.worker_id == entry.worker_id
                        && existing.is_open()
                }) {
                    return Err(StoreError::OpenEntryExists {
                        worker_id: entry.worker_id.clone(),
                        entry_id: open.id,
                    });
                }
            }
            let mut entry = entry;
            entry.version = expected_version + 1;
            rows.insert(entry.id, entry.clone());
            Ok(entry)
        })
        .await
    }

    async fn remove(&self, entry_id: Uuid) -> Result<TimeEntry, StoreError> {
        self.check_online()?;
        self.bounded(async {
            self.rows
                .write()
                .await
                .remove(&entry_id)
                .ok_or(StoreError::NotFound { entry_id })
        })
        .await
    }

    async fn query(&self, filter: &EntryFilter) -> Result<Vec<TimeEntry>, StoreError> {
        self.check_online()?;
        self.bounded(async {
            let rows = self.rows.read().await;
            let needle = filter.search.as_ref().map(|s| s.to_lowercase());
            let mut items: Vec<TimeEntry> = rows
                .values()
                .filter(|entry| {
                    filter
                        .worker_id
                        .as_ref()
                        .is_none_or(|worker| &entry.worker_id == worker)
                })
                .filter(|entry| {
                    filter
                        .created_from
                        .is_none_or(|from| entry.created_at >= from)
                })
                .filter(|entry| {
                    filter
                        .created_before
                        .is_none_or(|before| entry.created_at < before)
                })
                .filter(|entry| {
                    needle
                        .as_ref()
                        .is_none_or(|text| entry.description.to_lowercase().contains(text))
                })
                .cloned()
                .collect();
            items.sort_by_key(|entry| (entry.created_at, entry.id));
            Ok(items)
        })
        .await
    }

    async fn history(&self, worker_id: Option<&str>) -> Result<Vec<TimeEntry>, StoreError> {
        self.check_online()?;
        self.bounded(async {
            let rows = self.rows.read().await;
            let mut items: Vec<TimeEntry> = rows
                .values()
                .filter(|entry| worker_id.is_none_or(|worker| entry.worker_id == worker))
                .cloned()
                .collect();
            items.sort_by_key(|entry| (entry.start.time, entry.id));
            Ok(items)
        })
        .await
    }
}
