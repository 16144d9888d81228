use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::timers::core::entry::{Checkpoint, TimeEntry};
use crate::modules::timers::core::error::TimerError;
use crate::modules::timers::use_cases::support::{notify, store_error};
use crate::shared::infrastructure::change_outbox::{ChangeKind, ChangeOutbox};
use crate::shared::infrastructure::entry_store::EntryStore;

#[derive(Debug, Clone, PartialEq)]
pub struct StartTimer {
    pub worker_id: String,
    pub project_ref: Option<String>,
    pub task_ref: Option<String>,
    pub description: String,
    pub start: Checkpoint,
}

pub struct StartTimerHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
}

impl<TStore, TOutbox> StartTimerHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    pub fn new(store: Arc<TStore>, outbox: Arc<TOutbox>) -> Self {
        Self { store, outbox }
    }

    /// Creates a new `Active` entry. The store's conditional insert carries
    /// the single-open-timer check, so two concurrent starts for the same
    /// worker cannot both pass the precondition.
    pub async fn handle(&self, command: StartTimer) -> Result<TimeEntry, TimerError> {
        if command.worker_id.trim().is_empty() {
            return Err(TimerError::Validation {
                field: "worker_id",
                message: "must not be empty".into(),
            });
        }

        let now = Utc::now();
        let entry = TimeEntry::started(
            Uuid::now_v7(),
            command.worker_id,
            command.project_ref,
            command.task_ref,
            command.description,
            command.start,
            now,
        );
        let saved = self.store.insert_new(entry).await.map_err(store_error)?;

        tracing::info!(entry_id = %saved.id, worker_id = %saved.worker_id, "timer started");
        notify(self.outbox.as_ref(), &saved, ChangeKind::Started, now).await;
        Ok(saved)
    }
}
