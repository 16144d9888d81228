use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::timers::core::entry::{Checkpoint, TimeEntry};
use crate::modules::timers::core::error::TimerError;
use crate::modules::timers::core::transition::{self, Applied};
use crate::modules::timers::use_cases::support::{
    MAX_WRITE_ATTEMPTS, load, notify, retries_exhausted, store_error,
};
use crate::shared::infrastructure::change_outbox::{ChangeKind, ChangeOutbox};
use crate::shared::infrastructure::entry_store::{EntryStore, StoreError, WriteGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct StopTimer {
    pub entry_id: Uuid,
    pub end: Checkpoint,
}

pub struct StopTimerHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
}

impl<TStore, TOutbox> StopTimerHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    pub fn new(store: Arc<TStore>, outbox: Arc<TOutbox>) -> Self {
        Self { store, outbox }
    }

    /// `Active | Paused -> Closed`. A stop on a paused entry closes the open
    /// pause interval at the end time first, so the trailing span stays
    /// paused rather than worked.
    pub async fn handle(&self, command: StopTimer) -> Result<TimeEntry, TimerError> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let current = load(self.store.as_ref(), command.entry_id).await?;
            let now = Utc::now();

            let mut next = current.clone();
            if transition::stop(&mut next, command.end.clone(), now)? == Applied::Noop {
                return Ok(current);
            }

            match self
                .store
                .update(next, current.version, WriteGuard::None)
                .await
            {
                Ok(saved) => {
                    tracing::info!(entry_id = %saved.id, worker_id = %saved.worker_id, "timer stopped");
                    notify(self.outbox.as_ref(), &saved, ChangeKind::Stopped, now).await;
                    return Ok(saved);
                }
                Err(StoreError::VersionMismatch { .. }) => continue,
                Err(err) => return Err(store_error(err)),
            }
        }
        Err(retries_exhausted())
    }
}
