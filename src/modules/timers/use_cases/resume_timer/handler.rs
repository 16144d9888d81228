use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::timers::core::entry::TimeEntry;
use crate::modules::timers::core::error::TimerError;
use crate::modules::timers::core::transition::{self, Applied};
use crate::modules::timers::use_cases::support::{
    MAX_WRITE_ATTEMPTS, load, notify, retries_exhausted, store_error,
};
use crate::shared::infrastructure::change_outbox::{ChangeKind, ChangeOutbox};
use crate::shared::infrastructure::entry_store::{EntryStore, StoreError, WriteGuard};

pub struct ResumeTimerHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
}

impl<TStore, TOutbox> ResumeTimerHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    pub fn new(store: Arc<TStore>, outbox: Arc<TOutbox>) -> Self {
        Self { store, outbox }
    }

    /// `Paused -> Active`. The write carries the no-other-open-entry guard:
    /// resuming must not create a second concurrently running timer, so the
    /// check happens atomically with the transition inside the store.
    pub async fn handle(&self, entry_id: Uuid) -> Result<TimeEntry, TimerError> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let current = load(self.store.as_ref(), entry_id).await?;
            let now = Utc::now();

            let mut next = current.clone();
            if transition::resume(&mut next, now)? == Applied::Noop {
                return Ok(current);
            }

            match self
                .store
                .update(next, current.version, WriteGuard::NoOtherOpenForWorker)
                .await
            {
                Ok(saved) => {
                    tracing::info!(entry_id = %saved.id, worker_id = %saved.worker_id, "timer resumed");
                    notify(self.outbox.as_ref(), &saved, ChangeKind::Resumed, now).await;
                    return Ok(saved);
                }
                Err(StoreError::VersionMismatch { .. }) => continue,
                Err(err) => return Err(store_error(err)),
            }
        }
        Err(retries_exhausted())
    }
}
