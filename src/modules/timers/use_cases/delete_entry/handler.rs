use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::timers::core::entry::TimeEntry;
use crate::modules::timers::core::error::TimerError;
use crate::modules::timers::use_cases::support::{notify, store_error};
use crate::shared::infrastructure::change_outbox::{ChangeKind, ChangeOutbox};
use crate::shared::infrastructure::entry_store::EntryStore;

pub struct DeleteEntryHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
}

impl<TStore, TOutbox> DeleteEntryHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    pub fn new(store: Arc<TStore>, outbox: Arc<TOutbox>) -> Self {
        Self { store, outbox }
    }

    /// Administrative delete: unconditional, bypasses the state machine.
    /// Returns the removed entry as confirmation.
    pub async fn handle(&self, entry_id: Uuid) -> Result<TimeEntry, TimerError> {
        let removed = self.store.remove(entry_id).await.map_err(store_error)?;

        tracing::info!(entry_id = %removed.id, worker_id = %removed.worker_id, "entry deleted");
        notify(self.outbox.as_ref(), &removed, ChangeKind::Deleted, Utc::now()).await;
        Ok(removed)
    }
}
