// Shared plumbing for the mutation handlers: store-to-domain error mapping,
// entry loading, bounded retry on stale writes, and fire-and-forget change
// notifications.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::timers::core::entry::TimeEntry;
use crate::modules::timers::core::error::TimerError;
use crate::shared::infrastructure::change_outbox::{ChangeKind, ChangeOutbox, EntryChanged};
use crate::shared::infrastructure::entry_store::{EntryStore, StoreError};

/// Every mutation is a read-modify-write against a version-checked store, so
/// a concurrent writer shows up as a version mismatch. A handful of retries
/// absorbs benign interleavings; after that the caller gets a retryable
/// error.
pub(crate) const MAX_WRITE_ATTEMPTS: u32 = 3;

pub(crate) fn store_error(err: StoreError) -> TimerError {
    match err {
        StoreError::OpenEntryExists { worker_id, .. } => TimerError::Conflict { worker_id },
        StoreError::NotFound { entry_id } => TimerError::NotFound { entry_id },
        StoreError::VersionMismatch { .. } => {
            TimerError::TransientStore("concurrent update, retry".into())
        }
        StoreError::Backend(message) => TimerError::TransientStore(message),
        StoreError::Timeout(ms) => {
            TimerError::TransientStore(format!("store timed out after {ms}ms"))
        }
    }
}

pub(crate) fn retries_exhausted() -> TimerError {
    TimerError::TransientStore("gave up after repeated write conflicts".into())
}

pub(crate) async fn load<S: EntryStore>(
    store: &S,
    entry_id: Uuid,
) -> Result<TimeEntry, TimerError> {
    store
        .find(entry_id)
        .await
        .map_err(store_error)?
        .ok_or(TimerError::NotFound { entry_id })
}

/// Enqueue a change notification. The store write already committed, so a
/// failing outbox must not turn the response into an error; the drop is
/// logged for the relay to reconcile.
pub(crate) async fn notify<O: ChangeOutbox>(
    outbox: &O,
    entry: &TimeEntry,
    kind: ChangeKind,
    occurred_at: DateTime<Utc>,
) {
    let change = EntryChanged {
        entry_id: entry.id,
        worker_id: entry.worker_id.clone(),
        kind,
        entry_version: entry.version,
        occurred_at,
    };
    if let Err(err) = outbox.enqueue(change).await {
        tracing::warn!(
            entry_id = %entry.id,
            kind = ?kind,
            error = %err,
            "change notification dropped"
        );
    }
}
