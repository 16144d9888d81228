use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::timers::core::duration::recomputed_paused_minutes;
use crate::modules::timers::core::entry::{GeoPoint, ReviewStatus, TimeEntry};
use crate::modules::timers::core::error::TimerError;
use crate::modules::timers::core::transition::validate_temporal;
use crate::modules::timers::use_cases::support::{
    MAX_WRITE_ATTEMPTS, load, notify, retries_exhausted, store_error,
};
use crate::shared::infrastructure::change_outbox::{ChangeKind, ChangeOutbox};
use crate::shared::infrastructure::entry_store::{EntryStore, StoreError, WriteGuard};

/// Administrative correction. Absent fields stay untouched; `photo_refs`
/// are append-only. Who may call this is an external authorization concern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditEntry {
    pub entry_id: Uuid,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub start_location_label: Option<String>,
    pub start_coordinates: Option<GeoPoint>,
    pub end_time: Option<DateTime<Utc>>,
    pub end_location_label: Option<String>,
    pub end_coordinates: Option<GeoPoint>,
    pub append_photo_refs: Vec<String>,
    pub review_status: Option<ReviewStatus>,
    pub verification_flag: Option<bool>,
    pub verifier_ref: Option<String>,
}

pub struct EditEntryHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    store: Arc<TStore>,
    outbox: Arc<TOutbox>,
}

impl<TStore, TOutbox> EditEntryHandler<TStore, TOutbox>
where
    TStore: EntryStore + 'static,
    TOutbox: ChangeOutbox + 'static,
{
    pub fn new(store: Arc<TStore>, outbox: Arc<TOutbox>) -> Self {
        Self { store, outbox }
    }

    /// Applies a corrective edit outside the transition guard, then runs the
    /// temporal validation so an edit can never leave `end` before `start`
    /// or a resume before its pause.
    pub async fn handle(&self, command: EditEntry) -> Result<TimeEntry, TimerError> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let current = load(self.store.as_ref(), command.entry_id).await?;
            let now = Utc::now();

            let next = apply_edit(&current, &command, now)?;
            if next == current {
                return Ok(current);
            }

            match self
                .store
                .update(next, current.version, WriteGuard::None)
                .await
            {
                Ok(saved) => {
                    tracing::info!(entry_id = %saved.id, "entry edited");
                    notify(self.outbox.as_ref(), &saved, ChangeKind::Edited, now).await;
                    return Ok(saved);
                }
                Err(StoreError::VersionMismatch { .. }) => continue,
                Err(err) => return Err(store_error(err)),
            }
        }
        Err(retries_exhausted())
    }
}

fn apply_edit(
    current: &TimeEntry,
    command: &EditEntry,
    now: DateTime<Utc>,
) -> Result<TimeEntry, TimerError> {
    let mut next = current.clone();

    if let Some(description) = &command.description {
        next.description = description.clone();
    }
    if let Some(start_time) = command.start_time {
        next.start.time = start_time;
    }
    if let Some(label) = &command.start_location_label {
        next.start.location_label = Some(label.clone());
    }
    if let Some(coordinates) = command.start_coordinates {
        next.start.coordinates = Some(coordinates);
    }

    let edits_end = command.end_time.is_some()
        || command.end_location_label.is_some()
        || command.end_coordinates.is_some();
    if edits_end {
        let end = next.end.as_mut().ok_or(TimerError::Validation {
            field: "end",
            message: "entry has no end yet; stop it before editing end fields".into(),
        })?;
        if let Some(end_time) = command.end_time {
            end.time = end_time;
        }
        if let Some(label) = &command.end_location_label {
            end.location_label = Some(label.clone());
        }
        if let Some(coordinates) = command.end_coordinates {
            end.coordinates = Some(coordinates);
        }
    }

    next.photo_refs
        .extend(command.append_photo_refs.iter().cloned());
    if let Some(review_status) = command.review_status {
        next.review_status = review_status;
    }
    if let Some(verification_flag) = command.verification_flag {
        next.verification_flag = verification_flag;
    }
    if let Some(verifier_ref) = &command.verifier_ref {
        next.verifier_ref = Some(verifier_ref.clone());
    }

    validate_temporal(&next)?;
    next.accumulated_paused_minutes = recomputed_paused_minutes(&next);
    if next != *current {
        next.updated_at = now;
    }
    Ok(next)
}

#[cfg(test)]
mod edit_entry_handler_tests {
    use super::*;
    use crate::shared::infrastructure::change_outbox::in_memory::InMemoryChangeOutbox;
    use crate::shared::infrastructure::entry_store::in_memory::InMemoryEntryStore;
    use crate::test_support::fixtures::{ContendedEntryStore, closed_entry, ts};
    use rstest::rstest;

    type Handler = EditEntryHandler<InMemoryEntryStore, InMemoryChangeOutbox>;

    async fn make_handler_with_closed_entry() -> (Handler, TimeEntry, Arc<InMemoryChangeOutbox>) {
        let store = Arc::new(InMemoryEntryStore::new());
        let outbox = Arc::new(InMemoryChangeOutbox::new());
        let entry = store
            .insert_new(closed_entry(
                "worker-0001",
                ts("2026-03-02T08:00:00Z"),
                ts("2026-03-02T16:00:00Z"),
            ))
            .await
            .unwrap();
        let handler = EditEntryHandler::new(store, outbox.clone());
        (handler, entry, outbox)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_apply_administrative_fields_and_notify() {
        let (handler, entry, outbox) = make_handler_with_closed_entry().await;

        let edited = handler
            .handle(EditEntry {
                entry_id: entry.id,
                description: Some("Corrected description".into()),
                review_status: Some(ReviewStatus::Approved),
                verification_flag: Some(true),
                verifier_ref: Some("supervisor-0003".into()),
                append_photo_refs: vec!["media://p-9".into()],
                ..EditEntry::default()
            })
            .await
            .unwrap();

        assert_eq!(edited.description, "Corrected description");
        assert_eq!(edited.review_status, ReviewStatus::Approved);
        assert!(edited.verification_flag);
        assert_eq!(edited.verifier_ref.as_deref(), Some("supervisor-0003"));
        assert!(edited.photo_refs.contains(&"media://p-9".to_string()));
        assert_eq!(outbox.pending().await.last().unwrap().kind, ChangeKind::Edited);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_edit_that_puts_the_end_before_the_start() {
        let (handler, entry, _) = make_handler_with_closed_entry().await;

        let result = handler
            .handle(EditEntry {
                entry_id: entry.id,
                end_time: Some(ts("2026-03-02T07:00:00Z")),
                ..EditEntry::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(TimerError::Validation { field: "end.time", .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_end_edits_on_an_entry_that_is_still_open() {
        let store = Arc::new(InMemoryEntryStore::new());
        let outbox = Arc::new(InMemoryChangeOutbox::new());
        let open = store
            .insert_new(crate::test_support::fixtures::entry_started_at(
                "worker-0001",
                ts("2026-03-02T08:00:00Z"),
            ))
            .await
            .unwrap();
        let handler = EditEntryHandler::new(store, outbox);

        let result = handler
            .handle(EditEntry {
                entry_id: open.id,
                end_time: Some(ts("2026-03-02T09:00:00Z")),
                ..EditEntry::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(TimerError::Validation { field: "end", .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_allow_corrective_start_time_edits_within_bounds() {
        let (handler, entry, _) = make_handler_with_closed_entry().await;

        let edited = handler
            .handle(EditEntry {
                entry_id: entry.id,
                start_time: Some(ts("2026-03-02T07:30:00Z")),
                ..EditEntry::default()
            })
            .await
            .unwrap();

        assert_eq!(edited.start.time, ts("2026-03-02T07:30:00Z"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_a_transient_error_after_repeated_stale_writes() {
        let store = Arc::new(ContendedEntryStore::with_stale_updates(MAX_WRITE_ATTEMPTS));
        let outbox = Arc::new(InMemoryChangeOutbox::new());
        let entry = store
            .insert_new(closed_entry(
                "worker-0001",
                ts("2026-03-02T08:00:00Z"),
                ts("2026-03-02T16:00:00Z"),
            ))
            .await
            .unwrap();
        let handler = EditEntryHandler::new(store.clone(), outbox.clone());

        let result = handler
            .handle(EditEntry {
                entry_id: entry.id,
                description: Some("Corrected".into()),
                ..EditEntry::default()
            })
            .await;

        assert!(matches!(result, Err(TimerError::TransientStore(_))));
        assert!(outbox.pending().await.is_empty());
        // the stored entry kept its original description
        let stored = store.find(entry.id).await.unwrap().unwrap();
        assert_eq!(stored.description, entry.description);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_the_entry_unchanged_for_an_empty_edit() {
        let (handler, entry, outbox) = make_handler_with_closed_entry().await;

        let edited = handler
            .handle(EditEntry {
                entry_id: entry.id,
                ..EditEntry::default()
            })
            .await
            .unwrap();

        assert_eq!(edited, entry);
        assert!(outbox.pending().await.is_empty());
    }
}
