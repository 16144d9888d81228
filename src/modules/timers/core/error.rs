use thiserror::Error;
use uuid::Uuid;

use crate::modules::timers::core::entry::EntryState;

/// Domain failures surfaced to callers. Messages carry enough detail for a
/// client to explain the rejection instead of showing a generic failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("a timer is already running for worker {worker_id}")]
    Conflict { worker_id: String },

    #[error("cannot {operation} an entry in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: EntryState,
    },

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("time entry {entry_id} not found")]
    NotFound { entry_id: Uuid },

    /// Store timeout or connection trouble. Safe to retry with backoff.
    #[error("store unavailable: {0}")]
    TransientStore(String),
}
