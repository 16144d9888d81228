// Port for state-change notifications to downstream subsystems.
//
// Delivery is at-least-once: a consumer draining the queue may observe a
// change twice, never a rolled-back one, because handlers enqueue only
// after the store write committed.

pub mod in_memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Started,
    Paused,
    Resumed,
    Stopped,
    Edited,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryChanged {
    pub entry_id: Uuid,
    pub worker_id: String,
    pub kind: ChangeKind,
    pub entry_version: u64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutboxError {
    #[error("outbox backend unavailable: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ChangeOutbox: Send + Sync {
    async fn enqueue(&self, change: EntryChanged) -> Result<(), OutboxError>;
}
