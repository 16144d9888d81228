// In-memory change outbox for tests and the default composition.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::shared::infrastructure::change_outbox::{ChangeOutbox, EntryChanged, OutboxError};

#[derive(Default)]
pub struct InMemoryChangeOutbox {
    queue: RwLock<Vec<EntryChanged>>,
    is_offline: bool,
}

impl InMemoryChangeOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Snapshot of everything enqueued so far, oldest first.
    pub async fn pending(&self) -> Vec<EntryChanged> {
        self.queue.read().await.clone()
    }
}

#[async_trait]
impl ChangeOutbox for InMemoryChangeOutbox {
    async fn enqueue(&self, change: EntryChanged) -> Result<(), OutboxError> {
        if self.is_offline {
            return Err(OutboxError::Backend("change outbox offline".into()));
        }
        self.queue.write().await.push(change);
        Ok(())
    }
}
