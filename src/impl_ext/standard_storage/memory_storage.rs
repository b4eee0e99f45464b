use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::Mutex;

use crate::entities::{QueueStorage, SyncQueueItem};

/// Queue storage held in memory, for hosts without a writable disk and for
/// tests. Counts writes so callers can tell whether storage was touched.
#[derive(Debug, Default)]
pub struct MemoryQueueStorage {
    items: Mutex<Vec<SyncQueueItem>>,
    saves: AtomicUsize,
    clears: AtomicUsize,
}

impl MemoryQueueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Vec<SyncQueueItem> {
        self.items.lock().await.clone()
    }

    /// Number of `save` and `clear` calls so far.
    pub fn write_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst) + self.clears.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueueStorage for MemoryQueueStorage {
    async fn load(&self) -> Result<Vec<SyncQueueItem>, ServerError> {
        Ok(self.items.lock().await.clone())
    }

    async fn save(&self, items: &[SyncQueueItem]) -> Result<(), ServerError> {
        *self.items.lock().await = items.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ServerError> {
        self.items.lock().await.clear();
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
