use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::Mutex;

use crate::{
    domain::repositories::sync_queue_repository::SyncQueueRepository,
    entities::{QueueStorage, SyncItemId, SyncQueueItem},
};

pub(crate) struct SyncQueueRepositoryImpl<S: QueueStorage> {
    storage: S,
    // Held for the duration of each load-modify-save cycle.
    storage_lock: Mutex<()>,
}

impl<S: QueueStorage> SyncQueueRepositoryImpl<S> {
    pub(crate) fn new(storage: S) -> Self {
        Self {
            storage,
            storage_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<S: QueueStorage> SyncQueueRepository for SyncQueueRepositoryImpl<S> {
    async fn append(&self, item: SyncQueueItem) -> Result<(), ServerError> {
        let _guard = self.storage_lock.lock().await;
        let mut items = self.storage.load().await?;
        items.push(item);
        self.storage.save(&items).await
    }

    async fn unsynced(&self) -> Result<Vec<SyncQueueItem>, ServerError> {
        let _guard = self.storage_lock.lock().await;
        Ok(self
            .storage
            .load()
            .await?
            .into_iter()
            .filter(|item| !item.synced)
            .collect())
    }

    async fn mark_synced(&self, id: &SyncItemId) -> Result<(), ServerError> {
        let _guard = self.storage_lock.lock().await;
        let mut items = self.storage.load().await?;
        let Some(item) = items.iter_mut().find(|item| &item.id == id) else {
            return Ok(());
        };
        item.synced = true;
        self.storage.save(&items).await
    }

    async fn compact(&self) -> Result<bool, ServerError> {
        let _guard = self.storage_lock.lock().await;
        let items = self.storage.load().await?;
        if items.iter().any(|item| !item.synced) {
            return Ok(false);
        }
        self.storage.clear().await?;
        Ok(true)
    }

    async fn pending_count(&self) -> Result<usize, ServerError> {
        let _guard = self.storage_lock.lock().await;
        Ok(self
            .storage
            .load()
            .await?
            .iter()
            .filter(|item| !item.synced)
            .count())
    }
}
