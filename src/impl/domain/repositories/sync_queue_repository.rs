use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{SyncItemId, SyncQueueItem};

/// Read-modify-write access to the persisted queue. Every operation runs
/// under one storage lock, so appends and status updates never interleave.
#[async_trait]
pub trait SyncQueueRepository: Send + Sync {
    async fn append(&self, item: SyncQueueItem) -> Result<(), ServerError>;

    /// Unsynced items in enqueue order.
    async fn unsynced(&self) -> Result<Vec<SyncQueueItem>, ServerError>;

    async fn mark_synced(&self, id: &SyncItemId) -> Result<(), ServerError>;

    /// Clears storage if every item is synced. Returns whether it did.
    async fn compact(&self) -> Result<bool, ServerError>;

    async fn pending_count(&self) -> Result<usize, ServerError>;
}
