use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use fractic_server_error::ServerError;
use tokio::sync::Mutex;

use crate::{
    domain::repositories::{
        fund_records_repository::FundRecordsRepository,
        sync_queue_repository::SyncQueueRepository,
    },
    entities::{DrainOutcome, Mutation, SubmissionOutcome, SyncItemId, SyncQueueItem, UserId},
};

#[async_trait]
pub trait SyncUsecase: Send + Sync {
    async fn enqueue(&self, user: &UserId, mutation: Mutation) -> Result<SyncItemId, ServerError>;

    /// Replays every unsynced item once, oldest first. Per-item failures are
    /// logged and counted, and leave the item queued for the next drain.
    async fn drain(&self) -> Result<DrainOutcome, ServerError>;

    async fn pending_count(&self) -> Result<usize, ServerError>;
}

pub(crate) struct SyncUsecaseImpl<R, Q>
where
    R: FundRecordsRepository,
    Q: SyncQueueRepository,
{
    records_repository: Arc<R>,
    queue_repository: Q,
    // Single-flight: a second drain waits, then sees only what is left.
    drain_lock: Mutex<()>,
}

impl<R, Q> SyncUsecaseImpl<R, Q>
where
    R: FundRecordsRepository,
    Q: SyncQueueRepository,
{
    pub(crate) fn new(records_repository: Arc<R>, queue_repository: Q) -> Self {
        Self {
            records_repository,
            queue_repository,
            drain_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<R, Q> SyncUsecase for SyncUsecaseImpl<R, Q>
where
    R: FundRecordsRepository,
    Q: SyncQueueRepository,
{
    async fn enqueue(&self, user: &UserId, mutation: Mutation) -> Result<SyncItemId, ServerError> {
        let id = SyncItemId::new(uuid::Uuid::new_v4().to_string());
        tracing::info!(
            item = %id,
            table = %mutation.table(),
            op = mutation.op(),
            "queued offline mutation"
        );
        self.queue_repository
            .append(SyncQueueItem {
                id: id.clone(),
                user_id: user.clone(),
                mutation,
                synced: false,
                created_at: Utc::now(),
            })
            .await?;
        Ok(id)
    }

    async fn drain(&self) -> Result<DrainOutcome, ServerError> {
        let _in_flight = self.drain_lock.lock().await;

        let snapshot = self.queue_repository.unsynced().await?;
        if snapshot.is_empty() {
            tracing::debug!("offline queue empty, nothing to drain");
            return Ok(DrainOutcome::default());
        }
        tracing::info!(items = snapshot.len(), "draining offline queue");

        let mut outcome = DrainOutcome::default();
        for item in snapshot {
            match self.records_repository.write(&item.mutation).await {
                Ok(()) => {
                    self.queue_repository.mark_synced(&item.id).await?;
                    outcome.success += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        item = %item.id,
                        table = %item.mutation.table(),
                        op = item.mutation.op(),
                        error = ?e,
                        "replay failed, item stays queued"
                    );
                    outcome.failed += 1;
                }
            }
        }

        if self.queue_repository.compact().await? {
            tracing::debug!("offline queue fully synced, storage cleared");
        }
        tracing::info!(
            success = outcome.success,
            failed = outcome.failed,
            "offline queue drained"
        );
        Ok(outcome)
    }

    async fn pending_count(&self) -> Result<usize, ServerError> {
        self.queue_repository.pending_count().await
    }
}

/// Writes through when the backend is reachable, otherwise buffers the
/// mutation in the offline queue.
pub(crate) async fn write_or_enqueue<R, S>(
    records_repository: &R,
    sync: &S,
    user: &UserId,
    mutation: Mutation,
) -> Result<SubmissionOutcome, ServerError>
where
    R: FundRecordsRepository + ?Sized,
    S: SyncUsecase + ?Sized,
{
    if records_repository.is_reachable().await {
        records_repository.write(&mutation).await?;
        Ok(SubmissionOutcome::Written)
    } else {
        Ok(SubmissionOutcome::Queued(sync.enqueue(user, mutation).await?))
    }
}
