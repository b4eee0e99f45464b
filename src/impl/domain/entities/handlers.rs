use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};

use super::{
    ids::UserId,
    sync::{SyncQueueItem, Table},
};

// Users and permissions.
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    CommuneOfficer,
    CommunityCoordinator,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// Write actions gated by an `AuthProvider`. Report reads are open to every
/// role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RegisterFunds,
    SubmitIdea,
    ReviewIdea,
    ManageMeetings,
    CreatePlan,
    ApprovePlan,
    UploadReceipt,
    VerifyReceipt,
    RecordDisbursement,
    UpdateWorkflow,
}

pub trait AuthProvider: Send + Sync {
    fn has_permission(&self, user: &User, action: Action) -> bool;
}

// Backing store.
// ---

/// Equality filters and an optional ordering, applied to the rows of one
/// table. Mirrors what a hosted relational client offers for simple reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    pub equals: Vec<(String, String)>,
    pub order_by: Option<(String, SortDirection)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Remote store holding all persisted rows. Rows travel as JSON objects;
/// parent rows of `PlanActivities` and `Meetings` embed their children
/// (`budget_items`, `receipts`, `record`).
///
/// Rows are addressed by their `id` column, except `WorkflowStatus` rows,
/// which are addressed by `WorkflowStatus::row_key()`.
#[async_trait]
pub trait FundBackend: Send + Sync {
    async fn select(
        &self,
        table: Table,
        filter: &RowFilter,
    ) -> Result<Vec<serde_json::Value>, ServerError>;

    async fn insert(&self, table: Table, row: serde_json::Value) -> Result<(), ServerError>;

    async fn update(
        &self,
        table: Table,
        id: &str,
        row: serde_json::Value,
    ) -> Result<(), ServerError>;

    async fn delete(&self, table: Table, id: &str) -> Result<(), ServerError>;

    /// Whether writes can currently reach the store. Writes attempted while
    /// unreachable are buffered in the offline queue instead.
    async fn is_reachable(&self) -> bool {
        true
    }
}

// Local persistence.
// ---

/// Device-local list backing the offline mutation queue.
#[async_trait]
pub trait QueueStorage: Send + Sync {
    async fn load(&self) -> Result<Vec<SyncQueueItem>, ServerError>;
    async fn save(&self, items: &[SyncQueueItem]) -> Result<(), ServerError>;
    async fn clear(&self) -> Result<(), ServerError>;
}

// --

/// Lets a host keep a handle on the storage it hands over.
#[async_trait]
impl<T: QueueStorage> QueueStorage for Arc<T> {
    async fn load(&self) -> Result<Vec<SyncQueueItem>, ServerError> {
        self.as_ref().load().await
    }

    async fn save(&self, items: &[SyncQueueItem]) -> Result<(), ServerError> {
        self.as_ref().save(items).await
    }

    async fn clear(&self) -> Result<(), ServerError> {
        self.as_ref().clear().await
    }
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.equals.push((column.into(), value.to_string()));
        self
    }

    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some((column.into(), SortDirection::Descending));
        self
    }

    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some((column.into(), SortDirection::Ascending));
        self
    }
}

impl Role {
    pub fn key(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::CommuneOfficer => "commune_officer",
            Role::CommunityCoordinator => "community_coordinator",
            Role::Member => "member",
        }
    }
}

impl Action {
    pub fn describe(&self) -> &'static str {
        match self {
            Action::RegisterFunds => "register funds",
            Action::SubmitIdea => "submit ideas",
            Action::ReviewIdea => "review ideas",
            Action::ManageMeetings => "manage meetings",
            Action::CreatePlan => "create plans",
            Action::ApprovePlan => "approve plans",
            Action::UploadReceipt => "upload receipts",
            Action::VerifyReceipt => "verify receipts",
            Action::RecordDisbursement => "record disbursements",
            Action::UpdateWorkflow => "update workflow status",
        }
    }
}
