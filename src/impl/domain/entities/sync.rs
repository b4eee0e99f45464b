use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use super::{
    disbursement::Disbursement,
    fund_registration::FundRegistration,
    idea::Idea,
    ids::{SyncItemId, UserId},
    meeting::Meeting,
    plan_activity::{BudgetItem, PlanActivity, Receipt},
    workflow::WorkflowStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Communes,
    Communities,
    FiscalYears,
    PlanActivities,
    BudgetItems,
    Receipts,
    Ideas,
    Meetings,
    FundRegistrations,
    Disbursements,
    WorkflowStatus,
}

/// A row for one table, typed by its schema. The target table is implied by
/// the variant, so a mutation can never pair a payload with the wrong table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "table", content = "row", rename_all = "snake_case")]
pub enum Record {
    PlanActivity(PlanActivity),
    BudgetItem(BudgetItem),
    Receipt(Receipt),
    Idea(Idea),
    Meeting(Meeting),
    FundRegistration(FundRegistration),
    Disbursement(Disbursement),
    WorkflowStatus(WorkflowStatus),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Insert { record: Record },
    Update { id: String, record: Record },
    Delete { table: Table, id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncQueueItem {
    pub id: SyncItemId,
    pub user_id: UserId,
    pub mutation: Mutation,
    pub synced: bool,
    pub created_at: DateTime<Utc>,
}

/// Where a submitted write ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Written to the backend.
    Written,
    /// Backend unreachable; buffered in the offline queue.
    Queued(SyncItemId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainOutcome {
    pub success: usize,
    pub failed: usize,
}

// --

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Communes => "communes",
            Table::Communities => "communities",
            Table::FiscalYears => "fiscal_years",
            Table::PlanActivities => "plan_activities",
            Table::BudgetItems => "budget_items",
            Table::Receipts => "receipts",
            Table::Ideas => "ideas",
            Table::Meetings => "meetings",
            Table::FundRegistrations => "fund_registrations",
            Table::Disbursements => "disbursements",
            Table::WorkflowStatus => "workflow_status",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Record {
    pub fn table(&self) -> Table {
        match self {
            Record::PlanActivity(_) => Table::PlanActivities,
            Record::BudgetItem(_) => Table::BudgetItems,
            Record::Receipt(_) => Table::Receipts,
            Record::Idea(_) => Table::Ideas,
            Record::Meeting(_) => Table::Meetings,
            Record::FundRegistration(_) => Table::FundRegistrations,
            Record::Disbursement(_) => Table::Disbursements,
            Record::WorkflowStatus(_) => Table::WorkflowStatus,
        }
    }

    /// The bare row, as the backend stores it.
    pub fn to_row(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Record::PlanActivity(r) => serde_json::to_value(r),
            Record::BudgetItem(r) => serde_json::to_value(r),
            Record::Receipt(r) => serde_json::to_value(r),
            Record::Idea(r) => serde_json::to_value(r),
            Record::Meeting(r) => serde_json::to_value(r),
            Record::FundRegistration(r) => serde_json::to_value(r),
            Record::Disbursement(r) => serde_json::to_value(r),
            Record::WorkflowStatus(r) => serde_json::to_value(r),
        }
    }
}

impl Mutation {
    pub fn table(&self) -> Table {
        match self {
            Mutation::Insert { record } | Mutation::Update { record, .. } => record.table(),
            Mutation::Delete { table, .. } => *table,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            Mutation::Insert { .. } => "insert",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
        }
    }
}
