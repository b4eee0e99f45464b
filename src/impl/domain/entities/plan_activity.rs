use chrono::{DateTime, NaiveDate, Utc};
use serde_derive::{Deserialize, Serialize};

use super::{
    classification::{ExpenditureFamily, ProgramCategory},
    handlers::Role,
    ids::{ActivityId, BudgetItemId, CommunityId, FiscalYearId, ReceiptId, UserId},
};

/// Lifecycle of a plan activity. Advancement order is given by `stage()`;
/// `Cancelled` sits outside of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Draft,
    Submitted,
    Approved,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationMethod {
    Community,
    Contractor,
    CoImplemented,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanActivity {
    pub id: ActivityId,
    pub community_id: CommunityId,
    pub fiscal_year_id: FiscalYearId,
    pub name: String,
    /// Explicit family; `None` means the classifier decides.
    pub family: Option<ExpenditureFamily>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub forest_owner_support: f64,
    pub community_contribution: f64,
    pub other_funds: f64,
    pub implementation_method: ImplementationMethod,
    pub status: ActivityStatus,
    pub notes: Option<String>,
    pub budget_items: Vec<BudgetItem>,
    pub receipts: Vec<Receipt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: BudgetItemId,
    pub activity_id: ActivityId,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_cost: f64,
    /// Always `quantity * unit_cost`; set by the constructor.
    pub amount: f64,
    pub family: Option<ExpenditureFamily>,
    pub program: Option<ProgramCategory>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Jpg,
    Png,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub activity_id: ActivityId,
    pub budget_item_id: Option<BudgetItemId>,
    pub file_ref: String,
    pub file_type: FileType,
    pub uploaded_by: Role,
    pub uploaded_at: DateTime<Utc>,
    pub verified: bool,
    pub verified_by: Option<UserId>,
    pub verified_at: Option<DateTime<Utc>>,
}

// --

impl PlanActivity {
    /// Sum of the three funding components.
    pub fn funding_total(&self) -> f64 {
        self.forest_owner_support + self.community_contribution + self.other_funds
    }

    /// Sum of budget item amounts when the plan was itemised, otherwise the
    /// funding components.
    pub fn total_budget(&self) -> f64 {
        if self.budget_items.is_empty() {
            self.funding_total()
        } else {
            self.budget_items.iter().map(|i| i.amount).sum()
        }
    }
}

impl ActivityStatus {
    /// Position in the forward lifecycle; `None` for `Cancelled`.
    pub fn stage(&self) -> Option<u8> {
        match self {
            ActivityStatus::Draft => Some(0),
            ActivityStatus::Submitted => Some(1),
            ActivityStatus::Approved => Some(2),
            ActivityStatus::Ongoing => Some(3),
            ActivityStatus::Completed => Some(4),
            ActivityStatus::Cancelled => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ActivityStatus::Draft => "draft",
            ActivityStatus::Submitted => "submitted",
            ActivityStatus::Approved => "approved",
            ActivityStatus::Ongoing => "ongoing",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
