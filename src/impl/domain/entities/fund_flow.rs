use std::collections::BTreeMap;

use serde_derive::Serialize;

use super::{
    classification::{CostType, ExpenditureFamily, ProgramCategory},
    ids::{ActivityId, BudgetItemId, CommuneId, CommunityId},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IncomeBySource {
    pub forest_owner_support: f64,
    pub community_contribution: f64,
    pub other_funds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommuneRollup {
    pub commune_id: CommuneId,
    pub commune_name: String,
    pub budget: f64,
    /// After clamping to the budget (see aggregator).
    pub disbursed: f64,
    /// After clamping to the disbursed amount.
    pub spent: f64,
    pub disbursement_rate: f64,
    pub spending_rate: f64,
    /// Whether either clamp fired; the underlying data is inconsistent.
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundFlowSummary {
    pub income_by_source: IncomeBySource,
    pub total_income: f64,
    pub expenditure_by_family: BTreeMap<ExpenditureFamily, f64>,
    pub expenditure_by_program: BTreeMap<ProgramCategory, f64>,
    pub expenditure_by_cost_type: BTreeMap<CostType, f64>,
    pub total_expenditure: f64,
    /// Spent items backed by at least one verified receipt.
    pub verified_expenditure: f64,
    /// `total_income - total_expenditure`; negative when overspent.
    pub balance: f64,
    pub commune_rollups: Vec<CommuneRollup>,
}

/// One spent budget item, as listed when drilling into a family or program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpentItemDetail {
    pub budget_item_id: BudgetItemId,
    pub item_name: String,
    pub amount: f64,
    pub activity_id: ActivityId,
    pub activity_name: String,
    pub community_id: CommunityId,
    pub community_name: String,
    pub family: ExpenditureFamily,
    pub program: Option<ProgramCategory>,
}

// --

impl IncomeBySource {
    pub fn total(&self) -> f64 {
        self.forest_owner_support + self.community_contribution + self.other_funds
    }
}

impl FundFlowSummary {
    /// Funds not yet spent. Identical to `balance`; kept as a separate name
    /// for report wording.
    pub fn unallocated(&self) -> f64 {
        self.balance
    }
}
