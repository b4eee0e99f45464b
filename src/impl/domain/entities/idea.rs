use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use super::{
    classification::ExpenditureFamily,
    ids::{CommunityId, FiscalYearId, IdeaId, UserId},
};

/// `Submitted → UnderReview → Approved | Rejected`, and `Approved →
/// Implemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Implemented,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub community_id: CommunityId,
    pub fiscal_year_id: FiscalYearId,
    pub submitted_by: UserId,
    pub title: String,
    pub description: String,
    pub category: Option<ExpenditureFamily>,
    pub status: IdeaStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checks a coordinator confirms before an idea may be submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceChecklist {
    pub benefits_community: bool,
    pub within_eligible_categories: bool,
    pub not_funded_elsewhere: bool,
    pub no_forest_damage: bool,
}

// --

impl IdeaStatus {
    pub fn key(&self) -> &'static str {
        match self {
            IdeaStatus::Submitted => "submitted",
            IdeaStatus::UnderReview => "under_review",
            IdeaStatus::Approved => "approved",
            IdeaStatus::Rejected => "rejected",
            IdeaStatus::Implemented => "implemented",
        }
    }
}
