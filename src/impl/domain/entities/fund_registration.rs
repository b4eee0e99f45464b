use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use super::ids::{ActivityId, CommunityId, FiscalYearId, FundRegistrationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundSource {
    /// Emission-reduction results payment; always ERPA.
    ErpaPayment,
    /// Payment for forest environmental services.
    PfesPayment,
    StateBudget,
    CommunityDonation,
    CarryOver,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundPurpose {
    ForestProtection,
    LivelihoodDevelopment,
    CommunityInfrastructure,
    Operations,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationType {
    Cash,
    InKind,
    Labor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Recorded,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRegistration {
    pub id: FundRegistrationId,
    pub community_id: CommunityId,
    pub fiscal_year_id: FiscalYearId,
    pub fund_source: FundSource,
    pub fund_purpose: FundPurpose,
    pub amount_received: f64,
    pub payment_date: NaiveDate,
    pub payment_reference: Option<String>,
    pub payer: Option<String>,
    // Conditionally required, depending on `fund_source`.
    pub related_activity: Option<ActivityId>,
    pub donation_type: Option<DonationType>,
    pub carry_over_year: Option<i32>,
    pub recorded_by: UserId,
    pub recorded_date: NaiveDate,
    pub status: RegistrationStatus,
}

// --

impl FundSource {
    pub fn is_erpa(&self) -> bool {
        matches!(self, FundSource::ErpaPayment)
    }

    pub fn key(&self) -> &'static str {
        match self {
            FundSource::ErpaPayment => "erpa_payment",
            FundSource::PfesPayment => "pfes_payment",
            FundSource::StateBudget => "state_budget",
            FundSource::CommunityDonation => "community_donation",
            FundSource::CarryOver => "carry_over",
            FundSource::Other => "other",
        }
    }
}

impl FundRegistration {
    pub fn is_erpa(&self) -> bool {
        self.fund_source.is_erpa()
    }
}
