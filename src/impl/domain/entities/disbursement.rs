use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use super::ids::{ActivityId, CommuneId, CommunityId, DisbursementId, FiscalYearId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    ForestOwner,
    Cpc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChannel {
    Bank,
    Postal,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementStatus {
    Scheduled,
    Disbursed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disbursement {
    pub id: DisbursementId,
    pub commune_id: CommuneId,
    pub community_id: Option<CommunityId>,
    pub fiscal_year_id: FiscalYearId,
    pub activity_id: Option<ActivityId>,
    pub recipient_type: RecipientType,
    pub recipient_name: String,
    pub amount: f64,
    pub scheduled_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub channel: PaymentChannel,
    pub status: DisbursementStatus,
    pub payment_order_ref: Option<String>,
}

// --

impl Disbursement {
    /// Only completed transfers count as money received.
    pub fn is_disbursed(&self) -> bool {
        self.status == DisbursementStatus::Disbursed
    }
}
