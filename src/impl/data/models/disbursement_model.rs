use serde_derive::Deserialize;

use crate::entities::{
    ActivityId, CommuneId, CommunityId, Disbursement, DisbursementId, DisbursementStatus,
    FiscalYearId, PaymentChannel, RecipientType,
};

use super::{amount_model::AmountModel, iso_date_model::ISODateModel};

#[derive(Debug, Deserialize)]
pub(crate) struct DisbursementModel {
    id: DisbursementId,
    commune_id: CommuneId,
    #[serde(default)]
    community_id: Option<CommunityId>,
    fiscal_year_id: FiscalYearId,
    #[serde(default)]
    activity_id: Option<ActivityId>,
    recipient_type: RecipientType,
    #[serde(default)]
    recipient_name: String,
    amount: AmountModel,
    #[serde(default)]
    scheduled_date: Option<ISODateModel>,
    #[serde(default)]
    payment_date: Option<ISODateModel>,
    channel: PaymentChannel,
    status: DisbursementStatus,
    #[serde(default)]
    payment_order_ref: Option<String>,
}

// --

impl From<DisbursementModel> for Disbursement {
    fn from(model: DisbursementModel) -> Self {
        Disbursement {
            id: model.id,
            commune_id: model.commune_id,
            community_id: model.community_id,
            fiscal_year_id: model.fiscal_year_id,
            activity_id: model.activity_id,
            recipient_type: model.recipient_type,
            recipient_name: model.recipient_name,
            amount: model.amount.into(),
            scheduled_date: model.scheduled_date.map(Into::into),
            payment_date: model.payment_date.map(Into::into),
            channel: model.channel,
            status: model.status,
            payment_order_ref: model.payment_order_ref,
        }
    }
}
