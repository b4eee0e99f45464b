use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;
use serde_derive::Deserialize;

use crate::entities::{
    ActivityId, ActivityStatus, BudgetItem, BudgetItemId, CommunityId, ExpenditureFamily,
    FileType, FiscalYearId, ImplementationMethod, PlanActivity, ProgramCategory, Receipt,
    ReceiptId, Role, UserId,
};

use super::{amount_model::AmountModel, iso_date_model::ISODateModel};

/// Row of `plan_activities`, with its budget items and receipts embedded.
#[derive(Debug, Deserialize)]
pub(crate) struct PlanActivityModel {
    id: ActivityId,
    community_id: CommunityId,
    fiscal_year_id: FiscalYearId,
    #[serde(alias = "activity_name")]
    name: String,
    #[serde(default)]
    family: Option<ExpenditureFamily>,
    #[serde(default)]
    period_start: Option<ISODateModel>,
    #[serde(default)]
    period_end: Option<ISODateModel>,
    #[serde(default)]
    forest_owner_support: AmountModel,
    #[serde(default)]
    community_contribution: AmountModel,
    #[serde(default)]
    other_funds: AmountModel,
    #[serde(default = "default_method")]
    implementation_method: ImplementationMethod,
    status: ActivityStatus,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    budget_items: Vec<BudgetItemModel>,
    #[serde(default)]
    receipts: Vec<ReceiptModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetItemModel {
    id: BudgetItemId,
    activity_id: ActivityId,
    #[serde(alias = "item_name")]
    name: String,
    #[serde(default)]
    unit: String,
    quantity: AmountModel,
    unit_cost: AmountModel,
    #[serde(default)]
    family: Option<ExpenditureFamily>,
    #[serde(default)]
    program: Option<ProgramCategory>,
    #[serde(default)]
    remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptModel {
    id: ReceiptId,
    activity_id: ActivityId,
    #[serde(default)]
    budget_item_id: Option<BudgetItemId>,
    file_ref: String,
    file_type: FileType,
    uploaded_by: Role,
    uploaded_at: DateTime<Utc>,
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    verified_by: Option<UserId>,
    #[serde(default)]
    verified_at: Option<DateTime<Utc>>,
}

fn default_method() -> ImplementationMethod {
    ImplementationMethod::Community
}

// --

impl TryFrom<BudgetItemModel> for BudgetItem {
    type Error = ServerError;

    /// The stored amount, if any, is ignored: it is always recomputed from
    /// quantity and unit cost.
    fn try_from(model: BudgetItemModel) -> Result<Self, Self::Error> {
        let mut item = BudgetItem::new(
            model.id,
            model.activity_id,
            model.name,
            model.unit,
            model.quantity.into(),
            model.unit_cost.into(),
        )?
        .with_overrides(model.family, model.program);
        item.remarks = model.remarks;
        Ok(item)
    }
}

impl From<ReceiptModel> for Receipt {
    fn from(model: ReceiptModel) -> Self {
        Receipt {
            id: model.id,
            activity_id: model.activity_id,
            budget_item_id: model.budget_item_id,
            file_ref: model.file_ref,
            file_type: model.file_type,
            uploaded_by: model.uploaded_by,
            uploaded_at: model.uploaded_at,
            verified: model.verified,
            verified_by: model.verified_by,
            verified_at: model.verified_at,
        }
    }
}

impl From<PlanActivityModel> for PlanActivity {
    /// Budget items that fail validation (negative quantity or unit cost) are
    /// dropped with a warning.
    fn from(model: PlanActivityModel) -> Self {
        let activity_id = model.id.clone();
        PlanActivity {
            id: model.id,
            community_id: model.community_id,
            fiscal_year_id: model.fiscal_year_id,
            name: model.name,
            family: model.family,
            period_start: model.period_start.map(Into::into),
            period_end: model.period_end.map(Into::into),
            forest_owner_support: model.forest_owner_support.into(),
            community_contribution: model.community_contribution.into(),
            other_funds: model.other_funds.into(),
            implementation_method: model.implementation_method,
            status: model.status,
            notes: model.notes,
            budget_items: model
                .budget_items
                .into_iter()
                .filter_map(|item| {
                    let item_id = item.id.clone();
                    BudgetItem::try_from(item)
                        .map_err(|e| {
                            tracing::warn!(
                                activity = %activity_id,
                                item = %item_id,
                                error = ?e,
                                "skipping invalid budget item"
                            )
                        })
                        .ok()
                })
                .collect(),
            receipts: model.receipts.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn lenient_row_is_read() {
        let row = serde_json::json!({
            "id": "a1",
            "community_id": "v1",
            "fiscal_year_id": "fy2024",
            "activity_name": "Forest patrol",
            "period_start": "2024-02-01T00:00:00Z",
            "forest_owner_support": "12,000,000",
            "community_contribution": null,
            "status": "approved",
            "budget_items": [{
                "id": "i1",
                "activity_id": "a1",
                "name": "Patrol allowance",
                "unit": "day",
                "quantity": 20,
                "unit_cost": "150,000",
                "amount": 1
            }]
        });
        let model: PlanActivityModel = serde_json::from_value(row).unwrap();
        let activity = PlanActivity::from(model);
        assert_eq!(activity.name, "Forest patrol");
        assert_eq!(
            activity.period_start,
            Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        assert_eq!(activity.forest_owner_support, 12_000_000.0);
        assert_eq!(activity.community_contribution, 0.0);
        assert_eq!(activity.implementation_method, ImplementationMethod::Community);
        assert_eq!(activity.budget_items[0].amount, 3_000_000.0);
        assert!(activity.receipts.is_empty());
    }

    #[test]
    fn negative_quantity_fails_conversion() {
        let row = serde_json::json!({
            "id": "i1",
            "activity_id": "a1",
            "name": "Fuel",
            "quantity": -3,
            "unit_cost": 10
        });
        let model: BudgetItemModel = serde_json::from_value(row).unwrap();
        assert!(BudgetItem::try_from(model).is_err());
    }

    #[test]
    fn activity_keeps_valid_items_when_one_is_negative() {
        let row = serde_json::json!({
            "id": "a1",
            "community_id": "v1",
            "fiscal_year_id": "fy2024",
            "name": "Forest patrol",
            "status": "ongoing",
            "budget_items": [
                {"id": "i1", "activity_id": "a1", "name": "Fuel", "quantity": 2, "unit_cost": 10},
                {"id": "i2", "activity_id": "a1", "name": "Refund", "quantity": 1, "unit_cost": -5}
            ]
        });
        let model: PlanActivityModel = serde_json::from_value(row).unwrap();
        let activity = PlanActivity::from(model);
        assert_eq!(activity.budget_items.len(), 1);
        assert_eq!(activity.budget_items[0].amount, 20.0);
    }
}
