use serde_derive::Deserialize;

use crate::entities::{CommunityId, FiscalYearId, StepKind, WorkflowStatus};

/// Row of `workflow_status`. Flags missing from the row read as not done.
#[derive(Debug, Deserialize)]
pub(crate) struct WorkflowStatusModel {
    community_id: CommunityId,
    fiscal_year_id: FiscalYearId,
    #[serde(default)]
    fund_registered: bool,
    #[serde(default)]
    meeting_scheduled: bool,
    #[serde(default)]
    minutes_uploaded: bool,
    #[serde(default)]
    plan_created: bool,
    #[serde(default)]
    activities_ongoing: bool,
    #[serde(default)]
    final_report_submitted: bool,
    #[serde(default)]
    current_step: Option<String>,
}

// --

impl From<WorkflowStatusModel> for WorkflowStatus {
    fn from(model: WorkflowStatusModel) -> Self {
        WorkflowStatus {
            community_id: model.community_id,
            fiscal_year_id: model.fiscal_year_id,
            fund_registered: model.fund_registered,
            meeting_scheduled: model.meeting_scheduled,
            minutes_uploaded: model.minutes_uploaded,
            plan_created: model.plan_created,
            activities_ongoing: model.activities_ongoing,
            final_report_submitted: model.final_report_submitted,
            current_step: model
                .current_step
                .unwrap_or_else(|| StepKind::FundRegistration.key().to_string()),
        }
    }
}
