use serde_derive::{Deserialize, Serialize};

use super::ids::{CommunityId, FiscalYearId};

/// Persisted completion flags for one community in one fiscal year. Flags
/// only ever flip from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStatus {
    pub community_id: CommunityId,
    pub fiscal_year_id: FiscalYearId,
    pub fund_registered: bool,
    pub meeting_scheduled: bool,
    pub minutes_uploaded: bool,
    pub plan_created: bool,
    pub activities_ongoing: bool,
    pub final_report_submitted: bool,
    /// Display hint only; the step statuses are always re-derived.
    pub current_step: String,
}

/// Inputs to step derivation. `all_activities_completed` is computed from the
/// fiscal year's activities, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowFlags {
    pub fund_registered: bool,
    pub meeting_scheduled: bool,
    pub minutes_uploaded: bool,
    pub plan_created: bool,
    pub all_activities_completed: bool,
    pub final_report_submitted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    FundRegistration,
    MeetingScheduled,
    MinutesUploaded,
    PlanCreated,
    ActivitiesImplemented,
    FinalReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Screen a workflow step opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTarget {
    FundRegistrationForm,
    MeetingSchedule,
    MeetingMinutes,
    PlanEditor,
    ActivityLog,
    FinalReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowStep {
    pub kind: StepKind,
    pub status: StepStatus,
    pub target: ScreenTarget,
}

/// Stored status plus the derived steps, as shown by the guided workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowView {
    pub status: WorkflowStatus,
    pub steps: [WorkflowStep; 6],
}

// --

impl StepKind {
    pub const SEQUENCE: [StepKind; 6] = [
        StepKind::FundRegistration,
        StepKind::MeetingScheduled,
        StepKind::MinutesUploaded,
        StepKind::PlanCreated,
        StepKind::ActivitiesImplemented,
        StepKind::FinalReport,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            StepKind::FundRegistration => "fund_registration",
            StepKind::MeetingScheduled => "meeting_scheduled",
            StepKind::MinutesUploaded => "minutes_uploaded",
            StepKind::PlanCreated => "plan_created",
            StepKind::ActivitiesImplemented => "activities_implemented",
            StepKind::FinalReport => "final_report",
        }
    }

    pub fn target(&self) -> ScreenTarget {
        match self {
            StepKind::FundRegistration => ScreenTarget::FundRegistrationForm,
            StepKind::MeetingScheduled => ScreenTarget::MeetingSchedule,
            StepKind::MinutesUploaded => ScreenTarget::MeetingMinutes,
            StepKind::PlanCreated => ScreenTarget::PlanEditor,
            StepKind::ActivitiesImplemented => ScreenTarget::ActivityLog,
            StepKind::FinalReport => ScreenTarget::FinalReport,
        }
    }
}

impl WorkflowStatus {
    pub fn empty(community_id: CommunityId, fiscal_year_id: FiscalYearId) -> Self {
        Self {
            community_id,
            fiscal_year_id,
            fund_registered: false,
            meeting_scheduled: false,
            minutes_uploaded: false,
            plan_created: false,
            activities_ongoing: false,
            final_report_submitted: false,
            current_step: StepKind::FundRegistration.key().to_string(),
        }
    }

    /// Address of the row. Workflow rows carry no `id` column; they are
    /// unique per community and fiscal year.
    pub fn row_key(&self) -> String {
        format!("{}:{}", self.community_id, self.fiscal_year_id)
    }
}
