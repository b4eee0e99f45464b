use crate::entities::{
    ActivityStatus, PlanActivity, StepKind, StepStatus, WorkflowFlags, WorkflowStatus,
    WorkflowStep,
};

/// Step `i` is completed when its own flag is set, current when the previous
/// step's flag is set (the first step has no prerequisite), and pending
/// otherwise.
pub fn derive_workflow_steps(flags: &WorkflowFlags) -> [WorkflowStep; 6] {
    let done = flags.in_sequence();
    std::array::from_fn(|i| {
        let kind = StepKind::SEQUENCE[i];
        let prerequisite_met = i == 0 || done[i - 1];
        let status = if done[i] {
            StepStatus::Completed
        } else if prerequisite_met {
            StepStatus::Current
        } else {
            StepStatus::Pending
        };
        WorkflowStep {
            kind,
            status,
            target: kind.target(),
        }
    })
}

/// Pending steps cannot be opened; everything else can.
pub fn can_navigate(step: &WorkflowStep) -> bool {
    step.status != StepStatus::Pending
}

/// Key of the first non-completed step, or of the last step when all are done.
/// Written back to `WorkflowStatus::current_step` as a display hint.
pub fn current_step_label(steps: &[WorkflowStep; 6]) -> &'static str {
    steps
        .iter()
        .find(|s| s.status != StepStatus::Completed)
        .unwrap_or(&steps[5])
        .kind
        .key()
}

impl WorkflowFlags {
    /// `all_activities_completed` is false for a year without activities.
    pub fn from_status(status: &WorkflowStatus, activities: &[PlanActivity]) -> Self {
        Self {
            fund_registered: status.fund_registered,
            meeting_scheduled: status.meeting_scheduled,
            minutes_uploaded: status.minutes_uploaded,
            plan_created: status.plan_created,
            all_activities_completed: !activities.is_empty()
                && activities
                    .iter()
                    .all(|a| a.status == ActivityStatus::Completed),
            final_report_submitted: status.final_report_submitted,
        }
    }

    fn in_sequence(&self) -> [bool; 6] {
        [
            self.fund_registered,
            self.meeting_scheduled,
            self.minutes_uploaded,
            self.plan_created,
            self.all_activities_completed,
            self.final_report_submitted,
        ]
    }
}

impl WorkflowStatus {
    /// Sets the flag backing `step`. Flags never reset, so marking an already
    /// completed step changes nothing. Returns whether the flag flipped.
    ///
    /// `ActivitiesImplemented` is backed by `activities_ongoing`, which records
    /// that implementation started; its step status is still derived from the
    /// activities themselves.
    pub fn mark(&mut self, step: StepKind) -> bool {
        let flag = match step {
            StepKind::FundRegistration => &mut self.fund_registered,
            StepKind::MeetingScheduled => &mut self.meeting_scheduled,
            StepKind::MinutesUploaded => &mut self.minutes_uploaded,
            StepKind::PlanCreated => &mut self.plan_created,
            StepKind::ActivitiesImplemented => &mut self.activities_ongoing,
            StepKind::FinalReport => &mut self.final_report_submitted,
        };
        let flipped = !*flag;
        *flag = true;
        flipped
    }
}
