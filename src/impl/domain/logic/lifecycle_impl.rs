use chrono::{DateTime, Utc};
use fractic_server_error::ServerError;

use crate::{
    entities::{
        ActivityId, ActivityStatus, BudgetItem, BudgetItemId, ExpenditureFamily, Idea,
        IdeaStatus, Meeting, MeetingRecord, MeetingStatus, PlanActivity, ProgramCategory,
        Receipt, UserId,
    },
    errors::{
        IllegalActivityTransition, IllegalIdeaTransition, MeetingNotOpen, NegativeBudgetValue,
        ReceiptAlreadyVerified,
    },
};

// Budget items.
// ---

impl BudgetItem {
    pub fn new(
        id: BudgetItemId,
        activity_id: ActivityId,
        name: impl Into<String>,
        unit: impl Into<String>,
        quantity: f64,
        unit_cost: f64,
    ) -> Result<Self, ServerError> {
        let name = name.into();
        if quantity < 0.0 {
            return Err(NegativeBudgetValue::new(&name, "quantity", quantity));
        }
        if unit_cost < 0.0 {
            return Err(NegativeBudgetValue::new(&name, "unit cost", unit_cost));
        }
        Ok(Self {
            id,
            activity_id,
            name,
            unit: unit.into(),
            quantity,
            unit_cost,
            amount: quantity * unit_cost,
            family: None,
            program: None,
            remarks: None,
        })
    }

    pub fn with_overrides(
        mut self,
        family: Option<ExpenditureFamily>,
        program: Option<ProgramCategory>,
    ) -> Self {
        self.family = family;
        self.program = program;
        self
    }
}

// Activities.
// ---

impl ActivityStatus {
    /// One stage forward at a time. Cancelling is allowed from any non-final
    /// state; nothing leaves `Completed` or `Cancelled`.
    pub fn can_transition_to(&self, next: ActivityStatus) -> bool {
        match (self.stage(), next.stage()) {
            (None, _) => false,
            (Some(_), None) => *self != ActivityStatus::Completed,
            (Some(from), Some(to)) => to == from + 1,
        }
    }
}

impl PlanActivity {
    pub fn advance_to(&mut self, next: ActivityStatus) -> Result<(), ServerError> {
        if !self.status.can_transition_to(next) {
            return Err(IllegalActivityTransition::new(
                self.id.as_str(),
                self.status.key(),
                next.key(),
            ));
        }
        tracing::debug!(activity = %self.id, from = %self.status, to = %next, "activity status advanced");
        self.status = next;
        Ok(())
    }

    /// Logging implementation work (an activity entry or a receipt) starts an
    /// approved activity. Returns whether the status changed.
    pub fn mark_implementation_logged(&mut self) -> bool {
        if self.status == ActivityStatus::Approved {
            self.status = ActivityStatus::Ongoing;
            true
        } else {
            false
        }
    }

    /// Attaches a receipt and starts the activity if it was only approved.
    /// Returns whether the status changed.
    pub fn attach_receipt(&mut self, receipt: Receipt) -> bool {
        self.receipts.push(receipt);
        self.mark_implementation_logged()
    }
}

// Receipts.
// ---

impl Receipt {
    pub fn verify(&mut self, reviewer: UserId, at: DateTime<Utc>) -> Result<(), ServerError> {
        if self.verified {
            return Err(ReceiptAlreadyVerified::new(self.id.as_str()));
        }
        self.verified = true;
        self.verified_by = Some(reviewer);
        self.verified_at = Some(at);
        Ok(())
    }
}

// Ideas.
// ---

impl IdeaStatus {
    pub fn can_transition_to(&self, next: IdeaStatus) -> bool {
        matches!(
            (self, next),
            (IdeaStatus::Submitted, IdeaStatus::UnderReview)
                | (IdeaStatus::UnderReview, IdeaStatus::Approved)
                | (IdeaStatus::UnderReview, IdeaStatus::Rejected)
                | (IdeaStatus::Approved, IdeaStatus::Implemented)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, IdeaStatus::Rejected | IdeaStatus::Implemented)
    }
}

impl Idea {
    pub fn transition_to(&mut self, next: IdeaStatus, at: DateTime<Utc>) -> Result<(), ServerError> {
        if !self.status.can_transition_to(next) {
            return Err(IllegalIdeaTransition::new(
                self.id.as_str(),
                self.status.key(),
                next.key(),
            ));
        }
        self.status = next;
        self.updated_at = at;
        Ok(())
    }
}

// Meetings.
// ---

impl Meeting {
    /// Files the minutes and closes the meeting.
    pub fn complete_with_record(&mut self, record: MeetingRecord) -> Result<(), ServerError> {
        if self.status != MeetingStatus::Scheduled {
            return Err(MeetingNotOpen::new(self.id.as_str(), self.status.key()));
        }
        self.record = Some(record);
        self.status = MeetingStatus::Completed;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), ServerError> {
        if self.status != MeetingStatus::Scheduled {
            return Err(MeetingNotOpen::new(self.id.as_str(), self.status.key()));
        }
        self.status = MeetingStatus::Cancelled;
        Ok(())
    }
}
