use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use fractic_server_error::ServerError;

use crate::{
    domain::{
        logic::access_control::ensure_permitted,
        repositories::fund_records_repository::FundRecordsRepository,
    },
    entities::{
        Action, ActivityStatus, AuthProvider, ComplianceChecklist, Disbursement,
        FundRegistration, Idea, IdeaStatus, Meeting, MeetingRecord, Mutation, PlanActivity,
        Receipt, Record, SubmissionOutcome, User,
    },
};

use super::sync_usecase::{write_or_enqueue, SyncUsecase};

/// Data-entry writes. Each one validates first, then checks permission, and
/// only then writes (or queues when offline); a rejected submission writes
/// nothing.
#[async_trait]
pub trait SubmissionUsecase: Send + Sync {
    async fn submit_fund_registration(
        &self,
        user: &User,
        registration: FundRegistration,
    ) -> Result<SubmissionOutcome, ServerError>;

    async fn submit_idea(
        &self,
        user: &User,
        idea: Idea,
        checklist: &ComplianceChecklist,
    ) -> Result<SubmissionOutcome, ServerError>;

    async fn review_idea(
        &self,
        user: &User,
        idea: Idea,
        next: IdeaStatus,
    ) -> Result<(Idea, SubmissionOutcome), ServerError>;

    async fn advance_activity(
        &self,
        user: &User,
        activity: PlanActivity,
        next: ActivityStatus,
    ) -> Result<(PlanActivity, SubmissionOutcome), ServerError>;

    /// Stores the receipt and, when it is the first implementation record of
    /// an approved activity, moves the activity to ongoing.
    async fn upload_receipt(
        &self,
        user: &User,
        activity: PlanActivity,
        receipt: Receipt,
    ) -> Result<(PlanActivity, SubmissionOutcome), ServerError>;

    async fn record_disbursement(
        &self,
        user: &User,
        disbursement: Disbursement,
    ) -> Result<SubmissionOutcome, ServerError>;

    async fn record_minutes(
        &self,
        user: &User,
        meeting: Meeting,
        record: MeetingRecord,
    ) -> Result<(Meeting, SubmissionOutcome), ServerError>;

    async fn verify_receipt(
        &self,
        user: &User,
        receipt: Receipt,
    ) -> Result<(Receipt, SubmissionOutcome), ServerError>;
}

pub(crate) struct SubmissionUsecaseImpl<R, S, P>
where
    R: FundRecordsRepository,
    S: SyncUsecase,
    P: AuthProvider,
{
    records_repository: Arc<R>,
    sync: Arc<S>,
    auth: Arc<P>,
}

impl<R, S, P> SubmissionUsecaseImpl<R, S, P>
where
    R: FundRecordsRepository,
    S: SyncUsecase,
    P: AuthProvider,
{
    pub(crate) fn new(records_repository: Arc<R>, sync: Arc<S>, auth: Arc<P>) -> Self {
        Self {
            records_repository,
            sync,
            auth,
        }
    }

    async fn persist(
        &self,
        user: &User,
        action: Action,
        mutation: Mutation,
    ) -> Result<SubmissionOutcome, ServerError> {
        ensure_permitted(self.auth.as_ref(), user, action)?;
        write_or_enqueue(
            self.records_repository.as_ref(),
            self.sync.as_ref(),
            &user.id,
            mutation,
        )
        .await
    }
}

#[async_trait]
impl<R, S, P> SubmissionUsecase for SubmissionUsecaseImpl<R, S, P>
where
    R: FundRecordsRepository,
    S: SyncUsecase,
    P: AuthProvider,
{
    async fn submit_fund_registration(
        &self,
        user: &User,
        registration: FundRegistration,
    ) -> Result<SubmissionOutcome, ServerError> {
        registration.validate()?;
        let record = Record::FundRegistration(registration);
        self.persist(user, Action::RegisterFunds, Mutation::Insert { record })
            .await
    }

    async fn submit_idea(
        &self,
        user: &User,
        idea: Idea,
        checklist: &ComplianceChecklist,
    ) -> Result<SubmissionOutcome, ServerError> {
        checklist.validate(&idea.title)?;
        let record = Record::Idea(idea);
        self.persist(user, Action::SubmitIdea, Mutation::Insert { record })
            .await
    }

    async fn review_idea(
        &self,
        user: &User,
        mut idea: Idea,
        next: IdeaStatus,
    ) -> Result<(Idea, SubmissionOutcome), ServerError> {
        idea.transition_to(next, Utc::now())?;
        let mutation = Mutation::Update {
            id: idea.id.to_string(),
            record: Record::Idea(idea.clone()),
        };
        let outcome = self.persist(user, Action::ReviewIdea, mutation).await?;
        Ok((idea, outcome))
    }

    async fn advance_activity(
        &self,
        user: &User,
        mut activity: PlanActivity,
        next: ActivityStatus,
    ) -> Result<(PlanActivity, SubmissionOutcome), ServerError> {
        activity.advance_to(next)?;
        let action = match next {
            ActivityStatus::Approved | ActivityStatus::Cancelled => Action::ApprovePlan,
            _ => Action::CreatePlan,
        };
        let mutation = Mutation::Update {
            id: activity.id.to_string(),
            record: Record::PlanActivity(activity.clone()),
        };
        let outcome = self.persist(user, action, mutation).await?;
        Ok((activity, outcome))
    }

    async fn upload_receipt(
        &self,
        user: &User,
        mut activity: PlanActivity,
        receipt: Receipt,
    ) -> Result<(PlanActivity, SubmissionOutcome), ServerError> {
        receipt.validate_for(&activity)?;
        let started = activity.attach_receipt(receipt.clone());
        let outcome = self
            .persist(
                user,
                Action::UploadReceipt,
                Mutation::Insert {
                    record: Record::Receipt(receipt),
                },
            )
            .await?;
        if started {
            let mutation = Mutation::Update {
                id: activity.id.to_string(),
                record: Record::PlanActivity(activity.clone()),
            };
            self.persist(user, Action::UploadReceipt, mutation).await?;
        }
        Ok((activity, outcome))
    }

    async fn record_disbursement(
        &self,
        user: &User,
        disbursement: Disbursement,
    ) -> Result<SubmissionOutcome, ServerError> {
        disbursement.validate()?;
        let record = Record::Disbursement(disbursement);
        self.persist(user, Action::RecordDisbursement, Mutation::Insert { record })
            .await
    }

    async fn record_minutes(
        &self,
        user: &User,
        mut meeting: Meeting,
        record: MeetingRecord,
    ) -> Result<(Meeting, SubmissionOutcome), ServerError> {
        meeting.complete_with_record(record)?;
        let mutation = Mutation::Update {
            id: meeting.id.to_string(),
            record: Record::Meeting(meeting.clone()),
        };
        let outcome = self.persist(user, Action::ManageMeetings, mutation).await?;
        Ok((meeting, outcome))
    }

    async fn verify_receipt(
        &self,
        user: &User,
        mut receipt: Receipt,
    ) -> Result<(Receipt, SubmissionOutcome), ServerError> {
        receipt.verify(user.id.clone(), Utc::now())?;
        let mutation = Mutation::Update {
            id: receipt.id.to_string(),
            record: Record::Receipt(receipt.clone()),
        };
        let outcome = self.persist(user, Action::VerifyReceipt, mutation).await?;
        Ok((receipt, outcome))
    }
}
