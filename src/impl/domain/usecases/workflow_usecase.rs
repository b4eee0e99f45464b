use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    domain::{
        logic::{
            access_control::ensure_permitted,
            workflow_engine::{current_step_label, derive_workflow_steps},
        },
        repositories::fund_records_repository::FundRecordsRepository,
    },
    entities::{
        Action, AuthProvider, CommunityId, FiscalYearId, Mutation, PlanActivity, Record,
        StepKind, User, WorkflowFlags, WorkflowStatus, WorkflowView,
    },
};

use super::sync_usecase::{write_or_enqueue, SyncUsecase};

#[async_trait]
pub trait WorkflowUsecase: Send + Sync {
    async fn workflow(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<WorkflowView, ServerError>;

    /// Marks `step` done for the pair. Flags never reset; completing an
    /// already completed step writes nothing.
    async fn complete_step(
        &self,
        user: &User,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
        step: StepKind,
    ) -> Result<WorkflowView, ServerError>;
}

pub(crate) struct WorkflowUsecaseImpl<R, S, P>
where
    R: FundRecordsRepository,
    S: SyncUsecase,
    P: AuthProvider,
{
    records_repository: Arc<R>,
    sync: Arc<S>,
    auth: Arc<P>,
}

impl<R, S, P> WorkflowUsecaseImpl<R, S, P>
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

    async fn load(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<(Option<WorkflowStatus>, Vec<PlanActivity>), ServerError> {
        futures::try_join!(
            self.records_repository
                .fetch_workflow_status(community, fiscal_year),
            self.records_repository
                .fetch_activities(fiscal_year, Some(community)),
        )
    }
}

fn view(status: WorkflowStatus, activities: &[PlanActivity]) -> WorkflowView {
    let steps = derive_workflow_steps(&WorkflowFlags::from_status(&status, activities));
    WorkflowView { status, steps }
}

#[async_trait]
impl<R, S, P> WorkflowUsecase for WorkflowUsecaseImpl<R, S, P>
where
    R: FundRecordsRepository,
    S: SyncUsecase,
    P: AuthProvider,
{
    async fn workflow(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<WorkflowView, ServerError> {
        let (stored, activities) = self.load(community, fiscal_year).await?;
        let status = stored
            .unwrap_or_else(|| WorkflowStatus::empty(community.clone(), fiscal_year.clone()));
        Ok(view(status, &activities))
    }

    async fn complete_step(
        &self,
        user: &User,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
        step: StepKind,
    ) -> Result<WorkflowView, ServerError> {
        ensure_permitted(self.auth.as_ref(), user, Action::UpdateWorkflow)?;

        let (stored, activities) = self.load(community, fiscal_year).await?;
        let exists = stored.is_some();
        let mut status = stored
            .unwrap_or_else(|| WorkflowStatus::empty(community.clone(), fiscal_year.clone()));

        let flipped = status.mark(step);
        let mut result = view(status, &activities);
        let label = current_step_label(&result.steps);
        if !flipped && result.status.current_step == label {
            return Ok(result);
        }
        result.status.current_step = label.to_string();

        let record = Record::WorkflowStatus(result.status.clone());
        let mutation = if exists {
            Mutation::Update {
                id: result.status.row_key(),
                record,
            }
        } else {
            Mutation::Insert { record }
        };
        write_or_enqueue(
            self.records_repository.as_ref(),
            self.sync.as_ref(),
            &user.id,
            mutation,
        )
        .await?;
        tracing::info!(
            community = %community,
            fiscal_year = %fiscal_year,
            step = step.key(),
            current_step = label,
            "workflow step completed"
        );
        Ok(result)
    }
}
