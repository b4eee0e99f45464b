use std::sync::Arc;

use fractic_server_error::ServerError;

use crate::{
    config::FundCoreConfig,
    data::{
        datasources::fund_rows_datasource::FundRowsDatasourceImpl,
        repositories::{
            fund_records_repository_impl::FundRecordsRepositoryImpl,
            sync_queue_repository_impl::SyncQueueRepositoryImpl,
        },
    },
    domain::{
        repositories::fund_records_repository::FundRecordsRepository as _,
        usecases::{
            dashboard_usecase::{DashboardUsecase as _, DashboardUsecaseImpl},
            monitoring_usecase::{MonitoringUsecase as _, MonitoringUsecaseImpl},
            submission_usecase::{SubmissionUsecase as _, SubmissionUsecaseImpl},
            sync_usecase::{SyncUsecase as _, SyncUsecaseImpl},
            workflow_usecase::{WorkflowUsecase as _, WorkflowUsecaseImpl},
        },
    },
    entities::{
        ActivityStatus, AuthProvider, CommunityId, ComplianceChecklist, Disbursement,
        DrainOutcome, ExpenditureFamily, FiscalYear, FiscalYearId, FundBackend,
        FundFlowSummary, FundRegistration, Idea, IdeaStatus, Meeting, MeetingRecord,
        MonitoringFilter, MonitoringSort, MonitoringView, Mutation, PlanActivity,
        ProgramCategory, QueueStorage, Receipt, SpentItemDetail, StepKind, SubmissionOutcome,
        SyncItemId, User, UserId, WorkflowView,
    },
    ext::{standard_auth::RolePermissionProvider, standard_storage::JsonFileQueueStorage},
    presentation::{fund_flow_printer::FundFlowPrinter, monitoring_csv::write_monitoring_csv},
};

/// Queue file used when the config names none.
pub const DEFAULT_QUEUE_FILE: &str = "fund_core_queue.json";

type Records<B> = FundRecordsRepositoryImpl<FundRowsDatasourceImpl<B>>;
type QueueSync<B, S> = SyncUsecaseImpl<Records<B>, SyncQueueRepositoryImpl<S>>;

/// Entry point for hosts: dashboards, monitoring, the guided workflow,
/// data-entry submissions and the offline queue, over one backend.
pub struct CommunityFundUtil<B, S, P = RolePermissionProvider>
where
    B: FundBackend,
    S: QueueStorage,
    P: AuthProvider,
{
    records_repository: Arc<Records<B>>,
    dashboard_usecase: DashboardUsecaseImpl<Records<B>>,
    monitoring_usecase: MonitoringUsecaseImpl<Records<B>>,
    workflow_usecase: WorkflowUsecaseImpl<Records<B>, QueueSync<B, S>, P>,
    submission_usecase: SubmissionUsecaseImpl<Records<B>, QueueSync<B, S>, P>,
    sync_usecase: Arc<QueueSync<B, S>>,
    printer: FundFlowPrinter,
    config: Arc<FundCoreConfig>,
}

impl<B> CommunityFundUtil<B, JsonFileQueueStorage, RolePermissionProvider>
where
    B: FundBackend,
{
    /// Role-based permissions, and the offline queue persisted at
    /// `config.queue_path` (or `DEFAULT_QUEUE_FILE`).
    pub fn with_defaults(backend: Arc<B>, config: FundCoreConfig) -> Result<Self, ServerError> {
        let queue_path = config
            .queue_path
            .clone()
            .unwrap_or_else(|| DEFAULT_QUEUE_FILE.into());
        Self::new(
            backend,
            JsonFileQueueStorage::new(queue_path),
            RolePermissionProvider::new(),
            config,
        )
    }
}

impl<B, S, P> CommunityFundUtil<B, S, P>
where
    B: FundBackend,
    S: QueueStorage,
    P: AuthProvider,
{
    pub fn new(
        backend: Arc<B>,
        queue_storage: S,
        auth: P,
        config: FundCoreConfig,
    ) -> Result<Self, ServerError> {
        let printer = FundFlowPrinter::new(config.currency()?);
        let config = Arc::new(config);
        let auth = Arc::new(auth);
        let records_repository = Arc::new(FundRecordsRepositoryImpl::new(backend));
        let sync_usecase = Arc::new(SyncUsecaseImpl::new(
            records_repository.clone(),
            SyncQueueRepositoryImpl::new(queue_storage),
        ));
        Ok(Self {
            dashboard_usecase: DashboardUsecaseImpl::new(records_repository.clone(), config.clone()),
            monitoring_usecase: MonitoringUsecaseImpl::new(
                records_repository.clone(),
                config.clone(),
            ),
            workflow_usecase: WorkflowUsecaseImpl::new(
                records_repository.clone(),
                sync_usecase.clone(),
                auth.clone(),
            ),
            submission_usecase: SubmissionUsecaseImpl::new(
                records_repository.clone(),
                sync_usecase.clone(),
                auth,
            ),
            records_repository,
            sync_usecase,
            printer,
            config,
        })
    }

    pub fn config(&self) -> &FundCoreConfig {
        &self.config
    }

    // Reports.
    // ---

    pub async fn fiscal_years(&self) -> Result<Vec<FiscalYear>, ServerError> {
        self.records_repository.fetch_fiscal_years().await
    }

    pub async fn dashboard(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<FundFlowSummary, ServerError> {
        self.dashboard_usecase
            .load_dashboard(fiscal_year, community)
            .await
    }

    pub async fn drill_down(
        &self,
        fiscal_year: &FiscalYearId,
        family: ExpenditureFamily,
        program: Option<ProgramCategory>,
    ) -> Result<Vec<SpentItemDetail>, ServerError> {
        self.dashboard_usecase
            .drill_down(fiscal_year, family, program)
            .await
    }

    pub async fn monitoring(
        &self,
        fiscal_year: &FiscalYearId,
        filter: MonitoringFilter,
        sort: Option<MonitoringSort>,
    ) -> Result<MonitoringView, ServerError> {
        self.monitoring_usecase
            .monitoring(fiscal_year, filter, sort)
            .await
    }

    /// Plain-text fund-flow summary, amounts in the configured currency.
    pub async fn summary_text(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<String, ServerError> {
        let summary = self.dashboard(fiscal_year, community).await?;
        Ok(self.printer.print_summary(&summary))
    }

    pub async fn monitoring_text(
        &self,
        fiscal_year: &FiscalYearId,
        filter: MonitoringFilter,
        sort: Option<MonitoringSort>,
    ) -> Result<String, ServerError> {
        let view = self.monitoring(fiscal_year, filter, sort).await?;
        Ok(self.printer.print_monitoring(&view))
    }

    pub async fn monitoring_csv(
        &self,
        fiscal_year: &FiscalYearId,
        filter: MonitoringFilter,
        sort: Option<MonitoringSort>,
    ) -> Result<String, ServerError> {
        let view = self.monitoring(fiscal_year, filter, sort).await?;
        write_monitoring_csv(&view.rows)
    }

    // Guided workflow.
    // ---

    pub async fn workflow(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<WorkflowView, ServerError> {
        self.workflow_usecase.workflow(community, fiscal_year).await
    }

    pub async fn complete_workflow_step(
        &self,
        user: &User,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
        step: StepKind,
    ) -> Result<WorkflowView, ServerError> {
        self.workflow_usecase
            .complete_step(user, community, fiscal_year, step)
            .await
    }

    // Data entry.
    // ---

    pub async fn submit_fund_registration(
        &self,
        user: &User,
        registration: FundRegistration,
    ) -> Result<SubmissionOutcome, ServerError> {
        self.submission_usecase
            .submit_fund_registration(user, registration)
            .await
    }

    pub async fn submit_idea(
        &self,
        user: &User,
        idea: Idea,
        checklist: &ComplianceChecklist,
    ) -> Result<SubmissionOutcome, ServerError> {
        self.submission_usecase
            .submit_idea(user, idea, checklist)
            .await
    }

    pub async fn review_idea(
        &self,
        user: &User,
        idea: Idea,
        next: IdeaStatus,
    ) -> Result<(Idea, SubmissionOutcome), ServerError> {
        self.submission_usecase.review_idea(user, idea, next).await
    }

    pub async fn advance_activity(
        &self,
        user: &User,
        activity: PlanActivity,
        next: ActivityStatus,
    ) -> Result<(PlanActivity, SubmissionOutcome), ServerError> {
        self.submission_usecase
            .advance_activity(user, activity, next)
            .await
    }

    pub async fn upload_receipt(
        &self,
        user: &User,
        activity: PlanActivity,
        receipt: Receipt,
    ) -> Result<(PlanActivity, SubmissionOutcome), ServerError> {
        self.submission_usecase
            .upload_receipt(user, activity, receipt)
            .await
    }

    pub async fn record_disbursement(
        &self,
        user: &User,
        disbursement: Disbursement,
    ) -> Result<SubmissionOutcome, ServerError> {
        self.submission_usecase
            .record_disbursement(user, disbursement)
            .await
    }

    pub async fn record_minutes(
        &self,
        user: &User,
        meeting: Meeting,
        record: MeetingRecord,
    ) -> Result<(Meeting, SubmissionOutcome), ServerError> {
        self.submission_usecase
            .record_minutes(user, meeting, record)
            .await
    }

    pub async fn verify_receipt(
        &self,
        user: &User,
        receipt: Receipt,
    ) -> Result<(Receipt, SubmissionOutcome), ServerError> {
        self.submission_usecase.verify_receipt(user, receipt).await
    }

    // Offline queue.
    // ---

    pub async fn enqueue(
        &self,
        user: &UserId,
        mutation: Mutation,
    ) -> Result<SyncItemId, ServerError> {
        self.sync_usecase.enqueue(user, mutation).await
    }

    pub async fn drain(&self) -> Result<DrainOutcome, ServerError> {
        self.sync_usecase.drain().await
    }

    pub async fn pending_count(&self) -> Result<usize, ServerError> {
        self.sync_usecase.pending_count().await
    }
}
