use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{
    CommunityId, Disbursement, FiscalYear, FiscalYearId, Geography, Meeting, Mutation,
    PlanActivity, WorkflowStatus,
};

#[async_trait]
pub trait FundRecordsRepository: Send + Sync {
    /// Activities of the fiscal year, newest period first, with their budget
    /// items and receipts. Narrowed to one community when given.
    async fn fetch_activities(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<Vec<PlanActivity>, ServerError>;

    /// Disbursements of the fiscal year that were actually paid out.
    async fn fetch_disbursements(
        &self,
        fiscal_year: &FiscalYearId,
    ) -> Result<Vec<Disbursement>, ServerError>;

    async fn fetch_meetings(&self, fiscal_year: &FiscalYearId)
        -> Result<Vec<Meeting>, ServerError>;

    async fn fetch_geography(&self) -> Result<Geography, ServerError>;

    async fn fetch_fiscal_years(&self) -> Result<Vec<FiscalYear>, ServerError>;

    async fn fetch_workflow_status(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<Option<WorkflowStatus>, ServerError>;

    async fn write(&self, mutation: &Mutation) -> Result<(), ServerError>;

    async fn is_reachable(&self) -> bool;
}
