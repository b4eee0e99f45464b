use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::datasources::fund_rows_datasource::{FundRowsDatasource, FundRowsDatasourceImpl},
    domain::repositories::fund_records_repository::FundRecordsRepository,
    entities::{
        CommunityId, Disbursement, FiscalYear, FiscalYearId, FundBackend, Geography, Meeting,
        Mutation, PlanActivity, WorkflowStatus,
    },
};

pub(crate) struct FundRecordsRepositoryImpl<DS: FundRowsDatasource> {
    rows_datasource: DS,
}

#[async_trait]
impl<DS: FundRowsDatasource> FundRecordsRepository for FundRecordsRepositoryImpl<DS> {
    async fn fetch_activities(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<Vec<PlanActivity>, ServerError> {
        self.rows_datasource.activities(fiscal_year, community).await
    }

    async fn fetch_disbursements(
        &self,
        fiscal_year: &FiscalYearId,
    ) -> Result<Vec<Disbursement>, ServerError> {
        self.rows_datasource.disbursements(fiscal_year).await
    }

    async fn fetch_meetings(
        &self,
        fiscal_year: &FiscalYearId,
    ) -> Result<Vec<Meeting>, ServerError> {
        self.rows_datasource.meetings(fiscal_year).await
    }

    async fn fetch_geography(&self) -> Result<Geography, ServerError> {
        let (communes, communities) = futures::try_join!(
            self.rows_datasource.communes(),
            self.rows_datasource.communities()
        )?;
        Ok(Geography::new(communes, communities))
    }

    async fn fetch_fiscal_years(&self) -> Result<Vec<FiscalYear>, ServerError> {
        self.rows_datasource.fiscal_years().await
    }

    async fn fetch_workflow_status(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<Option<WorkflowStatus>, ServerError> {
        self.rows_datasource
            .workflow_status(community, fiscal_year)
            .await
    }

    async fn write(&self, mutation: &Mutation) -> Result<(), ServerError> {
        tracing::debug!(table = %mutation.table(), op = mutation.op(), "writing to backend");
        self.rows_datasource.apply(mutation).await
    }

    async fn is_reachable(&self) -> bool {
        self.rows_datasource.is_reachable().await
    }
}

impl<B: FundBackend> FundRecordsRepositoryImpl<FundRowsDatasourceImpl<B>> {
    pub(crate) fn new(backend: Arc<B>) -> Self {
        Self {
            rows_datasource: FundRowsDatasourceImpl::new(backend),
        }
    }
}
