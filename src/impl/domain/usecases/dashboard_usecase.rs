use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    config::FundCoreConfig,
    domain::{
        logic::{classifier::Classifier, fund_flow_aggregator::FundFlowAggregator},
        repositories::fund_records_repository::FundRecordsRepository,
    },
    entities::{
        CommunityId, ExpenditureFamily, FiscalYearId, FundFlowSummary, ProgramCategory,
        SpentItemDetail,
    },
};

#[async_trait]
pub trait DashboardUsecase: Send + Sync {
    async fn load_dashboard(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<FundFlowSummary, ServerError>;

    async fn drill_down(
        &self,
        fiscal_year: &FiscalYearId,
        family: ExpenditureFamily,
        program: Option<ProgramCategory>,
    ) -> Result<Vec<SpentItemDetail>, ServerError>;
}

pub(crate) struct DashboardUsecaseImpl<R: FundRecordsRepository> {
    records_repository: Arc<R>,
    config: Arc<FundCoreConfig>,
}

impl<R: FundRecordsRepository> DashboardUsecaseImpl<R> {
    pub(crate) fn new(records_repository: Arc<R>, config: Arc<FundCoreConfig>) -> Self {
        Self {
            records_repository,
            config,
        }
    }

    fn classifier(&self) -> Classifier {
        Classifier::new(self.config.keyword_match)
    }
}

#[async_trait]
impl<R: FundRecordsRepository> DashboardUsecase for DashboardUsecaseImpl<R> {
    async fn load_dashboard(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<FundFlowSummary, ServerError> {
        let (activities, disbursements, geography) = futures::try_join!(
            self.records_repository.fetch_activities(fiscal_year, community),
            self.records_repository.fetch_disbursements(fiscal_year),
            self.records_repository.fetch_geography(),
        )?;
        let disbursements: Vec<_> = match community {
            Some(community) => disbursements
                .into_iter()
                .filter(|d| d.community_id.as_ref() == Some(community))
                .collect(),
            None => disbursements,
        };
        tracing::debug!(
            fiscal_year = %fiscal_year,
            activities = activities.len(),
            disbursements = disbursements.len(),
            "aggregating fund flow"
        );
        Ok(
            FundFlowAggregator::new(self.classifier(), self.config.commune_clamp, &geography)
                .aggregate(&activities, &disbursements),
        )
    }

    async fn drill_down(
        &self,
        fiscal_year: &FiscalYearId,
        family: ExpenditureFamily,
        program: Option<ProgramCategory>,
    ) -> Result<Vec<SpentItemDetail>, ServerError> {
        let (activities, geography) = futures::try_join!(
            self.records_repository.fetch_activities(fiscal_year, None),
            self.records_repository.fetch_geography(),
        )?;
        Ok(
            FundFlowAggregator::new(self.classifier(), self.config.commune_clamp, &geography)
                .drill_down(&activities, family, program),
        )
    }
}
