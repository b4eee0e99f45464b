use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    config::FundCoreConfig,
    domain::{
        logic::{alert_engine::apply_view, community_metrics::compute_community_metrics},
        repositories::fund_records_repository::FundRecordsRepository,
    },
    entities::{AlertCounts, FiscalYearId, MonitoringFilter, MonitoringSort, MonitoringView},
};

#[async_trait]
pub trait MonitoringUsecase: Send + Sync {
    async fn monitoring(
        &self,
        fiscal_year: &FiscalYearId,
        filter: MonitoringFilter,
        sort: Option<MonitoringSort>,
    ) -> Result<MonitoringView, ServerError>;
}

pub(crate) struct MonitoringUsecaseImpl<R: FundRecordsRepository> {
    records_repository: Arc<R>,
    config: Arc<FundCoreConfig>,
}

impl<R: FundRecordsRepository> MonitoringUsecaseImpl<R> {
    pub(crate) fn new(records_repository: Arc<R>, config: Arc<FundCoreConfig>) -> Self {
        Self {
            records_repository,
            config,
        }
    }
}

#[async_trait]
impl<R: FundRecordsRepository> MonitoringUsecase for MonitoringUsecaseImpl<R> {
    async fn monitoring(
        &self,
        fiscal_year: &FiscalYearId,
        filter: MonitoringFilter,
        sort: Option<MonitoringSort>,
    ) -> Result<MonitoringView, ServerError> {
        let (activities, disbursements, meetings, geography) = futures::try_join!(
            self.records_repository.fetch_activities(fiscal_year, None),
            self.records_repository.fetch_disbursements(fiscal_year),
            self.records_repository.fetch_meetings(fiscal_year),
            self.records_repository.fetch_geography(),
        )?;
        let thresholds = &self.config.alert_thresholds;
        let metrics = compute_community_metrics(
            &activities,
            &disbursements,
            &meetings,
            &geography,
            thresholds,
        );
        let counts = AlertCounts::from_metrics(&metrics);
        Ok(MonitoringView {
            rows: apply_view(metrics, filter, sort, thresholds),
            counts,
        })
    }
}
