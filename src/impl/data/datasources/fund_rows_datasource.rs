use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde::de::DeserializeOwned;

use crate::{
    data::models::{
        activity_model::PlanActivityModel,
        disbursement_model::DisbursementModel,
        geography_model::{CommuneModel, CommunityModel, FiscalYearModel},
        meeting_model::MeetingModel,
        workflow_status_model::WorkflowStatusModel,
    },
    entities::{
        Commune, Community, CommunityId, Disbursement, FiscalYear, FiscalYearId, FundBackend,
        Meeting, Mutation, PlanActivity, RowFilter, Table, WorkflowStatus,
    },
    errors::{BackendRequestFailed, InvalidRow},
};

/// Typed reads and writes over the rows of a `FundBackend`.
#[async_trait]
pub(crate) trait FundRowsDatasource: Send + Sync {
    async fn activities(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<Vec<PlanActivity>, ServerError>;
    async fn disbursements(
        &self,
        fiscal_year: &FiscalYearId,
    ) -> Result<Vec<Disbursement>, ServerError>;
    async fn meetings(&self, fiscal_year: &FiscalYearId) -> Result<Vec<Meeting>, ServerError>;
    async fn communes(&self) -> Result<Vec<Commune>, ServerError>;
    async fn communities(&self) -> Result<Vec<Community>, ServerError>;
    async fn fiscal_years(&self) -> Result<Vec<FiscalYear>, ServerError>;
    async fn workflow_status(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<Option<WorkflowStatus>, ServerError>;
    async fn apply(&self, mutation: &Mutation) -> Result<(), ServerError>;
    async fn is_reachable(&self) -> bool;
}

pub(crate) struct FundRowsDatasourceImpl<B: FundBackend> {
    backend: Arc<B>,
}

impl<B: FundBackend> FundRowsDatasourceImpl<B> {
    pub(crate) fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    async fn select<M: DeserializeOwned>(
        &self,
        table: Table,
        filter: RowFilter,
    ) -> Result<Vec<M>, ServerError> {
        self.backend
            .select(table, &filter)
            .await?
            .into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| InvalidRow::with_debug(table.name(), &e.to_string(), &e))
            })
            .collect()
    }
}

#[async_trait]
impl<B: FundBackend> FundRowsDatasource for FundRowsDatasourceImpl<B> {
    async fn activities(
        &self,
        fiscal_year: &FiscalYearId,
        community: Option<&CommunityId>,
    ) -> Result<Vec<PlanActivity>, ServerError> {
        let mut filter = RowFilter::new().eq("fiscal_year_id", fiscal_year);
        if let Some(community) = community {
            filter = filter.eq("community_id", community);
        }
        Ok(self
            .select::<PlanActivityModel>(Table::PlanActivities, filter.order_desc("period_start"))
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn disbursements(
        &self,
        fiscal_year: &FiscalYearId,
    ) -> Result<Vec<Disbursement>, ServerError> {
        let filter = RowFilter::new()
            .eq("fiscal_year_id", fiscal_year)
            .eq("status", "disbursed");
        Ok(self
            .select::<DisbursementModel>(Table::Disbursements, filter)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn meetings(&self, fiscal_year: &FiscalYearId) -> Result<Vec<Meeting>, ServerError> {
        let filter = RowFilter::new().eq("fiscal_year_id", fiscal_year);
        Ok(self
            .select::<MeetingModel>(Table::Meetings, filter)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn communes(&self) -> Result<Vec<Commune>, ServerError> {
        Ok(self
            .select::<CommuneModel>(Table::Communes, RowFilter::new().order_asc("name"))
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn communities(&self) -> Result<Vec<Community>, ServerError> {
        Ok(self
            .select::<CommunityModel>(Table::Communities, RowFilter::new().order_asc("name"))
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn fiscal_years(&self) -> Result<Vec<FiscalYear>, ServerError> {
        Ok(self
            .select::<FiscalYearModel>(Table::FiscalYears, RowFilter::new().order_desc("year"))
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn workflow_status(
        &self,
        community: &CommunityId,
        fiscal_year: &FiscalYearId,
    ) -> Result<Option<WorkflowStatus>, ServerError> {
        let filter = RowFilter::new()
            .eq("community_id", community)
            .eq("fiscal_year_id", fiscal_year);
        Ok(self
            .select::<WorkflowStatusModel>(Table::WorkflowStatus, filter)
            .await?
            .into_iter()
            .next()
            .map(Into::into))
    }

    async fn apply(&self, mutation: &Mutation) -> Result<(), ServerError> {
        let table = mutation.table();
        match mutation {
            Mutation::Insert { record } => {
                let row = record
                    .to_row()
                    .map_err(|e| BackendRequestFailed::with_debug(table.name(), "encode", &e))?;
                self.backend.insert(table, row).await
            }
            Mutation::Update { id, record } => {
                let row = record
                    .to_row()
                    .map_err(|e| BackendRequestFailed::with_debug(table.name(), "encode", &e))?;
                self.backend.update(table, id, row).await
            }
            Mutation::Delete { id, .. } => self.backend.delete(table, id).await,
        }
    }

    async fn is_reachable(&self) -> bool {
        self.backend.is_reachable().await
    }
}
