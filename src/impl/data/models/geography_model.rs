use serde_derive::Deserialize;

use crate::entities::{Commune, CommuneId, Community, CommunityId, FiscalYear, FiscalYearId};

use super::iso_date_model::ISODateModel;

#[derive(Debug, Deserialize)]
pub(crate) struct CommuneModel {
    id: CommuneId,
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommunityModel {
    id: CommunityId,
    commune_id: CommuneId,
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FiscalYearModel {
    id: FiscalYearId,
    year: i32,
    start_date: ISODateModel,
    end_date: ISODateModel,
}

// --

impl From<CommuneModel> for Commune {
    fn from(model: CommuneModel) -> Self {
        Commune {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<CommunityModel> for Community {
    fn from(model: CommunityModel) -> Self {
        Community {
            id: model.id,
            commune_id: model.commune_id,
            name: model.name,
        }
    }
}

impl From<FiscalYearModel> for FiscalYear {
    fn from(model: FiscalYearModel) -> Self {
        FiscalYear {
            id: model.id,
            year: model.year,
            start_date: model.start_date.into(),
            end_date: model.end_date.into(),
        }
    }
}
