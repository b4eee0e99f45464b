use chrono::NaiveTime;
use serde_derive::Deserialize;

use crate::entities::{
    CommunityId, FiscalYearId, Meeting, MeetingId, MeetingRecord, MeetingStatus,
};

use super::iso_date_model::ISODateModel;

/// Row of `meetings`; the minutes, once filed, are embedded as `record`.
#[derive(Debug, Deserialize)]
pub(crate) struct MeetingModel {
    id: MeetingId,
    community_id: CommunityId,
    fiscal_year_id: FiscalYearId,
    #[serde(default)]
    title: String,
    #[serde(alias = "meeting_date")]
    date: ISODateModel,
    #[serde(default)]
    time: Option<NaiveTime>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    chairperson: String,
    #[serde(default)]
    agenda: Vec<String>,
    status: MeetingStatus,
    #[serde(default)]
    record: Option<MeetingRecord>,
}

// --

impl From<MeetingModel> for Meeting {
    fn from(model: MeetingModel) -> Self {
        Meeting {
            id: model.id,
            community_id: model.community_id,
            fiscal_year_id: model.fiscal_year_id,
            title: model.title,
            date: model.date.into(),
            time: model.time,
            location: model.location,
            chairperson: model.chairperson,
            agenda: model.agenda,
            status: model.status,
            record: model.record,
        }
    }
}
