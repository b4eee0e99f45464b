use chrono::{NaiveDate, NaiveTime};
use serde_derive::{Deserialize, Serialize};

use super::ids::{CommunityId, FiscalYearId, MeetingId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingMethod {
    ShowOfHands,
    SecretBallot,
    Consensus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingResult {
    pub content: String,
    pub agree_count: u32,
    pub total_attendees: u32,
}

/// Filled-in minutes of a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub presentation_summary: String,
    pub discussion_points: Vec<String>,
    pub voting_method: VotingMethod,
    pub voting_results: Vec<VotingResult>,
    pub approved_contents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub community_id: CommunityId,
    pub fiscal_year_id: FiscalYearId,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub location: String,
    pub chairperson: String,
    pub agenda: Vec<String>,
    pub status: MeetingStatus,
    pub record: Option<MeetingRecord>,
}

// --

impl MeetingStatus {
    pub fn key(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }
}

impl VotingResult {
    /// Share of attendees in favour, in percent.
    pub fn approval_rate(&self) -> f64 {
        if self.total_attendees == 0 {
            0.0
        } else {
            self.agree_count as f64 / self.total_attendees as f64 * 100.0
        }
    }

    /// Simple majority of attendees.
    pub fn passed(&self) -> bool {
        self.agree_count * 2 > self.total_attendees
    }
}
