use serde_derive::Serialize;

use super::{
    ids::{CommuneId, CommunityId},
    plan_activity::ActivityStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStatus {
    Missing,
    Partial,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Critical,
    Warning,
    Ok,
}

/// Raw per-community inputs to the alert rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricInputs {
    pub disbursement_rate: f64,
    pub spending_rate: f64,
    pub evidence_count: usize,
    pub expected_evidence_count: usize,
    pub has_pending_approval: bool,
    pub has_meeting_record: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityMetrics {
    pub community_id: CommunityId,
    pub community_name: String,
    pub commune_id: Option<CommuneId>,
    pub commune_name: Option<String>,
    pub activity_count: usize,
    pub budget: f64,
    pub disbursed: f64,
    pub spent: f64,
    pub disbursement_rate: f64,
    pub spending_rate: f64,
    pub evidence_count: usize,
    pub expected_evidence_count: usize,
    pub has_pending_approval: bool,
    pub has_meeting_record: bool,
    pub most_advanced_status: Option<ActivityStatus>,
    pub evidence_status: EvidenceStatus,
    pub alert_level: AlertLevel,
    pub needs_attention: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitoringFilter {
    #[default]
    All,
    NeedsAttention,
    LowDisbursement,
    LowSpending,
    MissingEvidence,
    PendingApproval,
    NoMeeting,
}

/// Always ascending: the worst communities come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitoringSort {
    DisbursementRate,
    SpendingRate,
    EvidenceCompletion,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub critical: usize,
    pub warning: usize,
    pub ok: usize,
    pub needs_attention: usize,
}

/// Filtered and sorted rows, with alert counts over all communities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringView {
    pub rows: Vec<CommunityMetrics>,
    pub counts: AlertCounts,
}

// --

impl CommunityMetrics {
    pub fn inputs(&self) -> MetricInputs {
        MetricInputs {
            disbursement_rate: self.disbursement_rate,
            spending_rate: self.spending_rate,
            evidence_count: self.evidence_count,
            expected_evidence_count: self.expected_evidence_count,
            has_pending_approval: self.has_pending_approval,
            has_meeting_record: self.has_meeting_record,
        }
    }

    /// Receipts per expected receipt, as a ratio (0 when nothing expected).
    pub fn evidence_completion(&self) -> f64 {
        if self.expected_evidence_count == 0 {
            0.0
        } else {
            self.evidence_count as f64 / self.expected_evidence_count as f64
        }
    }
}

impl AlertLevel {
    pub fn key(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "critical",
            AlertLevel::Warning => "warning",
            AlertLevel::Ok => "ok",
        }
    }
}

impl EvidenceStatus {
    pub fn key(&self) -> &'static str {
        match self {
            EvidenceStatus::Missing => "missing",
            EvidenceStatus::Partial => "partial",
            EvidenceStatus::Complete => "complete",
        }
    }
}

impl AlertCounts {
    pub fn from_metrics(metrics: &[CommunityMetrics]) -> Self {
        metrics.iter().fold(AlertCounts::default(), |mut acc, m| {
            match m.alert_level {
                AlertLevel::Critical => acc.critical += 1,
                AlertLevel::Warning => acc.warning += 1,
                AlertLevel::Ok => acc.ok += 1,
            }
            if m.needs_attention {
                acc.needs_attention += 1;
            }
            acc
        })
    }
}
