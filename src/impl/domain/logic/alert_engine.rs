use crate::{
    config::AlertThresholds,
    entities::{
        AlertLevel, CommunityMetrics, EvidenceStatus, MetricInputs, MonitoringFilter,
        MonitoringSort,
    },
};

pub fn derive_evidence_status(evidence_count: usize, expected_evidence_count: usize) -> EvidenceStatus {
    if evidence_count == 0 {
        EvidenceStatus::Missing
    } else if evidence_count >= expected_evidence_count {
        EvidenceStatus::Complete
    } else {
        EvidenceStatus::Partial
    }
}

/// Critical conditions are checked first; a community meeting both critical
/// and warning conditions is critical.
pub fn derive_alert_level(inputs: &MetricInputs, thresholds: &AlertThresholds) -> AlertLevel {
    let evidence = derive_evidence_status(inputs.evidence_count, inputs.expected_evidence_count);
    if inputs.disbursement_rate < thresholds.critical_rate
        || inputs.spending_rate < thresholds.critical_rate
        || evidence == EvidenceStatus::Missing
    {
        AlertLevel::Critical
    } else if inputs.disbursement_rate < thresholds.warning_rate
        || inputs.spending_rate < thresholds.warning_rate
        || evidence != EvidenceStatus::Complete
        || inputs.has_pending_approval
        || !inputs.has_meeting_record
    {
        AlertLevel::Warning
    } else {
        AlertLevel::Ok
    }
}

/// Independent of `derive_alert_level`: rates only count below the critical
/// threshold, but any incomplete evidence does.
pub fn needs_attention(inputs: &MetricInputs, thresholds: &AlertThresholds) -> bool {
    let evidence = derive_evidence_status(inputs.evidence_count, inputs.expected_evidence_count);
    inputs.disbursement_rate < thresholds.critical_rate
        || inputs.spending_rate < thresholds.critical_rate
        || evidence != EvidenceStatus::Complete
        || inputs.has_pending_approval
        || !inputs.has_meeting_record
}

fn matches_filter(m: &CommunityMetrics, filter: MonitoringFilter, thresholds: &AlertThresholds) -> bool {
    match filter {
        MonitoringFilter::All => true,
        MonitoringFilter::NeedsAttention => m.needs_attention,
        MonitoringFilter::LowDisbursement => m.disbursement_rate < thresholds.critical_rate,
        MonitoringFilter::LowSpending => m.spending_rate < thresholds.critical_rate,
        MonitoringFilter::MissingEvidence => m.evidence_status != EvidenceStatus::Complete,
        MonitoringFilter::PendingApproval => m.has_pending_approval,
        MonitoringFilter::NoMeeting => !m.has_meeting_record,
    }
}

/// Filters, then sorts ascending so the weakest communities lead. The sort is
/// stable; ties keep their input order.
pub fn apply_view(
    metrics: Vec<CommunityMetrics>,
    filter: MonitoringFilter,
    sort: Option<MonitoringSort>,
    thresholds: &AlertThresholds,
) -> Vec<CommunityMetrics> {
    let mut rows: Vec<CommunityMetrics> = metrics
        .into_iter()
        .filter(|m| matches_filter(m, filter, thresholds))
        .collect();
    if let Some(sort) = sort {
        rows.sort_by(|a, b| match sort {
            MonitoringSort::DisbursementRate => a.disbursement_rate.total_cmp(&b.disbursement_rate),
            MonitoringSort::SpendingRate => a.spending_rate.total_cmp(&b.spending_rate),
            MonitoringSort::EvidenceCompletion => {
                a.evidence_completion().total_cmp(&b.evidence_completion())
            }
        });
    }
    rows
}
