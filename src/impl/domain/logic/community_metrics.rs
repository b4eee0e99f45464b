use std::collections::{BTreeMap, HashSet};

use crate::{
    config::AlertThresholds,
    entities::{
        ActivityStatus, CommunityId, CommunityMetrics, Disbursement, Geography, Meeting,
        MetricInputs, PlanActivity,
    },
};

use super::{
    alert_engine::{derive_alert_level, derive_evidence_status, needs_attention},
    utils::rate,
};

#[derive(Default)]
struct CommunityAcc {
    activity_count: usize,
    budget: f64,
    disbursed: f64,
    spent: f64,
    evidence_count: usize,
    expected_evidence_count: usize,
    has_pending_approval: bool,
    most_advanced_status: Option<ActivityStatus>,
}

/// Per-community monitoring rows for one fiscal year.
///
/// Disbursements count toward a community only when they name it and have
/// actually been paid out. Each budget item expects one receipt.
pub fn compute_community_metrics(
    activities: &[PlanActivity],
    disbursements: &[Disbursement],
    meetings: &[Meeting],
    geography: &Geography,
    thresholds: &AlertThresholds,
) -> Vec<CommunityMetrics> {
    let mut acc: BTreeMap<CommunityId, CommunityAcc> = BTreeMap::new();

    for activity in activities {
        let entry = acc.entry(activity.community_id.clone()).or_default();
        let spent_items: HashSet<_> = activity
            .receipts
            .iter()
            .filter_map(|r| r.budget_item_id.as_ref())
            .collect();
        entry.activity_count += 1;
        entry.budget += activity.total_budget();
        entry.spent += activity
            .budget_items
            .iter()
            .filter(|i| spent_items.contains(&i.id))
            .map(|i| i.amount)
            .sum::<f64>();
        entry.evidence_count += activity.receipts.len();
        entry.expected_evidence_count += activity.budget_items.len();
        entry.has_pending_approval |= activity.status == ActivityStatus::Submitted;
        entry.most_advanced_status = most_advanced(entry.most_advanced_status, activity.status);
    }

    for d in disbursements.iter().filter(|d| d.is_disbursed()) {
        if let Some(community) = &d.community_id {
            acc.entry(community.clone()).or_default().disbursed += d.amount;
        }
    }

    let with_record: HashSet<&CommunityId> = meetings
        .iter()
        .filter(|m| m.record.is_some())
        .map(|m| &m.community_id)
        .collect();

    acc.into_iter()
        .map(|(community_id, a)| {
            let inputs = MetricInputs {
                disbursement_rate: rate(a.disbursed, a.budget),
                spending_rate: rate(a.spent, a.disbursed),
                evidence_count: a.evidence_count,
                expected_evidence_count: a.expected_evidence_count,
                has_pending_approval: a.has_pending_approval,
                has_meeting_record: with_record.contains(&community_id),
            };
            let commune = geography.commune_of(&community_id);
            CommunityMetrics {
                community_name: geography.community_name(&community_id),
                commune_id: commune.map(|c| c.id.clone()),
                commune_name: commune.map(|c| c.name.clone()),
                activity_count: a.activity_count,
                budget: a.budget,
                disbursed: a.disbursed,
                spent: a.spent,
                disbursement_rate: inputs.disbursement_rate,
                spending_rate: inputs.spending_rate,
                evidence_count: inputs.evidence_count,
                expected_evidence_count: inputs.expected_evidence_count,
                has_pending_approval: inputs.has_pending_approval,
                has_meeting_record: inputs.has_meeting_record,
                most_advanced_status: a.most_advanced_status,
                evidence_status: derive_evidence_status(
                    inputs.evidence_count,
                    inputs.expected_evidence_count,
                ),
                alert_level: derive_alert_level(&inputs, thresholds),
                needs_attention: needs_attention(&inputs, thresholds),
                community_id,
            }
        })
        .collect()
}

/// Furthest status along the lifecycle; cancelled activities never win.
fn most_advanced(current: Option<ActivityStatus>, next: ActivityStatus) -> Option<ActivityStatus> {
    if next.stage().is_none() {
        return current;
    }
    match current {
        Some(c) if c.stage() >= next.stage() => Some(c),
        _ => Some(next),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone as _, Utc};

    use super::*;
    use crate::entities::{
        AlertLevel, BudgetItem, Commune, Community, DisbursementStatus, EvidenceStatus, FileType,
        ImplementationMethod, MeetingRecord, MeetingStatus, PaymentChannel, Receipt,
        RecipientType, Role, VotingMethod,
    };

    fn geography() -> Geography {
        Geography::new(
            vec![Commune { id: "c1".into(), name: "Ea Sol".into() }],
            vec![
                Community { id: "v1".into(), commune_id: "c1".into(), name: "Buon Ja".into() },
                Community { id: "v2".into(), commune_id: "c1".into(), name: "Buon Tul".into() },
            ],
        )
    }

    fn activity(id: &str, community: &str, status: ActivityStatus, receipts: usize) -> PlanActivity {
        let items: Vec<BudgetItem> = (0..2)
            .map(|n| BudgetItem {
                id: format!("{id}-i{n}").as_str().into(),
                activity_id: id.into(),
                name: "Seedlings".into(),
                unit: "tree".into(),
                quantity: 10.0,
                unit_cost: 5.0,
                amount: 50.0,
                family: None,
                program: None,
                remarks: None,
            })
            .collect();
        let receipts = items
            .iter()
            .take(receipts)
            .enumerate()
            .map(|(n, item)| Receipt {
                id: format!("{id}-r{n}").as_str().into(),
                activity_id: id.into(),
                budget_item_id: Some(item.id.clone()),
                file_ref: "r.pdf".into(),
                file_type: FileType::Pdf,
                uploaded_by: Role::CommunityCoordinator,
                uploaded_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                verified: false,
                verified_by: None,
                verified_at: None,
            })
            .collect();
        PlanActivity {
            id: id.into(),
            community_id: community.into(),
            fiscal_year_id: "fy".into(),
            name: "Nursery".into(),
            family: None,
            period_start: None,
            period_end: None,
            forest_owner_support: 100.0,
            community_contribution: 0.0,
            other_funds: 0.0,
            implementation_method: ImplementationMethod::Community,
            status,
            notes: None,
            budget_items: items,
            receipts,
        }
    }

    fn paid(community: &str, amount: f64) -> Disbursement {
        Disbursement {
            id: format!("d-{community}").as_str().into(),
            commune_id: "c1".into(),
            community_id: Some(community.into()),
            fiscal_year_id: "fy".into(),
            activity_id: None,
            recipient_type: RecipientType::ForestOwner,
            recipient_name: "Owner group".into(),
            amount,
            scheduled_date: None,
            payment_date: None,
            channel: PaymentChannel::Postal,
            status: DisbursementStatus::Disbursed,
            payment_order_ref: None,
        }
    }

    fn meeting(community: &str, with_record: bool) -> Meeting {
        Meeting {
            id: format!("m-{community}").as_str().into(),
            community_id: community.into(),
            fiscal_year_id: "fy".into(),
            title: "Annual planning".into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            time: None,
            location: "Community house".into(),
            chairperson: "Head of village".into(),
            agenda: vec![],
            status: if with_record { MeetingStatus::Completed } else { MeetingStatus::Scheduled },
            record: with_record.then(|| MeetingRecord {
                presentation_summary: "Plan".into(),
                discussion_points: vec![],
                voting_method: VotingMethod::ShowOfHands,
                voting_results: vec![],
                approved_contents: vec![],
            }),
        }
    }

    #[test]
    fn healthy_community_is_ok() {
        let metrics = compute_community_metrics(
            &[activity("a1", "v1", ActivityStatus::Ongoing, 2)],
            &[paid("v1", 100.0)],
            &[meeting("v1", true)],
            &geography(),
            &AlertThresholds::default(),
        );
        assert_eq!(metrics.len(), 1);
        let m = &metrics[0];
        assert_eq!(m.community_name, "Buon Ja");
        assert_eq!(m.commune_name.as_deref(), Some("Ea Sol"));
        assert_eq!(m.budget, 100.0);
        assert_eq!(m.disbursement_rate, 100.0);
        assert_eq!(m.spending_rate, 100.0);
        assert_eq!(m.evidence_status, EvidenceStatus::Complete);
        assert_eq!(m.alert_level, AlertLevel::Ok);
        assert!(!m.needs_attention);
    }

    #[test]
    fn weak_community_is_flagged() {
        let metrics = compute_community_metrics(
            &[
                activity("a1", "v2", ActivityStatus::Submitted, 1),
                activity("a2", "v2", ActivityStatus::Cancelled, 0),
            ],
            &[paid("v2", 50.0)],
            &[meeting("v2", false)],
            &geography(),
            &AlertThresholds::default(),
        );
        let m = &metrics[0];
        assert_eq!(m.activity_count, 2);
        assert_eq!(m.budget, 200.0);
        assert_eq!(m.disbursement_rate, 25.0);
        assert_eq!(m.evidence_status, EvidenceStatus::Partial);
        assert!(m.has_pending_approval);
        assert!(!m.has_meeting_record);
        assert_eq!(m.most_advanced_status, Some(ActivityStatus::Submitted));
        assert_eq!(m.alert_level, AlertLevel::Critical);
        assert!(m.needs_attention);
    }

    #[test]
    fn most_advanced_ignores_cancelled() {
        assert_eq!(most_advanced(None, ActivityStatus::Cancelled), None);
        assert_eq!(
            most_advanced(Some(ActivityStatus::Approved), ActivityStatus::Draft),
            Some(ActivityStatus::Approved)
        );
        assert_eq!(
            most_advanced(Some(ActivityStatus::Approved), ActivityStatus::Completed),
            Some(ActivityStatus::Completed)
        );
    }
}
