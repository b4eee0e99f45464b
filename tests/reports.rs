mod common;

use common::*;
use community_fund_core::entities::{
    ActivityStatus, AlertLevel, CostType, EvidenceStatus, ExpenditureFamily, MonitoringFilter,
    MonitoringSort, ProgramCategory, Table,
};
use serde_json::json;
use tracing_test::traced_test;

#[tokio::test]
async fn dashboard_rolls_up_the_fiscal_year() {
    let h = harness();
    let summary = h.util.dashboard(&FY.into(), None).await.unwrap();

    assert_eq!(summary.total_income, 9_500_000.0);
    assert_eq!(summary.income_by_source.forest_owner_support, 9_500_000.0);
    // Patrol allowance, fuel and the cows have receipts; the cement does not.
    assert_eq!(summary.total_expenditure, 5_500_000.0);
    assert_eq!(summary.verified_expenditure, 3_000_000.0);
    assert_eq!(summary.balance, 4_000_000.0);
    assert_eq!(summary.unallocated(), summary.balance);

    assert_eq!(
        summary.expenditure_by_family[&ExpenditureFamily::ForestProtectionContracts],
        3_500_000.0
    );
    assert_eq!(
        summary.expenditure_by_family[&ExpenditureFamily::LivelihoodDevelopment],
        2_000_000.0
    );
    assert!(!summary
        .expenditure_by_family
        .contains_key(&ExpenditureFamily::CommunityInfrastructure));
    assert_eq!(
        summary.expenditure_by_program[&ProgramCategory::LivestockBreeding],
        2_000_000.0
    );
    assert_eq!(
        summary.expenditure_by_cost_type[&CostType::TransportFuel],
        500_000.0
    );
    let cost_total: f64 = summary.expenditure_by_cost_type.values().sum();
    assert_eq!(cost_total, summary.total_expenditure);

    assert_eq!(summary.commune_rollups.len(), 1);
    let commune = &summary.commune_rollups[0];
    assert_eq!(commune.commune_name, "Ea Sol");
    assert_eq!(commune.budget, 9_500_000.0);
    assert_eq!(commune.disbursed, 9_500_000.0);
    assert_eq!(commune.spent, 5_500_000.0);
    assert!(!commune.clamped);
}

#[tokio::test]
async fn dashboard_can_focus_on_one_community() {
    let h = harness();
    let summary = h
        .util
        .dashboard(&FY.into(), Some(&"v-buontul".into()))
        .await
        .unwrap();
    assert_eq!(summary.total_income, 4_000_000.0);
    assert_eq!(summary.total_expenditure, 0.0);
    assert_eq!(summary.balance, 4_000_000.0);
    assert_eq!(summary.commune_rollups[0].disbursed, 4_000_000.0);
}

#[tokio::test]
async fn drill_down_lists_spent_items_of_a_program() {
    let h = harness();
    let items = h
        .util
        .drill_down(
            &FY.into(),
            ExpenditureFamily::LivelihoodDevelopment,
            Some(ProgramCategory::LivestockBreeding),
        )
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_name, "Breeding cows");
    assert_eq!(items[0].community_name, "Buon Ja");

    let protection = h
        .util
        .drill_down(&FY.into(), ExpenditureFamily::ForestProtectionContracts, None)
        .await
        .unwrap();
    let amounts: Vec<f64> = protection.iter().map(|i| i.amount).collect();
    assert_eq!(amounts, vec![3_000_000.0, 500_000.0]);
}

#[tokio::test]
async fn overdisbursed_commune_is_clamped_and_marked() {
    let backend = seeded_backend()
        .with_rows(
            Table::Disbursements,
            [disbursement("d-extra", "v-buontul", 20_000_000.0)],
        )
        .unwrap();
    let h = harness_with(backend);
    let summary = h.util.dashboard(&FY.into(), None).await.unwrap();
    let commune = &summary.commune_rollups[0];
    assert!(commune.clamped);
    assert_eq!(commune.disbursed, commune.budget * 0.85);

    let text = h.util.summary_text(&FY.into(), None).await.unwrap();
    assert!(text.lines().any(|l| l.contains("Ea Sol") && l.ends_with(" *")));
}

#[tokio::test]
async fn monitoring_flags_the_weak_community() {
    let h = harness();
    let view = h
        .util
        .monitoring(&FY.into(), MonitoringFilter::All, None)
        .await
        .unwrap();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.counts.critical, 1);
    assert_eq!(view.counts.ok, 1);
    assert_eq!(view.counts.needs_attention, 1);

    let healthy = view
        .rows
        .iter()
        .find(|r| r.community_name == "Buon Ja")
        .unwrap();
    assert_eq!(healthy.alert_level, AlertLevel::Ok);
    assert_eq!(healthy.evidence_status, EvidenceStatus::Complete);
    assert_eq!(healthy.spending_rate, 100.0);
    assert_eq!(healthy.most_advanced_status, Some(ActivityStatus::Ongoing));

    let weak = view
        .rows
        .iter()
        .find(|r| r.community_name == "Buon Tul")
        .unwrap();
    assert_eq!(weak.alert_level, AlertLevel::Critical);
    assert_eq!(weak.evidence_status, EvidenceStatus::Missing);
    assert!(weak.has_pending_approval);
    assert!(!weak.has_meeting_record);
    assert!(weak.needs_attention);
}

#[tokio::test]
async fn monitoring_filters_but_counts_everything() {
    let h = harness();
    let view = h
        .util
        .monitoring(&FY.into(), MonitoringFilter::NoMeeting, None)
        .await
        .unwrap();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].community_name, "Buon Tul");
    assert_eq!(view.counts.ok + view.counts.warning + view.counts.critical, 2);

    let sorted = h
        .util
        .monitoring(
            &FY.into(),
            MonitoringFilter::All,
            Some(MonitoringSort::SpendingRate),
        )
        .await
        .unwrap();
    assert_eq!(sorted.rows[0].community_name, "Buon Tul");
}

#[tokio::test]
async fn monitoring_exports() {
    let h = harness();
    let csv = h
        .util
        .monitoring_csv(&FY.into(), MonitoringFilter::All, None)
        .await
        .unwrap();
    // Header plus one line per community.
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Buon Tul"));

    let text = h
        .util
        .monitoring_text(&FY.into(), MonitoringFilter::All, None)
        .await
        .unwrap();
    assert!(text.contains("Buon Ja"));
    assert!(text.contains("Buon Tul"));
}

#[tokio::test]
async fn fiscal_years_come_newest_first() {
    let h = harness();
    let years = h.util.fiscal_years().await.unwrap();
    let ids: Vec<_> = years.iter().map(|y| y.id.to_string()).collect();
    assert_eq!(ids, vec!["fy2024", "fy2023"]);
    assert!(years[0].contains(date(2024, 6, 1)));
}

#[tokio::test]
#[traced_test]
async fn invalid_budget_item_is_skipped_on_read() {
    let backend = seeded_backend()
        .with_rows(
            Table::BudgetItems,
            [json!({
                "id": "i-refund",
                "activity_id": "a-patrol",
                "name": "Patrol refund",
                "quantity": -1,
                "unit_cost": 10
            })],
        )
        .unwrap();
    let h = harness_with(backend);

    let summary = h.util.dashboard(&FY.into(), None).await.unwrap();
    assert_eq!(summary.total_expenditure, 5_500_000.0);
    assert!(h
        .util
        .monitoring(&FY.into(), MonitoringFilter::All, None)
        .await
        .is_ok());
    let protection = h
        .util
        .drill_down(&FY.into(), ExpenditureFamily::ForestProtectionContracts, None)
        .await
        .unwrap();
    assert!(protection.iter().all(|i| i.item_name != "Patrol refund"));
    assert!(logs_contain("skipping invalid budget item"));
}

#[tokio::test]
async fn unreachable_backend_fails_reads() {
    let h = harness();
    h.backend.set_reachable(false);
    assert!(h.util.dashboard(&FY.into(), None).await.is_err());
    assert!(h.util.monitoring(&FY.into(), MonitoringFilter::All, None).await.is_err());
}
