mod common;

use std::sync::Arc;

use chrono::{TimeZone as _, Utc};
use common::*;
use community_fund_core::{
    config::FundCoreConfig,
    entities::{
        ComplianceChecklist, DrainOutcome, Idea, IdeaStatus, Mutation, Record, SubmissionOutcome,
        Table,
    },
    ext::{
        standard_auth::RolePermissionProvider, standard_backends::InMemoryBackend,
        standard_storage::JsonFileQueueStorage,
    },
    util::CommunityFundUtil,
};
use tracing_test::traced_test;

fn idea(id: &str) -> Idea {
    let at = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
    Idea {
        id: id.into(),
        community_id: "v-buonja".into(),
        fiscal_year_id: FY.into(),
        submitted_by: "coord-1".into(),
        title: format!("Idea {id}"),
        description: "Community proposal".into(),
        category: None,
        status: IdeaStatus::Submitted,
        created_at: at,
        updated_at: at,
    }
}

fn insert_idea(id: &str) -> Mutation {
    Mutation::Insert {
        record: Record::Idea(idea(id)),
    }
}

#[tokio::test]
async fn empty_drain_touches_nothing() {
    let h = harness();
    let outcome = h.util.drain().await.unwrap();
    assert_eq!(outcome, DrainOutcome::default());
    assert_eq!(h.storage.write_count(), 0);
    assert!(h.backend.write_log().await.is_empty());
}

#[tokio::test]
async fn drain_replays_in_order_and_clears() {
    let h = harness();
    let user = coordinator().id;
    h.util.enqueue(&user, insert_idea("idea-a")).await.unwrap();
    h.util.enqueue(&user, insert_idea("idea-b")).await.unwrap();
    assert_eq!(h.util.pending_count().await.unwrap(), 2);

    let outcome = h.util.drain().await.unwrap();
    assert_eq!(outcome, DrainOutcome { success: 2, failed: 0 });
    assert_eq!(
        h.backend.write_log().await,
        vec!["insert ideas idea-a", "insert ideas idea-b"]
    );
    assert_eq!(h.util.pending_count().await.unwrap(), 0);
    assert!(h.storage.snapshot().await.is_empty());
    assert_eq!(h.storage.clear_count(), 1);
}

#[tokio::test]
async fn failed_items_stay_queued() {
    let h = harness();
    let user = coordinator().id;
    h.util.enqueue(&user, insert_idea("idea-a")).await.unwrap();
    h.util.enqueue(&user, insert_idea("idea-b")).await.unwrap();
    h.backend.reject("idea-a").await;
    h.backend.reject("idea-b").await;

    let outcome = h.util.drain().await.unwrap();
    assert_eq!(outcome, DrainOutcome { success: 0, failed: 2 });
    assert_eq!(h.util.pending_count().await.unwrap(), 2);
    assert_eq!(h.storage.clear_count(), 0);
    assert!(h.backend.write_log().await.is_empty());
}

#[tokio::test]
async fn a_failure_does_not_block_later_items() {
    let h = harness();
    let user = coordinator().id;
    h.util.enqueue(&user, insert_idea("idea-a")).await.unwrap();
    h.util.enqueue(&user, insert_idea("idea-b")).await.unwrap();
    h.backend.reject("idea-a").await;

    let first = h.util.drain().await.unwrap();
    assert_eq!(first, DrainOutcome { success: 1, failed: 1 });
    assert_eq!(h.backend.write_log().await, vec!["insert ideas idea-b"]);
    assert_eq!(h.util.pending_count().await.unwrap(), 1);
    assert_eq!(h.storage.clear_count(), 0);

    h.backend.accept("idea-a").await;
    let second = h.util.drain().await.unwrap();
    assert_eq!(second, DrainOutcome { success: 1, failed: 0 });
    assert_eq!(
        h.backend.write_log().await,
        vec!["insert ideas idea-b", "insert ideas idea-a"]
    );
    assert_eq!(h.util.pending_count().await.unwrap(), 0);
    assert_eq!(h.storage.clear_count(), 1);
}

#[tokio::test]
async fn item_queued_during_a_drain_waits_for_the_next_one() {
    let h = harness();
    let user = coordinator().id;
    h.util.enqueue(&user, insert_idea("idea-a")).await.unwrap();

    let hold = h.backend.hold_writes().await;
    let (first, queued) = tokio::join!(h.util.drain(), async {
        while h.backend.stalled_writes() == 0 {
            tokio::task::yield_now().await;
        }
        let queued = h.util.enqueue(&user, insert_idea("idea-b")).await;
        drop(hold);
        queued
    });
    queued.unwrap();

    assert_eq!(first.unwrap(), DrainOutcome { success: 1, failed: 0 });
    assert_eq!(h.backend.write_log().await, vec!["insert ideas idea-a"]);
    assert_eq!(h.util.pending_count().await.unwrap(), 1);
    assert_eq!(h.storage.clear_count(), 0);

    let second = h.util.drain().await.unwrap();
    assert_eq!(second, DrainOutcome { success: 1, failed: 0 });
    assert_eq!(
        h.backend.write_log().await,
        vec!["insert ideas idea-a", "insert ideas idea-b"]
    );
    assert_eq!(h.util.pending_count().await.unwrap(), 0);
    assert_eq!(h.storage.clear_count(), 1);
}

#[tokio::test]
async fn concurrent_drains_replay_each_item_once() {
    let h = harness();
    let user = coordinator().id;
    for n in 0..5 {
        h.util
            .enqueue(&user, insert_idea(&format!("idea-{n}")))
            .await
            .unwrap();
    }

    let (a, b) = tokio::join!(h.util.drain(), h.util.drain());
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.success + b.success, 5);
    assert_eq!(a.failed + b.failed, 0);
    assert_eq!(h.backend.write_log().await.len(), 5);
    assert_eq!(h.backend.rows(Table::Ideas).await.len(), 5);
}

#[tokio::test]
#[traced_test]
async fn replay_failures_are_logged() {
    let h = harness();
    h.util
        .enqueue(&coordinator().id, insert_idea("idea-a"))
        .await
        .unwrap();
    h.backend.reject("idea-a").await;
    h.util.drain().await.unwrap();
    assert!(logs_contain("replay failed"));
}

#[tokio::test]
async fn offline_submission_is_queued_then_synced() {
    let h = harness();
    h.backend.set_reachable(false);
    let checklist = ComplianceChecklist {
        benefits_community: true,
        within_eligible_categories: true,
        not_funded_elsewhere: true,
        no_forest_damage: true,
    };
    let outcome = h
        .util
        .submit_idea(&coordinator(), idea("idea-offline"), &checklist)
        .await
        .unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Queued(_)));
    assert!(h.backend.rows(Table::Ideas).await.is_empty());
    assert_eq!(h.util.pending_count().await.unwrap(), 1);

    h.backend.set_reachable(true);
    let drained = h.util.drain().await.unwrap();
    assert_eq!(drained, DrainOutcome { success: 1, failed: 0 });
    assert_eq!(h.backend.rows(Table::Ideas).await.len(), 1);
}

#[tokio::test]
async fn queue_survives_a_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = FundCoreConfig {
        queue_path: Some(dir.path().join("queue.json")),
        ..FundCoreConfig::default()
    };
    let backend = Arc::new(InMemoryBackend::new());

    {
        let util = CommunityFundUtil::with_defaults(backend.clone(), config.clone()).unwrap();
        util.enqueue(&coordinator().id, insert_idea("idea-a"))
            .await
            .unwrap();
    }
    assert!(dir.path().join("queue.json").exists());

    let util: CommunityFundUtil<InMemoryBackend, JsonFileQueueStorage, RolePermissionProvider> =
        CommunityFundUtil::with_defaults(backend.clone(), config).unwrap();
    assert_eq!(util.pending_count().await.unwrap(), 1);
    assert_eq!(
        util.drain().await.unwrap(),
        DrainOutcome { success: 1, failed: 0 }
    );
    assert!(!dir.path().join("queue.json").exists());
    assert_eq!(backend.write_log().await, vec!["insert ideas idea-a"]);
}
