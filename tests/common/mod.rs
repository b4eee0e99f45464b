#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone as _, Utc};
use community_fund_core::{
    config::FundCoreConfig,
    entities::{
        ActivityStatus, BudgetItem, Commune, Community, Disbursement, DisbursementStatus,
        ExpenditureFamily, FileType, FiscalYear, ImplementationMethod, Meeting, MeetingRecord,
        MeetingStatus, PaymentChannel, PlanActivity, Receipt, RecipientType, Role, Table, User,
        VotingMethod,
    },
    ext::{
        standard_auth::RolePermissionProvider, standard_backends::InMemoryBackend,
        standard_storage::MemoryQueueStorage,
    },
    util::CommunityFundUtil,
};

pub const FY: &str = "fy2024";

pub type TestUtil =
    CommunityFundUtil<InMemoryBackend, Arc<MemoryQueueStorage>, RolePermissionProvider>;

pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.into(),
        name: id.to_string(),
        role,
    }
}

pub fn coordinator() -> User {
    user("coord-1", Role::CommunityCoordinator)
}

pub fn officer() -> User {
    user("officer-1", Role::CommuneOfficer)
}

pub fn member() -> User {
    user("member-1", Role::Member)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn item(id: &str, activity: &str, name: &str, quantity: f64, unit_cost: f64) -> BudgetItem {
    BudgetItem::new(id.into(), activity.into(), name, "unit", quantity, unit_cost).unwrap()
}

pub fn receipt(id: &str, activity: &str, item: &str, verified: bool) -> Receipt {
    Receipt {
        id: id.into(),
        activity_id: activity.into(),
        budget_item_id: Some(item.into()),
        file_ref: format!("{id}.pdf"),
        file_type: FileType::Pdf,
        uploaded_by: Role::CommunityCoordinator,
        uploaded_at: Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap(),
        verified,
        verified_by: verified.then(|| "officer-1".into()),
        verified_at: verified.then(|| Utc.with_ymd_and_hms(2024, 4, 3, 9, 0, 0).unwrap()),
    }
}

pub fn activity(
    id: &str,
    community: &str,
    name: &str,
    family: Option<ExpenditureFamily>,
    status: ActivityStatus,
    budget_items: Vec<BudgetItem>,
    receipts: Vec<Receipt>,
) -> PlanActivity {
    let total: f64 = budget_items.iter().map(|i| i.amount).sum();
    PlanActivity {
        id: id.into(),
        community_id: community.into(),
        fiscal_year_id: FY.into(),
        name: name.to_string(),
        family,
        period_start: Some(date(2024, 3, 1)),
        period_end: Some(date(2024, 11, 30)),
        forest_owner_support: total,
        community_contribution: 0.0,
        other_funds: 0.0,
        implementation_method: ImplementationMethod::Community,
        status,
        notes: None,
        budget_items,
        receipts,
    }
}

pub fn disbursement(id: &str, community: &str, amount: f64) -> Disbursement {
    Disbursement {
        id: id.into(),
        commune_id: "c-easol".into(),
        community_id: Some(community.into()),
        fiscal_year_id: FY.into(),
        activity_id: None,
        recipient_type: RecipientType::ForestOwner,
        recipient_name: "Forest owner group".into(),
        amount,
        scheduled_date: Some(date(2024, 2, 1)),
        payment_date: Some(date(2024, 2, 5)),
        channel: PaymentChannel::Bank,
        status: DisbursementStatus::Disbursed,
        payment_order_ref: None,
    }
}

pub fn meeting(id: &str, community: &str, minutes: bool) -> Meeting {
    Meeting {
        id: id.into(),
        community_id: community.into(),
        fiscal_year_id: FY.into(),
        title: "Annual planning meeting".into(),
        date: date(2024, 2, 20),
        time: None,
        location: "Community house".into(),
        chairperson: "Village head".into(),
        agenda: vec!["Budget".into(), "Plan".into()],
        status: if minutes {
            MeetingStatus::Completed
        } else {
            MeetingStatus::Scheduled
        },
        record: minutes.then(minutes_record),
    }
}

pub fn minutes_record() -> MeetingRecord {
    MeetingRecord {
        presentation_summary: "Fund allocation presented".into(),
        discussion_points: vec!["Patrol schedule".into()],
        voting_method: VotingMethod::ShowOfHands,
        voting_results: vec![],
        approved_contents: vec!["Annual plan".into()],
    }
}

/// One commune with two communities. Buon Ja is on track; Buon Tul has money
/// but no evidence and no minutes.
pub fn seeded_backend() -> InMemoryBackend {
    let activities = vec![
        activity(
            "a-patrol",
            "v-buonja",
            "Forest patrol",
            Some(ExpenditureFamily::ForestProtectionContracts),
            ActivityStatus::Ongoing,
            vec![
                item("i-patrol", "a-patrol", "Patrol allowance", 20.0, 150_000.0),
                item("i-fuel", "a-patrol", "Motorbike fuel", 10.0, 50_000.0),
            ],
            vec![
                receipt("r-patrol", "a-patrol", "i-patrol", true),
                receipt("r-fuel", "a-patrol", "i-fuel", false),
            ],
        ),
        activity(
            "a-cattle",
            "v-buonja",
            "Cattle bank",
            None,
            ActivityStatus::Approved,
            vec![item("i-cows", "a-cattle", "Breeding cows", 2.0, 1_000_000.0)],
            vec![receipt("r-cows", "a-cattle", "i-cows", false)],
        ),
        activity(
            "a-road",
            "v-buontul",
            "Village road repair",
            None,
            ActivityStatus::Submitted,
            vec![item("i-cement", "a-road", "Cement", 40.0, 100_000.0)],
            vec![],
        ),
    ];
    InMemoryBackend::new()
        .with_rows(
            Table::Communes,
            [Commune {
                id: "c-easol".into(),
                name: "Ea Sol".into(),
            }],
        )
        .and_then(|b| {
            b.with_rows(
                Table::Communities,
                [
                    Community {
                        id: "v-buonja".into(),
                        commune_id: "c-easol".into(),
                        name: "Buon Ja".into(),
                    },
                    Community {
                        id: "v-buontul".into(),
                        commune_id: "c-easol".into(),
                        name: "Buon Tul".into(),
                    },
                ],
            )
        })
        .and_then(|b| {
            b.with_rows(
                Table::FiscalYears,
                [
                    FiscalYear {
                        id: "fy2023".into(),
                        year: 2023,
                        start_date: date(2023, 1, 1),
                        end_date: date(2023, 12, 31),
                    },
                    FiscalYear {
                        id: FY.into(),
                        year: 2024,
                        start_date: date(2024, 1, 1),
                        end_date: date(2024, 12, 31),
                    },
                ],
            )
        })
        .and_then(|b| b.with_rows(Table::PlanActivities, activities))
        .and_then(|b| {
            b.with_rows(
                Table::Disbursements,
                [
                    disbursement("d-buonja", "v-buonja", 5_500_000.0),
                    disbursement("d-buontul", "v-buontul", 4_000_000.0),
                ],
            )
        })
        .and_then(|b| {
            b.with_rows(
                Table::Meetings,
                [
                    meeting("m-buonja", "v-buonja", true),
                    meeting("m-buontul", "v-buontul", false),
                ],
            )
        })
        .unwrap()
}

pub struct Harness {
    pub util: TestUtil,
    pub backend: Arc<InMemoryBackend>,
    pub storage: Arc<MemoryQueueStorage>,
}

pub fn harness_with(backend: InMemoryBackend) -> Harness {
    let backend = Arc::new(backend);
    let storage = Arc::new(MemoryQueueStorage::new());
    let util = CommunityFundUtil::new(
        backend.clone(),
        storage.clone(),
        RolePermissionProvider::new(),
        FundCoreConfig::default(),
    )
    .unwrap();
    Harness {
        util,
        backend,
        storage,
    }
}

pub fn harness() -> Harness {
    harness_with(seeded_backend())
}
