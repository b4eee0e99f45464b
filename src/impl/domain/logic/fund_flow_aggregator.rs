use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    config::CommuneClamp,
    entities::{
        BudgetItem, BudgetItemId, CommuneId, CommuneRollup, Disbursement, ExpenditureFamily,
        FundFlowSummary, Geography, IncomeBySource, PlanActivity, ProgramCategory,
        SpentItemDetail,
    },
};

use super::{classifier::Classifier, utils::accumulate};

pub use super::utils::rate;

/// Rolls activities, their budget items and receipts, and disbursements up
/// into income, spending and per-commune progress.
///
/// A budget item is spent iff at least one receipt references it; its full
/// amount then counts once, however many receipts it has.
pub struct FundFlowAggregator<'a> {
    classifier: Classifier,
    clamp: CommuneClamp,
    geography: &'a Geography,
}

#[derive(Default)]
struct RollupAcc {
    budget: f64,
    disbursed: f64,
    spent: f64,
}

/// Receipt coverage across the activities in scope.
struct SpentSet<'a> {
    with_receipt: HashSet<&'a BudgetItemId>,
    with_verified_receipt: HashSet<&'a BudgetItemId>,
}

impl<'a> SpentSet<'a> {
    fn new(activities: &'a [PlanActivity]) -> Self {
        let mut with_receipt = HashSet::new();
        let mut with_verified_receipt = HashSet::new();
        for receipt in activities.iter().flat_map(|a| &a.receipts) {
            if let Some(item_id) = &receipt.budget_item_id {
                with_receipt.insert(item_id);
                if receipt.verified {
                    with_verified_receipt.insert(item_id);
                }
            }
        }
        Self {
            with_receipt,
            with_verified_receipt,
        }
    }

    fn is_spent(&self, item: &BudgetItem) -> bool {
        self.with_receipt.contains(&item.id)
    }

    fn is_verified(&self, item: &BudgetItem) -> bool {
        self.with_verified_receipt.contains(&item.id)
    }
}

impl<'a> FundFlowAggregator<'a> {
    pub fn new(classifier: Classifier, clamp: CommuneClamp, geography: &'a Geography) -> Self {
        Self {
            classifier,
            clamp,
            geography,
        }
    }

    pub fn aggregate(
        &self,
        activities: &[PlanActivity],
        disbursements: &[Disbursement],
    ) -> FundFlowSummary {
        let spent_set = SpentSet::new(activities);

        let income_by_source = activities.iter().fold(IncomeBySource::default(), |acc, a| {
            IncomeBySource {
                forest_owner_support: acc.forest_owner_support + a.forest_owner_support,
                community_contribution: acc.community_contribution + a.community_contribution,
                other_funds: acc.other_funds + a.other_funds,
            }
        });
        let total_income = income_by_source.total();

        let mut expenditure_by_family = BTreeMap::new();
        let mut expenditure_by_program = BTreeMap::new();
        let mut expenditure_by_cost_type = BTreeMap::new();
        let mut verified_expenditure = 0.0;
        for activity in activities {
            for item in activity.budget_items.iter().filter(|i| spent_set.is_spent(i)) {
                let (family, program) = self.attribute(activity, item);
                accumulate(&mut expenditure_by_family, family, item.amount);
                if let Some(program) = program {
                    accumulate(&mut expenditure_by_program, program, item.amount);
                }
                accumulate(
                    &mut expenditure_by_cost_type,
                    self.classifier.cost_type(&item.name),
                    item.amount,
                );
                if spent_set.is_verified(item) {
                    verified_expenditure += item.amount;
                }
            }
        }
        let total_expenditure = expenditure_by_family.values().sum::<f64>();

        FundFlowSummary {
            income_by_source,
            total_income,
            expenditure_by_family,
            expenditure_by_program,
            expenditure_by_cost_type,
            total_expenditure,
            verified_expenditure,
            balance: total_income - total_expenditure,
            commune_rollups: self.commune_rollups(activities, disbursements, &spent_set),
        }
    }

    /// Spent items attributed to `family` (and to `program`, if given and the
    /// family is livelihood development), largest first.
    pub fn drill_down(
        &self,
        activities: &[PlanActivity],
        family: ExpenditureFamily,
        program: Option<ProgramCategory>,
    ) -> Vec<SpentItemDetail> {
        let spent_set = SpentSet::new(activities);
        let mut details: Vec<SpentItemDetail> = activities
            .iter()
            .flat_map(|activity| {
                activity
                    .budget_items
                    .iter()
                    .filter(|i| spent_set.is_spent(i))
                    .map(move |item| (activity, item))
            })
            .filter_map(|(activity, item)| {
                let (item_family, item_program) = self.attribute(activity, item);
                if item_family != family {
                    return None;
                }
                if let (Some(wanted), ExpenditureFamily::LivelihoodDevelopment) = (program, family)
                {
                    if item_program != Some(wanted) {
                        return None;
                    }
                }
                Some(SpentItemDetail {
                    budget_item_id: item.id.clone(),
                    item_name: item.name.clone(),
                    amount: item.amount,
                    activity_id: activity.id.clone(),
                    activity_name: activity.name.clone(),
                    community_id: activity.community_id.clone(),
                    community_name: self.geography.community_name(&activity.community_id),
                    family: item_family,
                    program: item_program,
                })
            })
            .collect();
        details.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        details
    }

    /// Family and, for livelihood development, program of a budget item.
    /// Explicit overrides on the item win, then the activity's category, then
    /// the keyword classifier.
    fn attribute(
        &self,
        activity: &PlanActivity,
        item: &BudgetItem,
    ) -> (ExpenditureFamily, Option<ProgramCategory>) {
        let family = item.family.or(activity.family).unwrap_or_else(|| {
            self.classifier
                .family(&item.name, Some(activity.name.as_str()))
        });
        let program = match family {
            ExpenditureFamily::LivelihoodDevelopment => Some(item.program.unwrap_or_else(|| {
                self.classifier
                    .program(&item.name, Some(activity.name.as_str()))
            })),
            _ => None,
        };
        (family, program)
    }

    fn commune_rollups(
        &self,
        activities: &[PlanActivity],
        disbursements: &[Disbursement],
        spent_set: &SpentSet<'_>,
    ) -> Vec<CommuneRollup> {
        let mut acc: HashMap<CommuneId, RollupAcc> = HashMap::new();

        for activity in activities {
            let Some(commune) = self.geography.commune_of(&activity.community_id) else {
                tracing::debug!(
                    activity = %activity.id,
                    community = %activity.community_id,
                    "activity community has no known commune; left out of commune rollup"
                );
                continue;
            };
            let entry = acc.entry(commune.id.clone()).or_default();
            entry.budget += activity.total_budget();
            entry.spent += activity
                .budget_items
                .iter()
                .filter(|i| spent_set.is_spent(i))
                .map(|i| i.amount)
                .sum::<f64>();
        }

        for d in disbursements.iter().filter(|d| d.is_disbursed()) {
            acc.entry(d.commune_id.clone()).or_default().disbursed += d.amount;
        }

        let mut rollups: Vec<CommuneRollup> = acc
            .into_iter()
            .map(|(commune_id, a)| {
                let (disbursed, spent, clamped) =
                    clamp_progress(a.budget, a.disbursed, a.spent, &self.clamp);
                if clamped {
                    tracing::debug!(
                        commune = %commune_id,
                        budget = a.budget,
                        disbursed = a.disbursed,
                        spent = a.spent,
                        "inconsistent commune totals clamped"
                    );
                }
                CommuneRollup {
                    commune_name: self.geography.commune_name(&commune_id),
                    commune_id,
                    budget: a.budget,
                    disbursed,
                    spent,
                    disbursement_rate: rate(disbursed, a.budget),
                    spending_rate: rate(spent, disbursed),
                    clamped,
                }
            })
            .collect();
        rollups.sort_by(|a, b| a.commune_name.cmp(&b.commune_name));
        rollups
    }
}

/// Keeps `budget >= disbursed >= spent` for the stacked progress bar. The
/// disbursed clamp is applied first; spent is then compared with the clamped
/// disbursed amount.
pub(crate) fn clamp_progress(
    budget: f64,
    disbursed: f64,
    spent: f64,
    clamp: &CommuneClamp,
) -> (f64, f64, bool) {
    let mut clamped = false;
    let disbursed = if disbursed > budget {
        clamped = true;
        budget * clamp.disbursed_ratio
    } else {
        disbursed
    };
    let spent = if spent > disbursed {
        clamped = true;
        disbursed * clamp.spent_ratio
    } else {
        spent
    };
    (disbursed, spent, clamped)
}

// Shorthand functions, using default classification and clamp ratios.

pub fn aggregate_fund_flow(
    activities: &[PlanActivity],
    disbursements: &[Disbursement],
    geography: &Geography,
) -> FundFlowSummary {
    FundFlowAggregator::new(Classifier::default(), CommuneClamp::default(), geography)
        .aggregate(activities, disbursements)
}

pub fn drill_down(
    activities: &[PlanActivity],
    geography: &Geography,
    family: ExpenditureFamily,
    program: Option<ProgramCategory>,
) -> Vec<SpentItemDetail> {
    FundFlowAggregator::new(Classifier::default(), CommuneClamp::default(), geography)
        .drill_down(activities, family, program)
}
