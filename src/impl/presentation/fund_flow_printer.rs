use iso_currency::Currency;

use crate::entities::{FundFlowSummary, MonitoringView};

use super::amount_fmt::{format_amount, format_rate};

pub(crate) struct FundFlowPrinter {
    currency: Currency,
}

impl FundFlowPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub(crate) fn print_summary(&self, summary: &FundFlowSummary) -> String {
        let mut out = String::new();

        out.push_str("--- Income ---------------------------------------------------------------\n\n");
        let income = &summary.income_by_source;
        self.print_line(&mut out, "Forest owner support", income.forest_owner_support);
        self.print_line(&mut out, "Community contribution", income.community_contribution);
        self.print_line(&mut out, "Other funds", income.other_funds);
        self.print_line(&mut out, "Total income", summary.total_income);
        out.push('\n');

        out.push_str("--- Expenditure ----------------------------------------------------------\n\n");
        for (family, amount) in &summary.expenditure_by_family {
            self.print_line(&mut out, family.label(), *amount);
        }
        if !summary.expenditure_by_program.is_empty() {
            out.push_str("\n  Livelihood programs\n");
            for (program, amount) in &summary.expenditure_by_program {
                self.print_line(&mut out, &format!("  {}", program.label()), *amount);
            }
        }
        if !summary.expenditure_by_cost_type.is_empty() {
            out.push_str("\n  By cost type\n");
            for (cost_type, amount) in &summary.expenditure_by_cost_type {
                self.print_line(&mut out, &format!("  {}", cost_type.label()), *amount);
            }
        }
        out.push('\n');
        self.print_line(&mut out, "Total expenditure", summary.total_expenditure);
        self.print_line(&mut out, "Backed by verified receipts", summary.verified_expenditure);
        self.print_line(&mut out, "Balance", summary.balance);
        out.push('\n');

        if !summary.commune_rollups.is_empty() {
            out.push_str("--- Communes -------------------------------------------------------------\n\n");
            out.push_str(&format!(
                "{:24} {:>18} {:>18} {:>18} {:>8} {:>8}\n",
                "Commune", "Budget", "Disbursed", "Spent", "Disb.", "Spent"
            ));
            for rollup in &summary.commune_rollups {
                out.push_str(&format!(
                    "{:24} {:>18} {:>18} {:>18} {:>8} {:>8}{}\n",
                    rollup.commune_name,
                    format_amount(rollup.budget, self.currency),
                    format_amount(rollup.disbursed, self.currency),
                    format_amount(rollup.spent, self.currency),
                    format_rate(rollup.disbursement_rate),
                    format_rate(rollup.spending_rate),
                    if rollup.clamped { " *" } else { "" },
                ));
            }
            let clamped: Vec<&str> = summary
                .commune_rollups
                .iter()
                .filter(|r| r.clamped)
                .map(|r| r.commune_name.as_str())
                .collect();
            if !clamped.is_empty() {
                let note = format!(
                    "* Recorded disbursements or spending exceed what the plan allows in {}. \
                     Figures are capped for display; check the underlying records.",
                    clamped.join(", ")
                );
                out.push('\n');
                for line in textwrap::wrap(&note, 74) {
                    out.push_str(&format!("{}\n", line));
                }
            }
        }

        out
    }

    /// One line per community, worst first as the view was sorted.
    pub(crate) fn print_monitoring(&self, view: &MonitoringView) -> String {
        let mut out = format!(
            "critical: {}  warning: {}  ok: {}  needs attention: {}\n\n",
            view.counts.critical, view.counts.warning, view.counts.ok, view.counts.needs_attention
        );
        for row in &view.rows {
            out.push_str(&format!(
                "[{:8}] {:24} disb. {:>7}  spent {:>7}  evidence {}/{} ({})\n",
                row.alert_level.key(),
                row.community_name,
                format_rate(row.disbursement_rate),
                format_rate(row.spending_rate),
                row.evidence_count,
                row.expected_evidence_count,
                row.evidence_status.key(),
            ));
        }
        out
    }

    fn print_line(&self, out: &mut String, label: &str, amount: f64) {
        out.push_str(&format!(
            "{:48} {:>24}\n",
            label,
            format_amount(amount, self.currency)
        ));
    }
}
