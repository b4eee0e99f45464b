use fractic_server_error::ServerError;

use crate::{entities::CommunityMetrics, errors::CsvExportFailed};

const HEADER: [&str; 14] = [
    "community_id",
    "community",
    "commune",
    "activities",
    "budget",
    "disbursed",
    "spent",
    "disbursement_rate",
    "spending_rate",
    "evidence",
    "expected_evidence",
    "evidence_status",
    "alert_level",
    "needs_attention",
];

/// Monitoring rows as CSV, one line per community, in the given order.
/// Amounts are raw numbers so the file re-imports cleanly.
pub(crate) fn write_monitoring_csv(rows: &[CommunityMetrics]) -> Result<String, ServerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| CsvExportFailed::with_debug(&e))?;
    for m in rows {
        writer
            .write_record([
                m.community_id.to_string(),
                m.community_name.clone(),
                m.commune_name.clone().unwrap_or_default(),
                m.activity_count.to_string(),
                m.budget.to_string(),
                m.disbursed.to_string(),
                m.spent.to_string(),
                format!("{:.2}", m.disbursement_rate),
                format!("{:.2}", m.spending_rate),
                m.evidence_count.to_string(),
                m.expected_evidence_count.to_string(),
                m.evidence_status.key().to_string(),
                m.alert_level.key().to_string(),
                m.needs_attention.to_string(),
            ])
            .map_err(|e| CsvExportFailed::with_debug(&e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvExportFailed::with_debug(e.error()))?;
    String::from_utf8(bytes).map_err(|e| CsvExportFailed::with_debug(&e))
}
