use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(WriteError, "Error writing file.");

// Parsing-related.
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidJson, "Invalid {json_type} (invalid JSON format).", { json_type: &str });
define_client_error!(InvalidIsoDate, "Invalid ISO date: {date}.", { date: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(InvalidAmount, "Invalid amount: '{value}'.", { value: &str });
define_client_error!(
    InvalidRow,
    "Row from table '{table}' could not be read: {details}.",
    { table: &str, details: &str }
);
define_internal_error!(
    CsvExportFailed,
    "Failed to write monitoring report as CSV."
);

// Budget-related.
define_client_error!(
    NegativeBudgetValue,
    "Budget item '{item}' has a negative {field} ({value}).",
    { item: &str, field: &str, value: f64 }
);

// Status lifecycles.
define_client_error!(
    IllegalActivityTransition,
    "Activity '{activity}' cannot move from '{from}' to '{to}'.",
    { activity: &str, from: &str, to: &str }
);
define_client_error!(
    IllegalIdeaTransition,
    "Idea '{idea}' cannot move from '{from}' to '{to}'.",
    { idea: &str, from: &str, to: &str }
);
define_client_error!(
    MeetingNotOpen,
    "Meeting '{meeting}' is '{status}' and can no longer receive minutes.",
    { meeting: &str, status: &str }
);
define_client_error!(
    ReceiptAlreadyVerified,
    "Receipt '{receipt}' has already been verified.",
    { receipt: &str }
);

// Validation.
define_client_error!(
    MissingRequiredField,
    "Fund registration requires '{field}' when the fund source is '{fund_source}'.",
    { field: &str, fund_source: &str }
);
define_client_error!(
    UnexpectedField,
    "Fund registration must not set '{field}' when the fund source is '{fund_source}'.",
    { field: &str, fund_source: &str }
);
define_client_error!(
    NonPositiveAmount,
    "Amount received must be positive (got {amount}).",
    { amount: f64 }
);
define_client_error!(
    NonPositiveDisbursement,
    "Disbursement '{disbursement}' must have a positive amount (got {amount}).",
    { disbursement: &str, amount: f64 }
);
define_client_error!(
    ReceiptActivityMismatch,
    "Receipt '{receipt}' belongs to activity '{receipt_activity}', not '{activity}'.",
    { receipt: &str, receipt_activity: &str, activity: &str }
);
define_client_error!(
    ComplianceChecklistIncomplete,
    "Idea '{title}' cannot be submitted, unchecked compliance items: {items}.",
    { title: &str, items: &str }
);

// Permissions.
define_client_error!(
    PermissionDenied,
    "User '{user}' ({role}) is not allowed to {action}.",
    { user: &str, role: &str, action: &str }
);

// Backend and offline queue.
define_internal_error!(
    BackendRequestFailed,
    "Backend request on table '{table}' failed: {details}.",
    { table: &str, details: &str }
);
define_internal_error!(
    QueueStorageFailed,
    "Offline queue storage failed: {details}.",
    { details: &str }
);
