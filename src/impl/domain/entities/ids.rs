use serde_derive::{Deserialize, Serialize};

// Identifiers are opaque strings handed out by the backing store.

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(FiscalYearId);
define_id!(CommuneId);
define_id!(CommunityId);
define_id!(ActivityId);
define_id!(BudgetItemId);
define_id!(ReceiptId);
define_id!(IdeaId);
define_id!(MeetingId);
define_id!(FundRegistrationId);
define_id!(DisbursementId);
define_id!(UserId);
define_id!(SyncItemId);
