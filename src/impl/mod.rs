// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod fund_rows_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod activity_model;
        pub(crate) mod amount_model;
        pub(crate) mod disbursement_model;
        pub(crate) mod geography_model;
        pub(crate) mod iso_date_model;
        pub(crate) mod meeting_model;
        pub(crate) mod workflow_status_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod fund_records_repository_impl;
        pub(crate) mod sync_queue_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod classification;
        pub(crate) mod disbursement;
        pub(crate) mod fund_flow;
        pub(crate) mod fund_registration;
        pub(crate) mod geography;
        pub(crate) mod handlers;
        pub(crate) mod idea;
        pub(crate) mod ids;
        pub(crate) mod meeting;
        pub(crate) mod monitoring;
        pub(crate) mod plan_activity;
        pub(crate) mod sync;
        pub(crate) mod workflow;
    }
    pub(crate) mod logic {
        pub(crate) mod access_control;
        pub(crate) mod alert_engine;
        pub(crate) mod classifier;
        pub(crate) mod community_metrics;
        pub(crate) mod fund_flow_aggregator;
        pub(crate) mod lifecycle_impl;
        pub(crate) mod validation;
        pub(crate) mod workflow_engine;
        mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod fund_records_repository;
        pub(crate) mod sync_queue_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod dashboard_usecase;
        pub(crate) mod monitoring_usecase;
        pub(crate) mod submission_usecase;
        pub(crate) mod sync_usecase;
        pub(crate) mod workflow_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod amount_fmt;
    pub(crate) mod fund_flow_printer;
    pub(crate) mod monitoring_csv;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::classification::*;
        pub use crate::domain::entities::disbursement::*;
        pub use crate::domain::entities::fund_flow::*;
        pub use crate::domain::entities::fund_registration::*;
        pub use crate::domain::entities::geography::*;
        pub use crate::domain::entities::handlers::*;
        pub use crate::domain::entities::idea::*;
        pub use crate::domain::entities::ids::*;
        pub use crate::domain::entities::meeting::*;
        pub use crate::domain::entities::monitoring::*;
        pub use crate::domain::entities::plan_activity::*;
        pub use crate::domain::entities::sync::*;
        pub use crate::domain::entities::workflow::*;
    }

    pub mod logic {
        // Pure derivations, callable without a backend.
        pub use crate::domain::logic::alert_engine::{
            apply_view, derive_alert_level, derive_evidence_status, needs_attention,
        };
        pub use crate::domain::logic::classifier::{
            classify_cost_type, classify_family, classify_program, classify_program_for,
            Classifier,
        };
        pub use crate::domain::logic::community_metrics::compute_community_metrics;
        pub use crate::domain::logic::fund_flow_aggregator::{
            aggregate_fund_flow, drill_down, rate, FundFlowAggregator,
        };
        pub use crate::domain::logic::workflow_engine::{
            can_navigate, current_step_label, derive_workflow_steps,
        };
    }
}
