use std::path::PathBuf;

use fractic_server_error::ServerError;
use iso_currency::Currency;
use serde_derive::Deserialize;

use crate::{
    entities::KeywordMatch,
    errors::{InvalidIsoCurrencyCode, InvalidRon, ReadError},
};

/// Rate thresholds (percent) used by the alert rules.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Below this, a rate is critical.
    pub critical_rate: f64,
    /// Below this, a rate is a warning.
    pub warning_rate: f64,
}

/// Ratios applied when a commune rollup is internally inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommuneClamp {
    /// Disbursed is clamped to `budget * disbursed_ratio` when it exceeds the
    /// budget.
    pub disbursed_ratio: f64,
    /// Spent is clamped to `disbursed * spent_ratio` when it exceeds the
    /// (clamped) disbursed amount.
    pub spent_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FundCoreConfig {
    pub alert_thresholds: AlertThresholds,
    pub commune_clamp: CommuneClamp,
    pub keyword_match: KeywordMatch,
    /// ISO 4217 code used when rendering amounts.
    pub currency: String,
    /// JSON file backing the offline mutation queue.
    pub queue_path: Option<PathBuf>,
}

// --

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_rate: 30.0,
            warning_rate: 70.0,
        }
    }
}

impl Default for CommuneClamp {
    fn default() -> Self {
        Self {
            disbursed_ratio: 0.85,
            spent_ratio: 0.75,
        }
    }
}

impl Default for FundCoreConfig {
    fn default() -> Self {
        Self {
            alert_thresholds: AlertThresholds::default(),
            commune_clamp: CommuneClamp::default(),
            keyword_match: KeywordMatch::default(),
            currency: "VND".to_string(),
            queue_path: None,
        }
    }
}

impl FundCoreConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ServerError> {
        let config: FundCoreConfig =
            ron::from_str(s).map_err(|e| InvalidRon::with_debug("FundCoreConfig", &e))?;
        // Fail early on a bad currency rather than at render time.
        config.currency()?;
        Ok(config)
    }

    pub async fn from_file<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let s = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| ReadError::with_debug(&e))?;
        let config = Self::from_ron_str(&s)?;
        tracing::info!(path = %path.as_ref().display(), "loaded fund core config");
        Ok(config)
    }

    pub fn currency(&self) -> Result<Currency, ServerError> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&self.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_uses_defaults() {
        let config = FundCoreConfig::from_ron_str("()").unwrap();
        assert_eq!(config, FundCoreConfig::default());
        assert_eq!(config.currency().unwrap(), Currency::VND);
    }

    #[test]
    fn partial_ron_overrides_only_given_fields() {
        let config = FundCoreConfig::from_ron_str(
            "(alert_thresholds: (critical_rate: 25.0), keyword_match: WordBoundary)",
        )
        .unwrap();
        assert_eq!(config.alert_thresholds.critical_rate, 25.0);
        assert_eq!(config.alert_thresholds.warning_rate, 70.0);
        assert_eq!(config.keyword_match, KeywordMatch::WordBoundary);
        assert_eq!(config.commune_clamp, CommuneClamp::default());
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert!(FundCoreConfig::from_ron_str("(currency: \"XYZ\")").is_err());
    }

    #[test]
    fn malformed_ron_is_rejected() {
        assert!(FundCoreConfig::from_ron_str("(alert_thresholds: [").is_err());
    }
}
