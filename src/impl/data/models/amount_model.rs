use std::str::FromStr;

use fractic_server_error::ServerError;
use serde::Deserialize;

use crate::errors::InvalidAmount;

/// Monetary amount as stored by the backend. Accepts plain numbers, numeric
/// strings with thousands separators, accounting negatives ("(5,000)"), and
/// null (read as zero).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct AmountModel(pub f64);

impl FromStr for AmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().replace(',', "");
        if raw.is_empty() {
            return Ok(AmountModel(0.0));
        }
        let is_negative = raw.starts_with('(') && raw.ends_with(')');
        let numeric_part = raw.trim_matches(|c| c == '(' || c == ')');
        let amount = numeric_part
            .parse::<f64>()
            .map_err(|e| InvalidAmount::with_debug(s, &e))?;
        if !amount.is_finite() {
            return Err(InvalidAmount::new(s));
        }
        Ok(AmountModel(if is_negative { -amount } else { amount }))
    }
}

impl<'de> Deserialize<'de> for AmountModel {
    fn deserialize<D>(deserializer: D) -> Result<AmountModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde_derive::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(AmountModel(0.0)),
            Some(Raw::Number(n)) => Ok(AmountModel(n)),
            Some(Raw::Text(s)) => AmountModel::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}

impl From<AmountModel> for f64 {
    fn from(model: AmountModel) -> f64 {
        model.0
    }
}
