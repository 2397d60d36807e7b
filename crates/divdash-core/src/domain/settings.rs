use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Numeric settings driving purchase counts and yield comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub investment_amount: f64,
    pub key_rate: f64,
    pub inflation: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            investment_amount: 10_000.0,
            key_rate: 7.5,
            inflation: 7.0,
        }
    }
}

/// Raw settings form input, validated as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInput {
    pub investment_amount: String,
    pub key_rate: String,
    pub inflation: String,
}

impl SettingsInput {
    pub fn new(
        investment_amount: impl Into<String>,
        key_rate: impl Into<String>,
        inflation: impl Into<String>,
    ) -> Self {
        Self {
            investment_amount: investment_amount.into(),
            key_rate: key_rate.into(),
            inflation: inflation.into(),
        }
    }

    /// Parses all three fields; any failure rejects the whole input.
    pub fn parse(&self) -> Result<Settings, ValidationError> {
        let investment_amount = parse_field("investment_amount", &self.investment_amount)?;
        let key_rate = parse_field("key_rate", &self.key_rate)?;
        let inflation = parse_field("inflation", &self.inflation)?;

        if investment_amount <= 0.0 {
            return Err(ValidationError::NonPositiveValue {
                field: "investment_amount",
            });
        }

        Ok(Settings {
            investment_amount,
            key_rate,
            inflation,
        })
    }
}

impl From<Settings> for SettingsInput {
    fn from(settings: Settings) -> Self {
        Self::new(
            settings.investment_amount.to_string(),
            settings.key_rate.to_string(),
            settings.inflation.to_string(),
        )
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value = raw
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_owned(),
        })?;

    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(value)
}
