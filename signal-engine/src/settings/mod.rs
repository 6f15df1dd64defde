//! User order-guideline settings.
//!
//! Settings are read fully before each decision and treated as immutable
//! input. The checks run on the raw JSON values so that a boolean or a
//! string smuggled into a numeric field is rejected before any order
//! logic sees it.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const MAX_ORDER_VALUE_KEY: &str = "max_order_value";
pub const HIGH_RISK_ORDER_VALUE_KEY: &str = "high_risk_order_value";
pub const BUY_LIMIT_PERCENT_KEY: &str = "buy_limit_percent";
pub const STOP_LOSS_PERCENT_KEY: &str = "stop_loss_percent";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("setting {key} must be a plain number")]
    Type { key: String },
    #[error("setting {key} is out of range")]
    Range { key: String },
}

/// Per-user order guidelines. `max_order_value` caps the dollar value of
/// a standard open; `high_risk_order_value`, when configured, replaces it
/// for signals tagged high risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub max_order_value: f64,
    pub high_risk_order_value: Option<f64>,
    pub buy_limit_percent: f64,
    pub stop_loss_percent: f64,
}

/// Load and check settings from a JSON file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<UserSettings, SettingsError> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    settings_from_value(&value)
}

/// Build settings from a parsed JSON record, enforcing the type and
/// range rules and surfacing the non-fatal advisories.
pub fn settings_from_value(value: &Value) -> Result<UserSettings, SettingsError> {
    let settings = UserSettings {
        max_order_value: require_number(value, MAX_ORDER_VALUE_KEY)?,
        high_risk_order_value: optional_number(value, HIGH_RISK_ORDER_VALUE_KEY)?,
        buy_limit_percent: require_number(value, BUY_LIMIT_PERCENT_KEY)?,
        stop_loss_percent: require_number(value, STOP_LOSS_PERCENT_KEY)?,
    };
    check_ranges(&settings)?;
    warn_risky_values(&settings);
    Ok(settings)
}

fn require_number(value: &Value, key: &str) -> Result<f64, SettingsError> {
    match value.get(key) {
        // serde_json keeps booleans distinct from numbers, so `true`
        // never coerces into a usable value here.
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| SettingsError::Type {
            key: key.to_string(),
        }),
        _ => Err(SettingsError::Type {
            key: key.to_string(),
        }),
    }
}

fn optional_number(value: &Value, key: &str) -> Result<Option<f64>, SettingsError> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => require_number(value, key).map(Some),
    }
}

fn check_ranges(settings: &UserSettings) -> Result<(), SettingsError> {
    let range_err = |key: &str| SettingsError::Range {
        key: key.to_string(),
    };
    if !(settings.max_order_value > 0.0) {
        return Err(range_err(MAX_ORDER_VALUE_KEY));
    }
    if let Some(high_risk) = settings.high_risk_order_value {
        if !(high_risk >= 0.0) {
            return Err(range_err(HIGH_RISK_ORDER_VALUE_KEY));
        }
    }
    if !(settings.buy_limit_percent >= 0.0) {
        return Err(range_err(BUY_LIMIT_PERCENT_KEY));
    }
    if !(0.0..1.0).contains(&settings.stop_loss_percent) {
        return Err(range_err(STOP_LOSS_PERCENT_KEY));
    }
    Ok(())
}

/// Legal but risky values get an operator-visible warning; the decision
/// still proceeds.
fn warn_risky_values(settings: &UserSettings) {
    if settings.max_order_value < 500.0 {
        warn!(
            "maximum order value is {} (< $500); small orders may fail to purchase",
            settings.max_order_value
        );
    }
    if settings.buy_limit_percent >= 0.20 {
        warn!(
            "buy limit percent is {}; is that too risky?",
            settings.buy_limit_percent
        );
    }
    if settings.stop_loss_percent >= 0.30 {
        warn!(
            "stop loss percent is {}; is that too risky?",
            settings.stop_loss_percent
        );
    }
    if settings.stop_loss_percent <= 0.10 {
        warn!(
            "stop loss percent is {}; is that too low?",
            settings.stop_loss_percent
        );
    }
}

#[cfg(test)]
mod tests;
