//! User settings for tally
//!
//! Two settings exist: the display currency and the budget cap. Each lives
//! under its own key in the key-value store and is written as soon as it
//! changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TallyError, TallyResult};
use crate::models::Currency;
use crate::storage::KeyValueStore;

/// Store key for the display currency code
pub const CURRENCY_KEY: &str = "app:currency";

/// Store key for the budget cap
pub const CAP_KEY: &str = "app:cap";

/// Budget cap used when none (or zero) is stored
pub const DEFAULT_BUDGET: f64 = 200.0;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Currency amounts are shown in
    pub display_currency: Currency,

    /// Spending cap in USD
    pub budget: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: Currency::Usd,
            budget: DEFAULT_BUDGET,
        }
    }
}

/// A change to one setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingUpdate {
    Currency(Currency),
    Cap(f64),
}

impl SettingUpdate {
    /// Build an update from a setting key (`currency` or `cap`) and raw text
    pub fn from_key_value(key: &str, value: &str) -> TallyResult<Self> {
        match key {
            "currency" => value
                .parse::<Currency>()
                .map(Self::Currency)
                .map_err(TallyError::Config),
            "cap" => Ok(Self::Cap(parse_cap(value))),
            other => Err(TallyError::Config(format!(
                "Unknown setting '{}'. Use 'currency' or 'cap'",
                other
            ))),
        }
    }

    /// The setting key this update targets
    pub fn key(&self) -> &'static str {
        match self {
            Self::Currency(_) => "currency",
            Self::Cap(_) => "cap",
        }
    }
}

impl fmt::Display for SettingUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Currency(currency) => write!(f, "currency = {}", currency),
            Self::Cap(cap) => write!(f, "cap = {}", cap),
        }
    }
}

/// Parse budget cap input; anything that is not a number becomes 0.
pub fn parse_cap(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

impl Settings {
    /// Read settings from the store, falling back to defaults.
    ///
    /// An unknown currency code becomes USD. A missing, unparseable or zero
    /// cap becomes [`DEFAULT_BUDGET`].
    pub fn load(store: &dyn KeyValueStore) -> TallyResult<Self> {
        let display_currency = store
            .get(CURRENCY_KEY)?
            .and_then(|code| Currency::from_code(&code))
            .unwrap_or_default();

        let budget = store
            .get(CAP_KEY)?
            .map(|raw| parse_cap(&raw))
            .filter(|cap| *cap != 0.0)
            .unwrap_or(DEFAULT_BUDGET);

        Ok(Self {
            display_currency,
            budget,
        })
    }

    /// Apply an update and persist it under its key
    pub fn apply(&mut self, update: SettingUpdate, store: &mut dyn KeyValueStore) -> TallyResult<()> {
        match update {
            SettingUpdate::Currency(currency) => {
                store.set(CURRENCY_KEY, currency.code())?;
                self.display_currency = currency;
            }
            SettingUpdate::Cap(cap) => {
                store.set(CAP_KEY, &cap.to_string())?;
                self.budget = cap;
            }
        }
        Ok(())
    }
}
