//! Display currencies
//!
//! Every stored amount is in USD. A display currency only changes how an
//! amount is rendered, never what is stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the tracker can display amounts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar, the canonical storage currency
    #[default]
    Usd,
    /// Rwandan franc
    Rwf,
}

impl Currency {
    /// ISO code as persisted
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Rwf => "RWF",
        }
    }

    /// Units of this currency per one USD
    pub fn rate(&self) -> f64 {
        match self {
            Self::Usd => 1.0,
            Self::Rwf => 1300.0,
        }
    }

    /// Symbol shown after converted amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Rwf => "Fr",
        }
    }

    /// Look up a currency by its exact code; anything else yields `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(Self::Usd),
            "RWF" => Some(Self::Rwf),
            _ => None,
        }
    }

    /// Convert a USD amount and format it with two decimals and the symbol
    pub fn display(&self, amount_usd: f64) -> String {
        format!("{:.2} {}", amount_usd * self.rate(), self.symbol())
    }
}

/// Format a USD amount in the currency named by `code`.
///
/// Unknown codes fall back to USD's rate and symbol.
pub fn currency_display(amount_usd: f64, code: &str) -> String {
    Currency::from_code(code).unwrap_or_default().display(amount_usd)
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_ascii_uppercase())
            .ok_or_else(|| format!("Unsupported currency '{}'. Use USD or RWF", s))
    }
}
