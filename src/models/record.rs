//! Expense record model
//!
//! A record is a single expense: what it was, how much it cost (in USD),
//! which category it belongs to and the day it happened.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::RecordId;
use super::money::Money;

/// A single expense record
///
/// Serialized with camelCase keys; the persisted collection and export files
/// are plain JSON arrays of these objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier
    pub id: RecordId,

    /// What the money was spent on
    pub description: String,

    /// Amount in USD, always positive
    pub amount: Money,

    /// Category label (e.g. "Dining Out")
    pub category: String,

    /// Day of the expense as `YYYY-MM-DD`
    ///
    /// Kept as text: the date rule is a coarse pattern and does not reject
    /// days that do not exist in a given month.
    pub date: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Create a record stamped with `at` for both timestamps
    pub fn new(
        id: RecordId,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            category: category.into(),
            date: date.into(),
            created_at: at,
            updated_at: at,
        }
    }

    /// The expense day as a calendar date, if it is a real one
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date, self.description, self.category, self.amount
        )
    }
}

/// Raw form input for a new record
///
/// Values are kept exactly as typed so validation sees what the user entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl NewRecord {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
        }
    }
}

/// Partial update for an existing record
///
/// A field is applied only when it is present and "truthy": blank text is
/// ignored, and so is an amount that parses to zero. There is no way to blank
/// a field through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn amount(mut self, value: impl Into<String>) -> Self {
        self.amount = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn date(mut self, value: impl Into<String>) -> Self {
        self.date = Some(value.into());
        self
    }

    /// The description, if it would be applied
    pub fn effective_description(&self) -> Option<&str> {
        truthy(self.description.as_deref())
    }

    /// The category, if it would be applied
    pub fn effective_category(&self) -> Option<&str> {
        truthy(self.category.as_deref())
    }

    /// The date, if it would be applied
    pub fn effective_date(&self) -> Option<&str> {
        truthy(self.date.as_deref())
    }

    /// The raw amount, if it would be applied
    ///
    /// Amounts that parse to zero are treated like an absent value.
    pub fn effective_amount(&self) -> Option<&str> {
        truthy(self.amount.as_deref()).filter(|raw| match raw.trim().parse::<f64>() {
            Ok(value) => value != 0.0,
            Err(_) => true,
        })
    }

    /// Check whether the update would change nothing but `updatedAt`
    pub fn is_empty(&self) -> bool {
        self.effective_description().is_none()
            && self.effective_amount().is_none()
            && self.effective_category().is_none()
            && self.effective_date().is_none()
    }
}

fn truthy(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
