//! Core data models for tally
//!
//! This module contains the data structures that represent the expense
//! tracking domain: records, their identifiers, money and display currencies.

pub mod currency;
pub mod ids;
pub mod money;
pub mod record;

pub use currency::{currency_display, Currency};
pub use ids::RecordId;
pub use money::{Money, MoneyParseError};
pub use record::{NewRecord, Record, RecordUpdate};
