//! Reports module for tally
//!
//! Provides the dashboard: headline totals, budget status and the
//! seven-day spending trend.

pub mod dashboard;

pub use dashboard::{top_category, DashboardReport, SpendingTrend, TREND_DAYS};
