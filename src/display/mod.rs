//! Display formatting for terminal output
//!
//! Provides utilities for formatting records and reports for terminal
//! display, including tables and bar charts.

pub mod record;
pub mod report;

pub use record::{format_record_details, format_record_list, format_record_table};
