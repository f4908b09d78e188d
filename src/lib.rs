//! tally - Terminal-based personal expense tracker
//!
//! This library provides the core functionality for the tally expense
//! tracker: validated expense records, regex search with match highlighting,
//! sortable listings, currency display and budget alerts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (records, money, currencies)
//! - `validation`: Field rules and structural checks for imports
//! - `search`: Pattern compilation, filtering and highlighting
//! - `storage`: Key-value persistence and application state
//! - `services`: Business logic layer
//! - `query`: Sort, filter and display-row projection
//! - `reports`: Dashboard figures
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally_cli::models::NewRecord;
//! use tally_cli::services::RecordService;
//! use tally_cli::storage::Storage;
//!
//! let mut storage = Storage::in_memory();
//! let mut records = RecordService::new(&mut storage);
//! records.add_record(NewRecord::new("Lunch", "12.50", "Food", "2024-01-01"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod query;
pub mod reports;
pub mod search;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{TallyError, TallyResult};
