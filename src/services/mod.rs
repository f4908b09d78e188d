//! Service layer for tally
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, auditing and computed figures.

pub mod budget;
pub mod record;

pub use budget::{BudgetService, BudgetStatus, BudgetSummary};
pub use record::RecordService;
