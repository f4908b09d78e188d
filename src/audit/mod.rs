//! Audit logging for tally
//!
//! Records every create, update and delete of a record, and every setting
//! change, with before/after values in an append-only JSONL file.
//!
//! - `AuditEntry`: one operation on one entity
//! - `AuditLogger`: appends entries to the log and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
