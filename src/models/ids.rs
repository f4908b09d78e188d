//! Record identifiers
//!
//! Ids are opaque strings on disk so that data written by older versions (or
//! hand-edited files) keeps loading. Freshly generated ids have the form
//! `txn_<seq>_<millis>` where `seq` is at least three digits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix for generated record ids
const RECORD_PREFIX: &str = "txn_";

/// Identifier of a single expense record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Build an id from a sequence number and the creation instant
    pub fn generate(sequence: u64, at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{:03}_{}",
            RECORD_PREFIX,
            sequence,
            at.timestamp_millis()
        ))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The sequence number embedded in a generated id, if this id has one
    pub fn sequence(&self) -> Option<u64> {
        let rest = self.0.strip_prefix(RECORD_PREFIX)?;
        let (seq, _) = rest.split_once('_')?;
        seq.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}
