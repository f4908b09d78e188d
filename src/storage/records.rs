//! Record repository
//!
//! Holds the record collection in memory, newest first, and round-trips it
//! through the key-value store as one JSON array.

use chrono::{DateTime, Utc};

use crate::error::TallyResult;
use crate::models::{Record, RecordId};

use super::kv::KeyValueStore;

/// Store key for the record collection
pub const RECORDS_KEY: &str = "finance:data";

/// Store key for the last id sequence handed out
pub const SEQUENCE_KEY: &str = "finance:seq";

/// Repository for the record collection
#[derive(Debug, Default)]
pub struct RecordRepository {
    records: Vec<Record>,
    last_sequence: u64,
}

impl RecordRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from records already in memory
    pub fn from_records(records: Vec<Record>) -> Self {
        let last_sequence = highest_sequence(&records);
        Self {
            records,
            last_sequence,
        }
    }

    /// Load the collection from the store.
    ///
    /// Stored data that is not a valid record array is treated as an empty
    /// collection; the next save overwrites it.
    pub fn load(store: &dyn KeyValueStore) -> TallyResult<Self> {
        let records = match store.get(RECORDS_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Record>>(&raw) {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(error = %err, "stored records are corrupt, starting empty");
                    Vec::new()
                }
            },
        };

        let stored_sequence = store
            .get(SEQUENCE_KEY)?
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);

        let mut repo = Self::from_records(records);
        repo.last_sequence = repo.last_sequence.max(stored_sequence);
        tracing::debug!(count = repo.records.len(), "loaded records");
        Ok(repo)
    }

    /// Write the whole collection (and the id sequence) to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> TallyResult<()> {
        let json = serde_json::to_string(&self.records)?;
        store.set(RECORDS_KEY, &json)?;
        store.set(SEQUENCE_KEY, &self.last_sequence.to_string())?;
        Ok(())
    }

    /// Hand out a fresh id.
    ///
    /// The sequence part is `len + 1` for an append-only history and never
    /// repeats, even after deletions.
    pub fn next_id(&mut self, at: DateTime<Utc>) -> RecordId {
        let sequence = (self.records.len() as u64)
            .saturating_add(1)
            .max(self.last_sequence.saturating_add(1));
        self.last_sequence = sequence;
        RecordId::generate(sequence, at)
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// All records, newest first
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn get_mut(&mut self, id: &RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    /// Insert at the front of the collection
    pub fn insert_front(&mut self, record: Record) {
        self.records.insert(0, record);
    }

    /// Append at the end of the collection
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove the first record with this id
    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }
}

fn highest_sequence(records: &[Record]) -> u64 {
    records
        .iter()
        .filter_map(|r| r.id.sequence())
        .max()
        .unwrap_or(0)
        .max(records.len() as u64)
}
