//! Key-value stores
//!
//! All persisted state is a handful of string values under fixed keys. The
//! file-backed store keeps the whole map in memory and rewrites the file
//! atomically on every `set`.

use std::path::PathBuf;

use chrono::Utc;

use crate::error::TallyResult;

use super::file_io::{read_store, set_aside, write_store, Entries, StoreFile};

/// Synchronous string-keyed, string-valued storage
pub trait KeyValueStore {
    /// Get the value under `key`, if any
    fn get(&self, key: &str) -> TallyResult<Option<String>>;

    /// Set `key` to `value`, persisting immediately
    fn set(&mut self, key: &str, value: &str) -> TallyResult<()>;
}

/// Store backed by a single JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Entries,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A file that does not parse is moved
    /// aside and the store starts empty.
    pub fn open(path: PathBuf) -> TallyResult<Self> {
        let entries = match read_store(&path)? {
            StoreFile::Missing => Entries::new(),
            StoreFile::Entries(entries) => entries,
            StoreFile::Unreadable(err) => {
                let moved = set_aside(&path, Utc::now())?;
                tracing::warn!(
                    error = %err,
                    moved_to = %moved.display(),
                    "store file unreadable, starting empty"
                );
                Entries::new()
            }
        };
        Ok(Self { path, entries })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> TallyResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TallyResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        write_store(&self.path, &self.entries)
    }
}

/// Store that lives only as long as the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Entries,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TallyResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TallyResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
