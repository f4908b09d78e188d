//! Storage layer for tally
//!
//! Persisted state is a small key-value map (see [`KeyValueStore`]). The
//! [`Storage`] object owns that store together with the in-memory record
//! collection, the loaded settings and the audit logger, and tells registered
//! listeners whenever something changes.

pub mod file_io;
pub mod kv;
pub mod records;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use records::{RecordRepository, RECORDS_KEY, SEQUENCE_KEY};

use std::fmt;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TallyPaths;
use crate::config::settings::{SettingUpdate, Settings};
use crate::error::TallyResult;

/// What a change notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Records,
    Settings,
}

type Listener = Box<dyn FnMut(Change)>;

/// Application state: store, records, settings and change listeners
pub struct Storage {
    paths: Option<TallyPaths>,
    store: Box<dyn KeyValueStore>,
    pub records: RecordRepository,
    pub settings: Settings,
    audit: Option<AuditLogger>,
    listeners: Vec<Listener>,
}

impl Storage {
    /// Open the file-backed store under `paths`, creating directories as needed
    pub fn open(paths: TallyPaths) -> TallyResult<Self> {
        paths.ensure_directories()?;

        let store = JsonFileStore::open(paths.store_file())?;
        let audit = AuditLogger::new(paths.audit_log());
        let mut storage = Self::with_store(Box::new(store))?;
        storage.audit = Some(audit);
        storage.paths = Some(paths);
        Ok(storage)
    }

    /// Load state from an arbitrary store, without an audit log
    pub fn with_store(store: Box<dyn KeyValueStore>) -> TallyResult<Self> {
        let records = RecordRepository::load(&*store)?;
        let settings = Settings::load(&*store)?;

        Ok(Self {
            paths: None,
            store,
            records,
            settings,
            audit: None,
            listeners: Vec::new(),
        })
    }

    /// Fresh state backed by a [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self {
            paths: None,
            store: Box::new(MemoryStore::new()),
            records: RecordRepository::new(),
            settings: Settings::default(),
            audit: None,
            listeners: Vec::new(),
        }
    }

    /// Paths in use, when file-backed
    pub fn paths(&self) -> Option<&TallyPaths> {
        self.paths.as_ref()
    }

    /// The audit logger, when file-backed
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Register a listener called after every persisted change
    pub fn on_change(&mut self, listener: impl FnMut(Change) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Persist the record collection and notify listeners
    pub fn save_records(&mut self) -> TallyResult<()> {
        self.records.save(&mut *self.store)?;
        self.notify(Change::Records);
        Ok(())
    }

    /// Persist one setting, update the in-memory copy and notify listeners
    pub fn update_setting(&mut self, update: SettingUpdate) -> TallyResult<()> {
        let before = self.settings.clone();
        self.settings.apply(update, &mut *self.store)?;
        tracing::debug!(%update, "setting updated");

        let entry = AuditEntry::update(
            EntityType::Setting,
            update.key(),
            None,
            &before,
            &self.settings,
            Some(update.to_string()),
        );
        self.log_audit(&entry)?;

        self.notify(Change::Settings);
        Ok(())
    }

    /// Append an entry to the audit log, if one is configured
    pub fn log_audit(&self, entry: &AuditEntry) -> TallyResult<()> {
        match &self.audit {
            Some(logger) => logger.log(entry),
            None => Ok(()),
        }
    }

    /// Append several entries to the audit log, if one is configured
    pub fn log_audit_batch(&self, entries: &[AuditEntry]) -> TallyResult<()> {
        match &self.audit {
            Some(logger) => logger.log_batch(entries),
            None => Ok(()),
        }
    }

    fn notify(&mut self, change: Change) {
        for listener in self.listeners.iter_mut() {
            listener(change);
        }
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("paths", &self.paths)
            .field("records", &self.records.len())
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
