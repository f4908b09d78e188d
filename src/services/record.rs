//! Record service
//!
//! Business logic for the record collection: validated add and edit, delete,
//! and whole-collection JSON import/export. Every mutation is persisted,
//! audited and announced to the storage listeners before returning.

use chrono::Utc;
use serde_json::Value;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TallyError, TallyResult};
use crate::models::{Money, NewRecord, Record, RecordId, RecordUpdate};
use crate::storage::Storage;
use crate::validation::{self, validate_record_structure, Field, FieldError, FieldErrors};

/// Import rejected because the top-level value is not an array
pub const IMPORT_NOT_ARRAY: &str = "Ensure that the file contents are JSON arrays.";

/// Import rejected because an element is not a well-formed record
pub const IMPORT_BAD_STRUCTURE: &str = "Data structure is missing some fields (or wrong types).";

/// Import rejected because the text is not JSON
pub const IMPORT_INVALID_FORMAT: &str = "Invalid format.";

/// Service for record management
pub struct RecordService<'a> {
    storage: &'a mut Storage,
}

impl<'a> RecordService<'a> {
    /// Create a new record service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Validate and add a new record at the front of the collection
    pub fn add_record(&mut self, input: NewRecord) -> TallyResult<Record> {
        validation::validate_input(&input).map_err(TallyError::Validation)?;

        let amount = parse_amount(&input.amount)?;
        let now = Utc::now();
        let id = self.storage.records.next_id(now);
        let record = Record::new(
            id,
            input.description.trim(),
            amount,
            input.category.trim(),
            input.date.trim(),
            now,
        );

        self.storage.records.insert_front(record.clone());
        self.storage.save_records()?;

        tracing::debug!(id = %record.id, "record added");
        self.storage.log_audit(&AuditEntry::create(
            EntityType::Record,
            record.id.as_str(),
            Some(record.description.clone()),
            &record,
        ))?;

        Ok(record)
    }

    /// Apply a partial update to a record.
    ///
    /// Returns `Ok(None)` when no record has this id. Only present, non-blank
    /// values are applied (an amount of zero counts as blank); those values
    /// are validated first and any failure leaves the record untouched.
    /// `updatedAt` is refreshed even when nothing else changes.
    pub fn edit_record(&mut self, id: &RecordId, update: RecordUpdate) -> TallyResult<Option<Record>> {
        let Some(before) = self.storage.records.get(id).cloned() else {
            tracing::debug!(%id, "edit of unknown record ignored");
            return Ok(None);
        };

        validation::validate_update(&update).map_err(TallyError::Validation)?;
        let amount = update.effective_amount().map(parse_amount).transpose()?;

        let Some(record) = self.storage.records.get_mut(id) else {
            return Ok(None);
        };
        if let Some(description) = update.effective_description() {
            record.description = description.trim().to_string();
        }
        if let Some(amount) = amount {
            record.amount = amount;
        }
        if let Some(category) = update.effective_category() {
            record.category = category.trim().to_string();
        }
        if let Some(date) = update.effective_date() {
            record.date = date.trim().to_string();
        }
        record.touch();
        let after = record.clone();

        self.storage.save_records()?;

        tracing::debug!(%id, "record updated");
        self.storage.log_audit(&AuditEntry::update(
            EntityType::Record,
            id.as_str(),
            Some(after.description.clone()),
            &before,
            &after,
            diff_summary(&before, &after),
        ))?;

        Ok(Some(after))
    }

    /// Remove a record.
    ///
    /// The collection is persisted whether or not the id matched.
    pub fn delete_record(&mut self, id: &RecordId) -> TallyResult<Option<Record>> {
        let removed = self.storage.records.remove(id);
        self.storage.save_records()?;

        if let Some(record) = &removed {
            tracing::debug!(%id, "record deleted");
            self.storage.log_audit(&AuditEntry::delete(
                EntityType::Record,
                id.as_str(),
                Some(record.description.clone()),
                record,
            ))?;
        }

        Ok(removed)
    }

    /// Get a record by id
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.storage.records.get(id)
    }

    /// Find a record by id text
    pub fn find(&self, identifier: &str) -> Option<&Record> {
        identifier
            .parse::<RecordId>()
            .ok()
            .and_then(|id| self.storage.records.get(&id))
    }

    /// Import records from a JSON array.
    ///
    /// Every element is checked before anything is inserted; one bad element
    /// rejects the whole import. Accepted records get fresh ids and
    /// timestamps and are appended in file order. Returns the count added.
    pub fn import_json(&mut self, text: &str) -> TallyResult<usize> {
        let value: Value = serde_json::from_str(text).map_err(|err| {
            tracing::debug!(error = %err, "import is not JSON");
            TallyError::Import(IMPORT_INVALID_FORMAT.into())
        })?;

        let Value::Array(items) = value else {
            return Err(TallyError::Import(IMPORT_NOT_ARRAY.into()));
        };

        let mut candidates = Vec::with_capacity(items.len());
        for item in &items {
            let (Some(description), Some(category), Some(amount), Some(date)) = (
                item["description"].as_str(),
                item["category"].as_str(),
                item["amount"].as_f64(),
                item["date"].as_str(),
            ) else {
                return Err(TallyError::Import(IMPORT_BAD_STRUCTURE.into()));
            };
            let amount = Money::try_from_f64(amount)
                .filter(|_| validate_record_structure(item))
                .ok_or_else(|| TallyError::Import(IMPORT_BAD_STRUCTURE.into()))?;
            candidates.push((description, amount, category, date));
        }

        let mut entries = Vec::with_capacity(candidates.len());
        for (description, amount, category, date) in candidates {
            let now = Utc::now();
            let id = self.storage.records.next_id(now);
            let record = Record::new(id, description, amount, category, date, now);
            entries.push(AuditEntry::create(
                EntityType::Record,
                record.id.as_str(),
                Some(record.description.clone()),
                &record,
            ));
            self.storage.records.push(record);
        }

        self.storage.save_records()?;
        self.storage.log_audit_batch(&entries)?;

        tracing::debug!(count = entries.len(), "records imported");
        Ok(entries.len())
    }

    /// The whole collection as pretty-printed JSON
    pub fn export_json(&self) -> TallyResult<String> {
        serde_json::to_string_pretty(self.storage.records.all())
            .map_err(|e| TallyError::Export(e.to_string()))
    }
}

fn parse_amount(raw: &str) -> TallyResult<Money> {
    Money::parse(raw.trim()).map_err(|_| {
        TallyError::Validation(FieldErrors::from(vec![FieldError::new(Field::Amount)]))
    })
}

fn diff_summary(before: &Record, after: &Record) -> Option<String> {
    let mut changes = Vec::new();

    if before.description != after.description {
        changes.push(format!(
            "description: '{}' -> '{}'",
            before.description, after.description
        ));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!(
            "category: '{}' -> '{}'",
            before.category, after.category
        ));
    }
    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}
