//! Validation engine
//!
//! Field-level rules for the record form and the structural check used on
//! imported files. Field rules are stricter than the import check: an
//! imported record only needs a well-formed id, amount and date, while a
//! record typed into the form must satisfy every rule.

mod rules;
mod structure;

pub use rules::{has_repeated_word, Field};
pub use structure::{validate_record_structure, REQUIRED_KEYS};

use std::fmt;

use crate::models::{NewRecord, RecordUpdate};

/// Message used for field names without a rule
pub const GENERIC_MESSAGE: &str = "Invalid input.";

/// Check a raw value against a field's rule.
///
/// Amounts that parse to zero or less fail even when the pattern matches
/// ("0", "0.00"). For [`Field::Advanced`] the value is valid when it has no
/// immediately-repeated word.
pub fn validate_field(field: Field, value: &str) -> bool {
    match field {
        Field::Amount => {
            if matches!(value.trim().parse::<f64>(), Ok(v) if v <= 0.0) {
                return false;
            }
            field.matches(value)
        }
        Field::Advanced => !field.matches(value),
        Field::Description | Field::Date | Field::Category => field.matches(value),
    }
}

/// Validate by field name; unknown names never validate.
pub fn validate_field_name(name: &str, value: &str) -> bool {
    name.parse::<Field>()
        .map(|field| validate_field(field, value))
        .unwrap_or(false)
}

/// Error message for a field name, or the generic message for unknown names
pub fn get_error_message(name: &str) -> &'static str {
    name.parse::<Field>()
        .map(|field| field.error_message())
        .unwrap_or(GENERIC_MESSAGE)
}

/// A single failed field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            message: field.error_message(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every rule a form submission broke
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Check whether a given field failed
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn check(&mut self, field: Field, value: &str) {
        if !validate_field(field, value) {
            self.0.push(FieldError::new(field));
        }
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldError>> for FieldErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Validate a full form submission.
///
/// Every form field is checked, plus the duplicate-word rule on the
/// description, so the caller can show all messages at once.
pub fn validate_input(input: &NewRecord) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check(Field::Description, &input.description);
    errors.check(Field::Amount, &input.amount);
    errors.check(Field::Category, &input.category);
    errors.check(Field::Date, &input.date);
    errors.check(Field::Advanced, &input.description);
    errors.into_result()
}

/// Validate only the values of an update that would actually be applied
pub fn validate_update(update: &RecordUpdate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if let Some(description) = update.effective_description() {
        errors.check(Field::Description, description);
        errors.check(Field::Advanced, description);
    }
    if let Some(amount) = update.effective_amount() {
        errors.check(Field::Amount, amount);
    }
    if let Some(category) = update.effective_category() {
        errors.check(Field::Category, category);
    }
    if let Some(date) = update.effective_date() {
        errors.check(Field::Date, date);
    }
    errors.into_result()
}
