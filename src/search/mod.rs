//! Search engine
//!
//! Compiles user-typed regular expressions without ever failing loudly,
//! filters records by description or category and marks matches for display.
//!
//! A blank pattern and a broken pattern both yield "no filter" from
//! [`compile_regex`]. Callers that need to tell them apart (to show a status
//! line, for example) use [`compile_pattern`] instead.

mod highlight;

pub use highlight::{highlight, Highlighted, Span};

use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::models::Record;

/// A successfully compiled search pattern
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    case_insensitive: bool,
}

impl CompiledPattern {
    /// The pattern text as typed
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Check a record's description and category
    pub fn matches_record(&self, record: &Record) -> bool {
        self.is_match(&record.description) || self.is_match(&record.category)
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Outcome of compiling raw search text
#[derive(Debug, Clone)]
pub enum PatternStatus {
    /// Nothing was typed; show everything
    Empty,
    /// The text is not a valid pattern
    Invalid(String),
    /// A usable pattern
    Valid(CompiledPattern),
}

impl PatternStatus {
    /// The compiled pattern, if any
    pub fn pattern(&self) -> Option<&CompiledPattern> {
        match self {
            Self::Valid(pattern) => Some(pattern),
            Self::Empty | Self::Invalid(_) => None,
        }
    }

    pub fn into_pattern(self) -> Option<CompiledPattern> {
        match self {
            Self::Valid(pattern) => Some(pattern),
            Self::Empty | Self::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Compile raw search text, keeping track of why nothing was produced
pub fn compile_pattern(input: &str, case_insensitive: bool) -> PatternStatus {
    if input.is_empty() {
        return PatternStatus::Empty;
    }

    match RegexBuilder::new(input)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(regex) => PatternStatus::Valid(CompiledPattern {
            regex,
            case_insensitive,
        }),
        Err(err) => {
            tracing::debug!(pattern = input, error = %err, "rejected search pattern");
            PatternStatus::Invalid(err.to_string())
        }
    }
}

/// Compile a pattern with regex-style flags (`"i"` = ignore case).
///
/// Returns `None` for an empty pattern and for invalid syntax alike.
/// Unrecognized flags are ignored.
pub fn compile_regex(input: &str, flags: &str) -> Option<CompiledPattern> {
    compile_pattern(input, flags.contains('i')).into_pattern()
}

/// Keep the records whose description or category matches.
///
/// Without a pattern the input is returned as-is, in the same order.
pub fn filter_records<'a>(
    records: Vec<&'a Record>,
    pattern: Option<&CompiledPattern>,
) -> Vec<&'a Record> {
    match pattern {
        None => records,
        Some(pattern) => records
            .into_iter()
            .filter(|record| pattern.matches_record(record))
            .collect(),
    }
}

/// Status line shown under the search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// No pattern; nothing to report
    Idle,
    Invalid,
    Matches(usize),
}

impl SearchStatus {
    /// Summarize a compiled search against the whole collection
    pub fn for_records(status: &PatternStatus, records: &[Record]) -> Self {
        match status {
            PatternStatus::Empty => Self::Idle,
            PatternStatus::Invalid(_) => Self::Invalid,
            PatternStatus::Valid(pattern) => {
                Self::Matches(records.iter().filter(|r| pattern.matches_record(r)).count())
            }
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Invalid => write!(f, "Invalid regex pattern. Please check syntax."),
            Self::Matches(count) => write!(f, "Valid pattern - {} match(es) found", count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordId};
    use chrono::Utc;

    fn record(id: &str, description: &str, category: &str) -> Record {
        Record::new(
            RecordId::from(id),
            description,
            Money::from_cents(100),
            category,
            "2024-01-01",
            Utc::now(),
        )
    }

    fn sample() -> Vec<Record> {
        vec![
            record("1", "Morning coffee", "Food"),
            record("2", "Bus pass", "Transport"),
            record("3", "Groceries", "Food"),
        ]
    }

    #[test]
    fn test_unbalanced_group_is_none() {
        assert!(compile_regex("(", "").is_none());
        assert!(compile_pattern("(", false).is_invalid());
    }

    #[test]
    fn test_empty_pattern_is_none() {
        assert!(compile_regex("", "i").is_none());
        assert!(matches!(compile_pattern("", true), PatternStatus::Empty));
    }

    #[test]
    fn test_case_flag() {
        let sensitive = compile_regex("coffee", "").unwrap();
        assert!(!sensitive.is_match("COFFEE"));

        let insensitive = compile_regex("coffee", "i").unwrap();
        assert!(insensitive.is_case_insensitive());
        assert!(insensitive.is_match("COFFEE"));
    }

    #[test]
    fn test_filter_without_pattern_is_identity() {
        let records = sample();
        let refs: Vec<&Record> = records.iter().collect();
        let filtered = filter_records(refs.clone(), None);
        assert_eq!(filtered.len(), refs.len());
        for (a, b) in filtered.iter().zip(refs.iter()) {
            assert!(std::ptr::eq(*a, *b));
        }
    }

    #[test]
    fn test_filter_matches_description_or_category() {
        let records = sample();
        let pattern = compile_regex("^food$", "i").unwrap();
        let ids: Vec<&str> = filter_records(records.iter().collect(), Some(&pattern))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        let pattern = compile_regex("pass", "").unwrap();
        let filtered = filter_records(records.iter().collect(), Some(&pattern));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_str(), "2");
    }

    #[test]
    fn test_search_status_messages() {
        let records = sample();
        let status = compile_pattern("o", false);
        let summary = SearchStatus::for_records(&status, &records);
        assert_eq!(summary, SearchStatus::Matches(3));
        assert_eq!(summary.to_string(), "Valid pattern - 3 match(es) found");

        let summary = SearchStatus::for_records(&compile_pattern("[", false), &records);
        assert_eq!(summary.to_string(), "Invalid regex pattern. Please check syntax.");

        let summary = SearchStatus::for_records(&compile_pattern("", false), &records);
        assert_eq!(summary.to_string(), "");
    }
}
