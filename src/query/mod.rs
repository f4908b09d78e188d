//! Record query pipeline
//!
//! A listing is produced in three steps: sort a copy of the collection, keep
//! the records matching the search pattern, then project each survivor into a
//! display row (amount converted to the display currency, description split
//! into highlighted runs). The collection itself is never reordered.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Currency, Record};
use crate::search::{self, highlight, CompiledPattern, Highlighted, PatternStatus, SearchStatus};

/// Shown when a query leaves nothing to list
pub const EMPTY_RESULT_MESSAGE: &str = "No records found matching current filter/search criteria.";

/// Field to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Description,
    Amount,
    #[default]
    Date,
}

impl SortKey {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Date => "date",
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::Description => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
            Self::Amount => a.amount.cmp(&b.amount),
            // YYYY-MM-DD text sorts chronologically
            Self::Date => a.date.cmp(&b.date),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "description" => Ok(Self::Description),
            "amount" => Ok(Self::Amount),
            "date" => Ok(Self::Date),
            other => Err(format!(
                "Unknown sort key '{}'. Use description, amount or date",
                other
            )),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("Unknown sort direction '{}'. Use asc or desc", other)),
        }
    }
}

/// Active sort; defaults to newest date first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub dir: SortDir,
}

impl SortState {
    pub fn new(key: SortKey, dir: SortDir) -> Self {
        Self { key, dir }
    }

    /// The state after the user selects `key`.
    ///
    /// Selecting the active key while ascending flips to descending; every
    /// other selection starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        let dir = if self.key == key && self.dir == SortDir::Asc {
            SortDir::Desc
        } else {
            SortDir::Asc
        };
        Self { key, dir }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = self.key.compare(a, b);
        match self.dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.dir)
    }
}

/// Sort a borrowed view of the records; equal records keep their order
pub fn sort_records(records: &[Record], sort: SortState) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted
}

/// One line of a listing, ready to render
#[derive(Debug, Clone)]
pub struct RecordRow<'a> {
    pub record: &'a Record,
    /// Description with search matches marked
    pub description: Highlighted<'a>,
    /// Amount in the display currency, e.g. `"13000.00 Fr"`
    pub amount: String,
}

impl<'a> RecordRow<'a> {
    pub fn new(record: &'a Record, pattern: Option<&CompiledPattern>, currency: Currency) -> Self {
        Self {
            record,
            description: highlight(&record.description, pattern),
            amount: currency.display(record.amount.to_f64()),
        }
    }
}

/// Sort and search settings for a listing
#[derive(Debug, Clone)]
pub struct RecordQuery {
    pub sort: SortState,
    search: PatternStatus,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self::new(SortState::default())
    }
}

impl RecordQuery {
    pub fn new(sort: SortState) -> Self {
        Self {
            sort,
            search: PatternStatus::Empty,
        }
    }

    /// Set the search text; surrounding whitespace is ignored
    pub fn search(mut self, input: &str, case_insensitive: bool) -> Self {
        self.search = search::compile_pattern(input.trim(), case_insensitive);
        self
    }

    /// The compiled pattern, if the search text produced one
    pub fn pattern(&self) -> Option<&CompiledPattern> {
        self.search.pattern()
    }

    pub fn search_status(&self) -> &PatternStatus {
        &self.search
    }

    /// Status line for the current search over the whole collection
    pub fn status(&self, records: &[Record]) -> SearchStatus {
        SearchStatus::for_records(&self.search, records)
    }

    /// Sort, then filter
    pub fn run<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        search::filter_records(sort_records(records, self.sort), self.pattern())
    }

    /// Sort, filter, then project into display rows
    pub fn rows<'a>(&self, records: &'a [Record], currency: Currency) -> Vec<RecordRow<'a>> {
        self.run(records)
            .into_iter()
            .map(|record| RecordRow::new(record, self.pattern(), currency))
            .collect()
    }
}
