//! Record display formatting
//!
//! Formats records for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Currency, Record};
use crate::query::{RecordRow, EMPTY_RESULT_MESSAGE};
use crate::search::SearchStatus;

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl TableRow {
    fn from_row(row: &RecordRow<'_>, highlight: bool) -> Self {
        let description = if highlight {
            row.description.to_terminal()
        } else {
            row.description.to_string()
        };

        Self {
            date: row.record.date.clone(),
            description,
            category: row.record.category.clone(),
            amount: row.amount.clone(),
            id: row.record.id.to_string(),
        }
    }
}

/// Format query rows as a table.
///
/// With `highlight` set, search matches in descriptions are shown in reverse
/// video.
pub fn format_record_table(rows: &[RecordRow<'_>], highlight: bool) -> String {
    if rows.is_empty() {
        return EMPTY_RESULT_MESSAGE.to_string();
    }

    let table_rows: Vec<TableRow> = rows
        .iter()
        .map(|row| TableRow::from_row(row, highlight))
        .collect();

    Table::new(table_rows).with(Style::sharp()).to_string()
}

/// Format a listing: optional search status line, then the table
pub fn format_record_list(rows: &[RecordRow<'_>], status: &SearchStatus, highlight: bool) -> String {
    let mut output = String::new();

    if *status != SearchStatus::Idle {
        output.push_str(&status.to_string());
        output.push('\n');
    }

    output.push_str(&format_record_table(rows, highlight));
    output.push('\n');
    output
}

/// Format record details for display
pub fn format_record_details(record: &Record, currency: Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Record:      {}\n", record.id));
    output.push_str(&format!("Description: {}\n", record.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        currency.display(record.amount.to_f64())
    ));
    if currency != Currency::Usd {
        output.push_str(&format!(
            "             ({})\n",
            Currency::Usd.display(record.amount.to_f64())
        ));
    }
    output.push_str(&format!("Category:    {}\n", record.category));
    output.push_str(&format!("Date:        {}\n", record.date));
    output.push_str(&format!(
        "Created:     {}\n",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Updated:     {}\n",
        record.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordId};
    use crate::query::RecordQuery;
    use chrono::Utc;

    fn sample() -> Vec<Record> {
        vec![Record::new(
            RecordId::from("txn_001_1"),
            "Coffee beans",
            Money::from_cents(1250),
            "Food",
            "2024-01-01",
            Utc::now(),
        )]
    }

    #[test]
    fn test_empty_table_message() {
        assert_eq!(format_record_table(&[], false), EMPTY_RESULT_MESSAGE);
    }

    #[test]
    fn test_table_contains_converted_amount() {
        let records = sample();
        let rows = RecordQuery::default().rows(&records, Currency::Rwf);
        let table = format_record_table(&rows, false);

        assert!(table.contains("Coffee beans"));
        assert!(table.contains("16250.00 Fr"));
        assert!(table.contains("txn_001_1"));
    }

    #[test]
    fn test_list_shows_search_status() {
        let records = sample();
        let query = RecordQuery::default().search("bean", false);
        let rows = query.rows(&records, Currency::Usd);

        let output = format_record_list(&rows, &query.status(&records), true);
        assert!(output.starts_with("Valid pattern - 1 match(es) found\n"));
        assert!(output.contains("\x1b[7mbean\x1b[0m"));
    }

    #[test]
    fn test_details() {
        let records = sample();
        let details = format_record_details(&records[0], Currency::Rwf);
        assert!(details.contains("Amount:      16250.00 Fr"));
        assert!(details.contains("(12.50 $)"));
        assert!(details.contains("Category:    Food"));
    }
}
