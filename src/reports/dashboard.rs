//! Dashboard report
//!
//! Headline figures for the whole collection: how many records, how much was
//! spent, the most used category, where spending stands against the cap and
//! a seven-day spending trend.

use chrono::{Duration, NaiveDate};

use crate::display::report::{format_bar, separator};
use crate::models::{Currency, Money, Record};
use crate::services::{BudgetService, BudgetSummary};
use crate::storage::Storage;

/// Number of days in the trend
pub const TREND_DAYS: usize = 7;

/// Smallest scale for the trend bars, in USD
const TREND_MIN_SCALE: f64 = 10.0;

/// Shortest visible bar for a day with any spending, in percent
const TREND_MIN_BAR: f64 = 5.0;

/// Daily totals for the seven days ending on `today` (last entry is today)
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingTrend {
    pub today: NaiveDate,
    pub totals: [Money; TREND_DAYS],
}

impl SpendingTrend {
    /// Bucket records by day. Records outside the window, or whose date is
    /// not a real calendar day, are skipped.
    pub fn generate(records: &[Record], today: NaiveDate) -> Self {
        let mut totals = [Money::zero(); TREND_DAYS];

        for record in records {
            let Some(date) = record.naive_date() else {
                continue;
            };
            let days_ago = (today - date).num_days();
            if (0..TREND_DAYS as i64).contains(&days_ago) {
                let slot = &mut totals[TREND_DAYS - 1 - days_ago as usize];
                *slot = slot.saturating_add(record.amount);
            }
        }

        Self { today, totals }
    }

    /// Calendar day of entry `index`
    pub fn day(&self, index: usize) -> NaiveDate {
        self.today - Duration::days((TREND_DAYS - 1 - index) as i64)
    }

    /// Bar height for entry `index` as a percentage of the busiest day.
    ///
    /// The scale never drops below 10 USD, and a day with any spending gets
    /// at least a 5% bar.
    pub fn bar_percent(&self, index: usize) -> f64 {
        let amount = self.totals[index].to_f64();
        if amount <= 0.0 {
            return 0.0;
        }
        let max = self
            .totals
            .iter()
            .map(|m| m.to_f64())
            .fold(TREND_MIN_SCALE, f64::max);
        (amount / max * 100.0).max(TREND_MIN_BAR)
    }
}

/// Dashboard figures
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub total_records: usize,
    /// Total of all records, in USD
    pub total_amount: Money,
    /// Category with the most records; the first seen wins a tie
    pub top_category: Option<String>,
    pub budget: BudgetSummary,
    pub trend: SpendingTrend,
    pub currency: Currency,
}

impl DashboardReport {
    /// Build the dashboard as of `today`
    pub fn generate(storage: &Storage, today: NaiveDate) -> Self {
        let records = storage.records.all();
        let budget_service = BudgetService::new(storage);

        Self {
            total_records: records.len(),
            total_amount: budget_service.total_spent(),
            top_category: top_category(records),
            budget: budget_service.summary(),
            trend: SpendingTrend::generate(records, today),
            currency: storage.settings.display_currency,
        }
    }

    /// Format for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Dashboard\n");
        output.push_str(&separator(50));
        output.push('\n');
        output.push_str(&format!("Total Records:  {}\n", self.total_records));
        output.push_str(&format!(
            "Total Amount:   {}\n",
            self.currency.display(self.total_amount.to_f64())
        ));
        output.push_str(&format!(
            "Top Category:   {}\n",
            self.top_category.as_deref().unwrap_or("-")
        ));
        output.push('\n');
        output.push_str(&self.budget.message());
        output.push_str("\n\n");

        output.push_str("Last 7 days\n");
        output.push_str(&separator(50));
        output.push('\n');
        for (index, total) in self.trend.totals.iter().enumerate() {
            output.push_str(&format!(
                "{}  {}  {:>8.2} USD\n",
                self.trend.day(index).format("%a %m-%d"),
                format_bar(self.trend.bar_percent(index), 100.0, 25),
                total.to_f64()
            ));
        }

        output
    }
}

/// Category used by the most records; ties go to the one seen first
pub fn top_category(records: &[Record]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(name, _)| *name == record.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.category.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}
