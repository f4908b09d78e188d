//! Budget service
//!
//! Compares total spending against the budget cap and turns the result into
//! a status and a user-facing message.

use std::fmt;

use crate::models::{Currency, Money};
use crate::storage::Storage;

/// Fraction of the cap below which remaining money is a warning
pub const WARNING_THRESHOLD: f64 = 0.2;

/// Where spending stands relative to the cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Healthy,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    /// Classify spending against a cap.
    ///
    /// Exceeded when `budget - total` is negative, warning while it is below
    /// 20% of the cap, healthy otherwise (the 20% boundary itself is healthy).
    pub fn classify(budget: f64, total: f64) -> Self {
        let remaining = budget - total;
        if remaining < 0.0 {
            Self::Exceeded
        } else if remaining < budget * WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// Spending measured against the cap
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    /// Cap in USD
    pub budget: f64,
    /// Total spent in USD
    pub total: f64,
    /// `budget - total`, negative when over
    pub remaining: f64,
    pub status: BudgetStatus,
    /// Currency used for the spending figures in [`message`](Self::message)
    pub currency: Currency,
}

impl BudgetSummary {
    pub fn new(budget: f64, total: f64, currency: Currency) -> Self {
        Self {
            budget,
            total,
            remaining: budget - total,
            status: BudgetStatus::classify(budget, total),
            currency,
        }
    }

    /// Status message; the cap itself is always shown in USD
    pub fn message(&self) -> String {
        let cap = Currency::Usd.display(self.budget);
        match self.status {
            BudgetStatus::Exceeded => format!(
                "Budget EXCEEDED! You are {} over your cap of {}.",
                self.currency.display(self.remaining.abs()),
                cap
            ),
            BudgetStatus::Warning => format!(
                "Warning: You have {} remaining. Use caution!",
                self.currency.display(self.remaining)
            ),
            BudgetStatus::Healthy => format!(
                "Good job! You have {} remaining out of your cap of {}.",
                self.currency.display(self.remaining),
                cap
            ),
        }
    }
}

/// Service for budget checks
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Total of every record, in USD, clamped at the largest representable amount
    pub fn total_spent(&self) -> Money {
        self.storage.records.all().iter().map(|r| r.amount).sum()
    }

    /// Current spending against the configured cap
    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary::new(
            self.storage.settings.budget,
            self.total_spent().to_f64(),
            self.storage.settings.display_currency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRecord;
    use crate::services::RecordService;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(BudgetStatus::classify(200.0, 160.0), BudgetStatus::Healthy);
        assert_eq!(BudgetStatus::classify(200.0, 161.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(200.0, 200.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(200.0, 201.0), BudgetStatus::Exceeded);
        assert_eq!(BudgetStatus::classify(200.0, 0.0), BudgetStatus::Healthy);
    }

    #[test]
    fn test_messages() {
        let exceeded = BudgetSummary::new(200.0, 250.0, Currency::Usd);
        assert_eq!(
            exceeded.message(),
            "Budget EXCEEDED! You are 50.00 $ over your cap of 200.00 $."
        );

        let warning = BudgetSummary::new(200.0, 180.0, Currency::Usd);
        assert_eq!(
            warning.message(),
            "Warning: You have 20.00 $ remaining. Use caution!"
        );

        let healthy = BudgetSummary::new(200.0, 100.0, Currency::Rwf);
        assert_eq!(
            healthy.message(),
            "Good job! You have 130000.00 Fr remaining out of your cap of 200.00 $."
        );
    }

    #[test]
    fn test_summary_uses_settings_and_records() {
        let mut storage = Storage::in_memory();
        storage.settings.budget = 100.0;
        {
            let mut records = RecordService::new(&mut storage);
            records
                .add_record(NewRecord::new("Rent", "90", "Housing", "2024-01-01"))
                .unwrap();
        }

        let summary = BudgetService::new(&storage).summary();
        assert_eq!(summary.total, 90.0);
        assert_eq!(summary.remaining, 10.0);
        assert_eq!(summary.status, BudgetStatus::Warning);
    }

    #[test]
    fn test_total_spent_saturates_on_huge_amounts() {
        let mut storage = Storage::in_memory();
        {
            let mut records = RecordService::new(&mut storage);
            for _ in 0..2 {
                records
                    .add_record(NewRecord::new("Yacht", "92233720368547758", "Toys", "2024-01-01"))
                    .unwrap();
            }
        }

        let service = BudgetService::new(&storage);
        assert_eq!(service.total_spent(), Money::from_cents(i64::MAX));
        assert_eq!(service.summary().status, BudgetStatus::Exceeded);
    }
}
