use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::domain::{self, Cents, Expense, Granularity};
use crate::storage::ExpenseStore;

use super::{AppError, BreakdownReport, CategoryReport, OverallReport, PeriodSummary};

/// Application service providing high-level operations over the expense
/// ledger. This is the primary interface for any client (CLI, shell, export).
///
/// The service owns the in-memory ledger for the session and mirrors it to
/// the store after every append.
pub struct ExpenseService {
    store: ExpenseStore,
    expenses: Vec<Expense>,
}

impl ExpenseService {
    /// Open the expense file at the given path. A missing file starts an
    /// empty ledger; unreadable or malformed content is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let store = ExpenseStore::new(path);
        let expenses = store.load()?;
        Ok(Self { store, expenses })
    }

    /// The in-memory ledger, in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    // ========================
    // Ledger operations
    // ========================

    /// Record a new expense and persist the full ledger. With no date given,
    /// the expense is stamped with today's local calendar date.
    pub fn add_expense(
        &mut self,
        amount_cents: Cents,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Expense, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let category = category.into();
        if category.trim().is_empty() {
            return Err(AppError::EmptyCategory);
        }

        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let expense = Expense::new(amount_cents, category, date);

        self.expenses.push(expense.clone());
        self.store.save(&self.expenses)?;

        Ok(expense)
    }

    // ========================
    // Reporting operations
    // ========================

    /// Spending total for a single category, matched case-insensitively.
    /// A category with no expenses reports a zero total, not an error.
    pub fn category_report(&self, category: &str) -> CategoryReport {
        let total = domain::total_by_category(&self.expenses, category);
        let count = domain::count_by_category(&self.expenses, category);
        let average = if count > 0 { total / count } else { 0 };

        CategoryReport {
            category: category.to_string(),
            total,
            count,
            average,
        }
    }

    /// Overall spending across the whole ledger.
    pub fn overall_report(&self) -> OverallReport {
        OverallReport {
            total: domain::total_overall(&self.expenses),
            count: self.expenses.len() as i64,
        }
    }

    /// Spending over time at the given granularity. Periods appear in
    /// first-occurrence order of the ledger, not sorted by key.
    pub fn period_breakdown(&self, granularity: Granularity) -> BreakdownReport {
        let periods = domain::group_by_period(&self.expenses, granularity)
            .into_iter()
            .map(|bucket| PeriodSummary {
                period: bucket.key,
                total: bucket.total,
                count: bucket.count,
            })
            .collect();

        BreakdownReport {
            granularity: granularity.as_str().to_string(),
            periods,
            total: domain::total_overall(&self.expenses),
        }
    }
}
