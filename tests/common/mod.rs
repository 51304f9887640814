// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use spesa::application::ExpenseService;
use tempfile::TempDir;

/// Helper to create a test service backed by a temporary expense file
pub fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("expenses.json");
    let service = ExpenseService::open(&path)?;
    Ok((service, temp_dir))
}

/// Helper to parse a YYYY-MM-DD string into a NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    date_str.parse().unwrap()
}

/// Seed the ledger with the standard three-expense fixture:
/// 100.00 Food on 2024-01-10, 50.00 Food on 2024-01-20,
/// 30.00 Transport on 2024-01-15
pub fn seed_basic(service: &mut ExpenseService) -> Result<()> {
    service.add_expense(10000, "Food", Some(date("2024-01-10")))?;
    service.add_expense(5000, "Food", Some(date("2024-01-20")))?;
    service.add_expense(3000, "Transport", Some(date("2024-01-15")))?;
    Ok(())
}
