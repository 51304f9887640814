use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Cents;

/// A single spending event. Expenses are immutable once recorded -
/// there is no update or delete path, only append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Amount in cents (serialized as `amount` in the expense file)
    #[serde(rename = "amount")]
    pub amount_cents: Cents,
    /// Spending category (e.g. "Food", "Transport"), matched case-insensitively
    pub category: String,
    /// Calendar date of the expense
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(amount_cents: Cents, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount_cents,
            category: category.into(),
            date,
        }
    }

    /// Returns true if this expense belongs to the given category.
    /// Comparison is case-insensitive, including non-ASCII categories.
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Time-bucketing mode for period breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            other => Err(format!("unknown granularity: {}", other)),
        }
    }
}
