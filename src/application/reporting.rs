use serde::{Deserialize, Serialize};

use crate::domain::Cents;

/// Spending total for a single category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub total: Cents,
    pub count: i64,
    pub average: Cents,
}

/// Spending over time, bucketed by period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownReport {
    pub granularity: String,
    pub periods: Vec<PeriodSummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: String,
    pub total: Cents,
    pub count: i64,
}

/// Overall spending across the whole ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallReport {
    pub total: Cents,
    pub count: i64,
}
