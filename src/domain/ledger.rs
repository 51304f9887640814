use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use super::{Cents, Expense, Granularity};

/// Sum of amounts per time bucket, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    pub key: String,
    pub total: Cents,
    pub count: i64,
}

/// Sum every expense amount. Returns 0 for an empty ledger.
pub fn total_overall(expenses: &[Expense]) -> Cents {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Sum amounts for a single category, compared case-insensitively.
/// Returns 0 when no expense matches.
pub fn total_by_category(expenses: &[Expense], category: &str) -> Cents {
    expenses
        .iter()
        .filter(|e| e.matches_category(category))
        .map(|e| e.amount_cents)
        .sum()
}

/// Number of expenses in a single category, compared case-insensitively.
pub fn count_by_category(expenses: &[Expense], category: &str) -> i64 {
    expenses.iter().filter(|e| e.matches_category(category)).count() as i64
}

/// Derive the bucket key for a date at the given granularity.
/// Daily: "2024-03-05", weekly: "2024-W10" (ISO week), monthly: "2024-03".
pub fn period_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => date.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => {
            let week = date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Granularity::Monthly => date.format("%Y-%m").to_string(),
    }
}

/// Group expenses into time buckets, accumulating the amount per bucket.
/// Buckets appear in first-occurrence order while scanning the ledger in
/// insertion order, never sorted by key.
pub fn group_by_period(expenses: &[Expense], granularity: Granularity) -> Vec<PeriodTotal> {
    let mut buckets: Vec<PeriodTotal> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for expense in expenses {
        let key = period_key(expense.date, granularity);
        match positions.get(&key) {
            Some(&idx) => {
                buckets[idx].total += expense.amount_cents;
                buckets[idx].count += 1;
            }
            None => {
                positions.insert(key.clone(), buckets.len());
                buckets.push(PeriodTotal {
                    key,
                    total: expense.amount_cents,
                    count: 1,
                });
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: Cents, category: &str, date: &str) -> Expense {
        Expense::new(amount, category, date.parse().unwrap())
    }

    #[test]
    fn test_total_overall_empty() {
        assert_eq!(total_overall(&[]), 0);
    }

    #[test]
    fn test_total_overall() {
        let expenses = vec![
            expense(10000, "Food", "2024-01-10"),
            expense(5000, "Food", "2024-01-20"),
            expense(3000, "Transport", "2024-01-15"),
        ];

        assert_eq!(total_overall(&expenses), 18000);
    }

    #[test]
    fn test_total_by_category_case_insensitive() {
        let expenses = vec![
            expense(10000, "Food", "2024-01-10"),
            expense(5000, "food", "2024-01-20"),
            expense(3000, "Transport", "2024-01-15"),
        ];

        assert_eq!(total_by_category(&expenses, "food"), 15000);
        assert_eq!(total_by_category(&expenses, "FOOD"), 15000);
        assert_eq!(total_by_category(&expenses, "Transport"), 3000);
    }

    #[test]
    fn test_total_by_category_non_ascii_case_insensitive() {
        let expenses = vec![
            expense(10000, "épicerie", "2024-01-10"),
            expense(3000, "Transport", "2024-01-15"),
        ];

        assert_eq!(total_by_category(&expenses, "épicerie"), 10000);
        assert_eq!(total_by_category(&expenses, "ÉPICERIE"), 10000);
        assert_eq!(count_by_category(&expenses, "Épicerie"), 1);
    }

    #[test]
    fn test_total_by_category_no_match_is_zero() {
        let expenses = vec![expense(10000, "Food", "2024-01-10")];

        assert_eq!(total_by_category(&expenses, "Rent"), 0);
        assert_eq!(total_by_category(&[], "Rent"), 0);
    }

    #[test]
    fn test_period_key_daily() {
        let date = "2024-03-05".parse().unwrap();
        assert_eq!(period_key(date, Granularity::Daily), "2024-03-05");
    }

    #[test]
    fn test_period_key_weekly_iso() {
        // 2024-01-01 falls in ISO week 1 of 2024
        let date = "2024-01-01".parse().unwrap();
        assert_eq!(period_key(date, Granularity::Weekly), "2024-W01");

        // 2023-01-01 is a Sunday, ISO week 52 of 2022
        let date = "2023-01-01".parse().unwrap();
        assert_eq!(period_key(date, Granularity::Weekly), "2022-W52");
    }

    #[test]
    fn test_period_key_monthly() {
        let date = "2024-03-31".parse().unwrap();
        assert_eq!(period_key(date, Granularity::Monthly), "2024-03");
    }

    #[test]
    fn test_group_by_period_monthly_merges_same_month() {
        let expenses = vec![
            expense(2500, "Food", "2024-03-05"),
            expense(7500, "Transport", "2024-03-31"),
        ];

        let buckets = group_by_period(&expenses, Granularity::Monthly);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "2024-03");
        assert_eq!(buckets[0].total, 10000);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_group_by_period_daily_splits_dates() {
        let expenses = vec![
            expense(1000, "Food", "2024-03-05"),
            expense(2000, "Food", "2024-03-05"),
            expense(3000, "Food", "2024-03-06"),
        ];

        let buckets = group_by_period(&expenses, Granularity::Daily);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2024-03-05");
        assert_eq!(buckets[0].total, 3000);
        assert_eq!(buckets[1].key, "2024-03-06");
        assert_eq!(buckets[1].total, 3000);
    }

    #[test]
    fn test_group_by_period_first_occurrence_order() {
        // Ledger order is not chronological; bucket order must follow it
        let expenses = vec![
            expense(1000, "Food", "2024-05-10"),
            expense(2000, "Food", "2024-01-02"),
            expense(3000, "Food", "2024-05-20"),
        ];

        let buckets = group_by_period(&expenses, Granularity::Monthly);

        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-05", "2024-01"]);
        assert_eq!(buckets[0].total, 4000);
        assert_eq!(buckets[1].total, 2000);
    }

    #[test]
    fn test_group_by_period_empty() {
        assert!(group_by_period(&[], Granularity::Weekly).is_empty());
    }
}
