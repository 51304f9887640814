mod shell;

pub use shell::Shell;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::application::ExpenseService;
use crate::domain::{format_cents, parse_cents, Granularity};

/// Spesa - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spesa")]
#[command(about = "A local-first personal expense tracker with a flat-file ledger")]
#[command(version)]
pub struct Cli {
    /// Expense file path
    #[arg(short, long, default_value = "expenses.json")]
    pub file: String,

    /// Command to run; omit to start the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "50.00" or "50")
        amount: String,

        /// Spending category (e.g., "Food", "Transport")
        #[arg(short, long)]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all recorded expenses
    List,

    /// Generate spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV or JSON
    Export {
        /// What to export: expenses, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total spending for one category
    Category {
        /// Category name (matched case-insensitively)
        name: String,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Total overall spending
    Total {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Spending over time
    Breakdown {
        /// Period: daily, weekly, monthly
        #[arg(long, default_value = "monthly")]
        period: String,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut service = ExpenseService::open(&self.file)?;

        match self.command {
            None => {
                let mut shell = Shell::new(&mut service);
                shell.run()?;
            }

            Some(Commands::Add {
                amount,
                category,
                date,
            }) => {
                let amount_cents =
                    parse_cents(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
                let date = date.as_deref().map(parse_date).transpose()?;

                let expense = service.add_expense(amount_cents, category, date)?;
                println!(
                    "Recorded expense: {} {} on {}",
                    format_cents(expense.amount_cents),
                    expense.category,
                    expense.date.format("%Y-%m-%d")
                );
            }

            Some(Commands::List) => {
                run_list_command(&service);
            }

            Some(Commands::Report(report_cmd)) => {
                run_report_command(&service, report_cmd)?;
            }

            Some(Commands::Export {
                export_type,
                output,
            }) => {
                run_export_command(&service, &export_type, output.as_deref())?;
            }
        }

        Ok(())
    }
}

fn run_list_command(service: &ExpenseService) {
    let expenses = service.expenses();
    if expenses.is_empty() {
        println!("No expenses recorded yet.");
        return;
    }

    println!("{:<12} {:<20} {:>12}", "DATE", "CATEGORY", "AMOUNT");
    println!("{}", "-".repeat(46));
    for expense in expenses {
        println!(
            "{:<12} {:<20} {:>12}",
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.category, 20),
            format_cents(expense.amount_cents)
        );
    }
}

fn run_report_command(service: &ExpenseService, cmd: ReportCommands) -> Result<()> {
    match cmd {
        ReportCommands::Category { name, format } => {
            let report = service.category_report(&name);

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                "csv" => {
                    println!("category,total,count,average");
                    println!(
                        "{},{},{},{}",
                        report.category, report.total, report.count, report.average
                    );
                }
                _ => {
                    println!("Category Spending Report");
                    println!();
                    println!("  Category: {}", report.category);
                    println!("  Total:    {}", format_cents(report.total));
                    println!("  Count:    {}", report.count);
                    println!("  Average:  {}", format_cents(report.average));
                }
            }
        }

        ReportCommands::Total { format } => {
            let report = service.overall_report();

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                "csv" => {
                    println!("total,count");
                    println!("{},{}", report.total, report.count);
                }
                _ => {
                    println!("Overall Spending Report");
                    println!();
                    println!("  Total: {}", format_cents(report.total));
                    println!("  Count: {}", report.count);
                }
            }
        }

        ReportCommands::Breakdown { period, format } => {
            let granularity: Granularity = period.parse().map_err(|e| {
                anyhow::anyhow!(
                    "Invalid period '{}'. Valid: daily, weekly, monthly. Error: {}",
                    period,
                    e
                )
            })?;

            let report = service.period_breakdown(granularity);

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                "csv" => {
                    println!("period,total,count");
                    for summary in &report.periods {
                        println!("{},{},{}", summary.period, summary.total, summary.count);
                    }
                }
                _ => {
                    println!("Spending Breakdown ({})", report.granularity);
                    println!();
                    println!("{:<12} {:>12} {:>8}", "PERIOD", "TOTAL", "COUNT");
                    println!("{}", "-".repeat(34));

                    for summary in &report.periods {
                        println!(
                            "{:<12} {:>12} {:>8}",
                            summary.period,
                            format_cents(summary.total),
                            summary.count
                        );
                    }

                    println!("{}", "-".repeat(34));
                    println!("{:<12} {:>12}", "TOTAL", format_cents(report.total));
                }
            }
        }
    }

    Ok(())
}

fn run_export_command(
    service: &ExpenseService,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "expenses" => {
            let count = exporter.export_expenses_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "full" => {
            let snapshot = exporter.export_full_json(writer)?;
            if output.is_some() {
                eprintln!("Exported full ledger: {} expenses", snapshot.expenses.len());
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: expenses, full",
                export_type
            );
        }
    }

    Ok(())
}

/// Shorten a display value to at most `max_len` characters, never splitting
/// a multibyte character.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len - 3).collect();
        format!("{}...", prefix)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("Food", 20), "Food");
        assert_eq!(truncate("exactly-twenty-chars", 20), "exactly-twenty-chars");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("a-very-long-category-name", 20), "a-very-long-categ...");
    }

    #[test]
    fn test_truncate_multibyte_category() {
        // Char 17 lands inside a multibyte character; must not panic
        let truncated = truncate("Dépenses ménagères régulières", 20);
        assert_eq!(truncated, "Dépenses ménagère...");
        assert_eq!(truncated.chars().count(), 20);
    }
}
