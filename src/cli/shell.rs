use std::io::{stdin, stdout, Write};

use anyhow::Result;

use crate::application::ExpenseService;
use crate::domain::{format_cents, parse_cents, Granularity};

use super::{parse_date, run_list_command, run_report_command, ReportCommands};

/// Interactive menu shell over the expense service. All structured work goes
/// through the service; this layer only prompts, dispatches, and prints.
pub struct Shell<'a> {
    service: &'a mut ExpenseService,
}

impl<'a> Shell<'a> {
    pub fn new(service: &'a mut ExpenseService) -> Self {
        Self { service }
    }

    pub fn run(&mut self) -> Result<()> {
        run_list_command(self.service);

        loop {
            println!();
            println!("Personal Expense Tracker");
            println!("1. Add Expense");
            println!("2. View Summary");
            println!("3. Exit");

            let choice = match self.prompt("Enter your choice: ")? {
                Some(line) => line,
                None => break, // stdin closed
            };

            match choice.as_str() {
                "1" => self.add_expense()?,
                "2" => self.view_summary()?,
                "3" => {
                    println!("Exiting...");
                    break;
                }
                _ => println!("Invalid choice. Please choose again."),
            }
        }

        Ok(())
    }

    fn add_expense(&mut self) -> Result<()> {
        let amount = self.prompt("Enter the amount: ")?.unwrap_or_default();
        let amount_cents = parse_cents(&amount)?;

        let category = self
            .prompt("Enter the category (e.g., Food, Transport): ")?
            .unwrap_or_default();

        let date_input = self
            .prompt("Enter the date (YYYY-MM-DD) or press Enter for today: ")?
            .unwrap_or_default();
        let date = if date_input.is_empty() {
            None
        } else {
            Some(parse_date(&date_input)?)
        };

        let expense = self.service.add_expense(amount_cents, category, date)?;
        println!(
            "Expense of {} in {} added!",
            format_cents(expense.amount_cents),
            expense.category
        );

        Ok(())
    }

    fn view_summary(&mut self) -> Result<()> {
        println!();
        println!("1. Total spending by category");
        println!("2. Total overall spending");
        println!("3. Spending over time (daily/weekly/monthly)");

        let choice = match self.prompt("Choose an option: ")? {
            Some(line) => line,
            None => return Ok(()),
        };

        match choice.as_str() {
            "1" => {
                let category = self.prompt("Enter the category: ")?.unwrap_or_default();
                let report = self.service.category_report(&category);
                println!(
                    "Total spending on {}: {}",
                    report.category,
                    format_cents(report.total)
                );
            }
            "2" => {
                let report = self.service.overall_report();
                println!("Total overall spending: {}", format_cents(report.total));
            }
            "3" => {
                let period = self
                    .prompt("Enter the period (daily/weekly/monthly): ")?
                    .unwrap_or_default();
                let granularity: Granularity = match period.parse() {
                    Ok(g) => g,
                    Err(_) => {
                        println!("Invalid period. Please choose again.");
                        return Ok(());
                    }
                };

                run_report_command(
                    self.service,
                    ReportCommands::Breakdown {
                        period: granularity.as_str().to_string(),
                        format: "table".to_string(),
                    },
                )?;
            }
            _ => println!("Invalid choice. Please choose again."),
        }

        Ok(())
    }

    /// Prompt for one trimmed line of input. Returns None when stdin closes.
    fn prompt(&self, message: &str) -> Result<Option<String>> {
        print!("{}", message);
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
