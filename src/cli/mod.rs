//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod balance;
pub mod expense;
pub mod group;

pub use balance::{handle_balance_command, handle_stats_command, BalanceCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use group::{handle_group_command, GroupCommands};

use chrono::{Local, NaiveDate};

use crate::error::{SplitError, SplitResult};
use crate::models::Money;

/// Parse a user-entered amount
fn parse_amount(input: &str) -> SplitResult<Money> {
    Money::parse(input).map_err(|e| {
        SplitError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50' or '12,50'. Error: {}",
            input, e
        ))
    })
}

/// Parse an optional YYYY-MM-DD date, defaulting to today
fn parse_date(input: Option<&str>) -> SplitResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            SplitError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD.", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}
