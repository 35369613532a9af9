//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{SplitError, SplitResult};
use crate::models::{ExpenseCategory, Money, PaidBy, Payment};
use crate::services::{ExpenseService, ExpenseUpdate, GroupService, NewExpense};
use crate::storage::Storage;

use super::{parse_amount, parse_date};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense to a group
    Add {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Total amount (e.g. "45.50")
        amount: String,
        /// Payer as NAME or NAME:AMOUNT (repeat for several payers)
        #[arg(short, long = "paid-by", required = true)]
        paid_by: Vec<String>,
        /// Member sharing the cost (repeat; default is everyone)
        #[arg(short, long = "involved")]
        involved: Vec<String>,
        /// Category (food, transport, housing, shopping, health, fun, travel, pets, gifts, other)
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Expense date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List a group's expenses, newest first
    List {
        /// Group name or ID
        group: String,
    },
    /// Show one expense
    Show {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
    },
    /// Edit an expense
    Edit {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        /// Replace the payers (NAME or NAME:AMOUNT, repeatable)
        #[arg(short, long = "paid-by")]
        paid_by: Vec<String>,
        /// Replace the participants (repeatable)
        #[arg(short, long = "involved")]
        involved: Vec<String>,
        /// Share the expense with everyone again
        #[arg(long, conflicts_with = "involved")]
        everyone: bool,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SplitResult<()> {
    let groups = GroupService::new(storage);
    let service = ExpenseService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        ExpenseCommands::Add {
            group,
            description,
            amount,
            paid_by,
            involved,
            category,
            date,
        } => {
            let group = groups.require(&group)?;
            let amount = parse_amount(&amount)?;
            let input = NewExpense {
                description,
                amount,
                paid_by: parse_payers(&paid_by, amount)?,
                involved,
                category: parse_category(&category)?,
                date: parse_date(date.as_deref())?,
            };

            let expense = service.add(group.id, input)?;
            println!(
                "Added expense: {} {}",
                expense.description,
                expense.amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { group } => {
            let group = groups.require(&group)?;
            print!(
                "{}",
                format_expense_list(&group, symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Show { group, expense } => {
            let group = groups.require(&group)?;
            let found = group
                .find_expense_by_ref(&expense)
                .ok_or_else(|| SplitError::expense_not_found(&expense))?;
            print!(
                "{}",
                format_expense_details(found, &group, symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Edit {
            group,
            expense,
            description,
            amount,
            paid_by,
            involved,
            everyone,
            category,
            date,
        } => {
            let group = groups.require(&group)?;
            let current = group
                .find_expense_by_ref(&expense)
                .ok_or_else(|| SplitError::expense_not_found(&expense))?;

            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let total = amount.unwrap_or(current.amount);
            let update = ExpenseUpdate {
                description,
                amount,
                paid_by: if paid_by.is_empty() {
                    None
                } else {
                    Some(parse_payers(&paid_by, total)?)
                },
                involved: if everyone {
                    Some(Vec::new())
                } else if involved.is_empty() {
                    None
                } else {
                    Some(involved)
                },
                category: category.as_deref().map(parse_category).transpose()?,
                date: date.as_deref().map(|d| parse_date(Some(d))).transpose()?,
            };

            let updated = service.edit(group.id, &expense, update)?;
            println!("Updated expense: {}", updated);
        }

        ExpenseCommands::Delete { group, expense } => {
            let group = groups.require(&group)?;
            let deleted = service.delete(group.id, &expense)?;
            println!("Deleted expense: {}", deleted);
        }
    }

    Ok(())
}

fn parse_category(input: &str) -> SplitResult<ExpenseCategory> {
    ExpenseCategory::parse(input).ok_or_else(|| {
        let valid: Vec<_> = ExpenseCategory::ALL.iter().map(|c| c.key()).collect();
        SplitError::Validation(format!(
            "Invalid category: '{}'. Valid categories: {}",
            input,
            valid.join(", ")
        ))
    })
}

/// Turn `--paid-by` values into a payer field
///
/// A single bare name pays everything. Several bare names split the amount
/// evenly; otherwise every payer needs an explicit amount.
fn parse_payers(values: &[String], amount: Money) -> SplitResult<PaidBy> {
    let entries: Vec<(&str, Option<&str>)> = values
        .iter()
        .map(|v| match v.split_once(':') {
            Some((member, share)) => (member.trim(), Some(share.trim())),
            None => (v.trim(), None),
        })
        .collect();

    match entries.as_slice() {
        [] => Err(SplitError::Validation("At least one payer is required".into())),
        [(member, None)] => Ok(PaidBy::Single(member.to_string())),
        _ if entries.iter().all(|(_, share)| share.is_none()) => {
            let shares = amount.split_evenly(entries.len());
            Ok(PaidBy::Split(
                entries
                    .iter()
                    .zip(shares)
                    .map(|((member, _), share)| Payment::new(*member, share))
                    .collect(),
            ))
        }
        _ => entries
            .iter()
            .map(|(member, share)| match share {
                Some(share) => Ok(Payment::new(*member, parse_amount(share)?)),
                None => Err(SplitError::Validation(format!(
                    "Payer '{}' needs an amount when several members paid different shares",
                    member
                ))),
            })
            .collect::<SplitResult<Vec<_>>>()
            .map(PaidBy::Split),
    }
}
