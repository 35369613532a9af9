//! Balance, settlement and statistics CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_balances, format_issues, format_settlements, format_stats};
use crate::error::{SplitError, SplitResult};
use crate::models::Settlement;
use crate::services::{
    compute_balances, compute_settlements, validate_group, ExpenseService, GroupService,
    GroupStats,
};
use crate::storage::Storage;

use super::{parse_amount, parse_date};

/// Balance subcommands
#[derive(Subcommand)]
pub enum BalanceCommands {
    /// Show balances and who should pay whom
    Show {
        /// Group name or ID
        group: String,
    },
    /// Report expenses that reference unknown members or don't add up
    Check {
        /// Group name or ID
        group: String,
    },
    /// Record that one member paid another back
    Settle {
        /// Group name or ID
        group: String,
        /// Member paying
        from: String,
        /// Member being paid
        to: String,
        /// Amount (default: the planned amount between the two)
        amount: Option<String>,
        /// Payment date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a balance command
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BalanceCommands,
) -> SplitResult<()> {
    let groups = GroupService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        BalanceCommands::Show { group } => {
            let group = groups.require(&group)?;
            let balances = compute_balances(&group);
            let plan = compute_settlements(&balances);

            println!("Balances for {}:", group.name);
            print!("{}", format_balances(&balances, symbol));
            println!();
            println!("Settlement plan:");
            println!("{}", format_settlements(&plan, symbol).trim_end());
        }

        BalanceCommands::Check { group } => {
            let group = groups.require(&group)?;
            println!("{}", format_issues(&validate_group(&group)).trim_end());
        }

        BalanceCommands::Settle {
            group,
            from,
            to,
            amount,
            date,
        } => {
            let group = groups.require(&group)?;
            let amount = match amount {
                Some(amount) => parse_amount(&amount)?,
                None => compute_settlements(&compute_balances(&group))
                    .into_iter()
                    .find(|s| s.from == from && s.to == to)
                    .map(|s| s.amount)
                    .ok_or_else(|| {
                        SplitError::Validation(format!(
                            "No planned payment from {} to {}; pass an amount to record one anyway",
                            from, to
                        ))
                    })?,
            };

            let settlement = Settlement::new(from, to, amount);
            ExpenseService::new(storage).record_settlement(
                group.id,
                &settlement,
                parse_date(date.as_deref())?,
                &settings.settlement_marker,
            )?;
            println!(
                "Recorded: {} paid {} {}",
                settlement.from,
                settlement.to,
                settlement.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}

/// Handle the stats command
pub fn handle_stats_command(
    storage: &Storage,
    settings: &Settings,
    group: &str,
) -> SplitResult<()> {
    let group = GroupService::new(storage).require(group)?;
    let stats = GroupStats::compute(&group, &settings.settlement_marker);

    println!("Statistics for {}:", group.name);
    print!(
        "{}",
        format_stats(&stats, &settings.currency_symbol, &settings.date_format)
    );
    if stats.is_empty() {
        println!();
    }

    Ok(())
}
