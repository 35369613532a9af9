use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use splitledger::cli::{
    handle_balance_command, handle_expense_command, handle_group_command, handle_stats_command,
    BalanceCommands, ExpenseCommands, GroupCommands,
};
use splitledger::config::{paths::SplitPaths, settings::Settings};
use splitledger::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SPLITLEDGER_LOG";

#[derive(Parser)]
#[command(
    name = "splitledger",
    author = "Kaylee Beyene",
    version,
    about = "Track shared expenses and settle group debts",
    long_about = "SplitLedger records who paid for what in a group, shows each \
                  member's net balance and plans the payments that settle \
                  everyone up."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Group and member management
    #[command(subcommand)]
    Group(GroupCommands),

    /// Expense management
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Balances and settlements
    #[command(subcommand)]
    Balance(BalanceCommands),

    /// Spending statistics for a group
    Stats {
        /// Group name or ID
        group: String,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = SplitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Group(cmd)) => handle_group_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Balance(cmd)) => handle_balance_command(&storage, &settings, cmd)?,
        Some(Commands::Stats { group }) => handle_stats_command(&storage, &settings, &group)?,
        Some(Commands::Init) => {
            println!("Initializing SplitLedger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            // Rewrites any legacy document in the current schema
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Create your first group with:");
            println!("  splitledger group create \"Trip\" --member Anna --member Ben");
        }
        Some(Commands::Config) => {
            println!("SplitLedger Configuration");
            println!("=========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Groups file:     {}", paths.groups_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Settlement marker: {}", settings.settlement_marker);
        }
        None => {
            println!("SplitLedger - shared expenses, settled");
            println!();
            println!("Run 'splitledger --help' for usage information.");
        }
    }

    Ok(())
}
