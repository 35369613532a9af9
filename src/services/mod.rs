//! Service layer for SplitLedger
//!
//! The pure calculators (`balance`, `settlement`, `stats`, `validation`)
//! work on in-memory groups and never fail. The group and expense services
//! sit on top of storage and handle validation, persistence and auditing.

pub mod balance;
pub mod expense;
pub mod group;
pub mod settlement;
pub mod stats;
pub mod validation;

pub use balance::{compute_balances, compute_balances_with_report, BalanceReport};
pub use expense::{ExpenseService, ExpenseUpdate, NewExpense};
pub use group::{GroupService, GroupSummary};
pub use settlement::{apply_settlements, compute_settlements};
pub use stats::{CategoryTotal, DailyTotal, GroupStats, SpenderTotal};
pub use validation::{validate_group, LedgerIssue};
