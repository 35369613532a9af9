//! Core data models for SplitLedger
//!
//! This module contains the data structures of the shared-expense domain:
//! groups, expenses, payments, balances and settlements.

pub mod balance;
pub mod expense;
pub mod group;
pub mod ids;
pub mod money;
pub mod payer;
pub mod settlement;

pub use balance::{Balances, MemberBalance};
pub use expense::{Expense, ExpenseCategory, ExpenseValidationError, MAX_EXPENSE_AMOUNT};
pub use group::{Group, GroupValidationError};
pub use ids::{ExpenseId, GroupId};
pub use money::{Money, MoneyParseError, SETTLED_TOLERANCE};
pub use payer::{PaidBy, Payment};
pub use settlement::Settlement;
