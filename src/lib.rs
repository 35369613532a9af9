//! SplitLedger - terminal-based shared expense tracker
//!
//! Tracks who paid what inside a group, turns the expenses into a net
//! balance per member and plans the payments that settle every debt.
//!
//! # Architecture
//!
//! - `models`: groups, expenses, payments, balances and settlements
//! - `services`: balance and settlement calculators, statistics, validation,
//!   and the group/expense services on top of storage
//! - `storage`: atomic JSON storage with schema migration
//! - `audit`: append-only audit log
//! - `config`: path resolution and user settings
//! - `display`: plain-text rendering
//! - `cli`: clap subcommands and their handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use splitledger::models::{Expense, Group, Money, Payment};
//! use splitledger::services::{compute_balances, compute_settlements};
//!
//! let mut group = Group::new("Trip", vec!["A".into(), "B".into(), "C".into()]);
//! group.add_expense(Expense::new(
//!     "Dinner",
//!     Money::from_cents(9000),
//!     vec![Payment::new("A", Money::from_cents(9000))],
//!     Vec::new(),
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//! ));
//!
//! let balances = compute_balances(&group);
//! assert_eq!(balances.get("A"), Some(Money::from_cents(6000)));
//! assert_eq!(compute_settlements(&balances).len(), 2);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SplitError, SplitResult};
