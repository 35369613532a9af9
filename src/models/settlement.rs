//! Settlement model
//!
//! A proposed payment from a debtor to a creditor.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A single planned transfer that reduces outstanding debt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Member who owes money
    pub from: String,
    /// Member who is owed money
    pub to: String,
    /// Always positive
    pub amount: Money,
}

impl Settlement {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Money) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {} {}", self.from, self.to, self.amount)
    }
}
