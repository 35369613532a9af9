//! Display formatting for terminal output
//!
//! Turns groups, expenses, balances and statistics into plain-text tables.
//! Amounts are shown with the configured currency symbol.

pub mod balance;
pub mod expense;
pub mod group;
pub mod stats;

pub use balance::{format_balances, format_issues, format_settlements};
pub use expense::{format_expense_details, format_expense_list};
pub use group::{format_audit_entries, format_group_details, format_group_list};
pub use stats::format_stats;

use crate::models::Money;

/// Format an amount with an explicit sign for non-zero values
pub fn format_signed(amount: Money, symbol: &str) -> String {
    if amount.is_positive() {
        format!("+{}", amount.format_with_symbol(symbol))
    } else {
        amount.format_with_symbol(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(Money::from_cents(6000), "€"), "+€60.00");
        assert_eq!(format_signed(Money::from_cents(-3000), "€"), "-€30.00");
        assert_eq!(format_signed(Money::zero(), "€"), "€0.00");
    }
}
