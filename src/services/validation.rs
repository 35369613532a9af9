//! Ledger validation
//!
//! An optional pass over a group's expenses that reports data integrity
//! problems. It never changes how balances are computed.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::models::{ExpenseId, Group, Money};

/// A data integrity problem found in a group's expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerIssue {
    /// Payer shares do not add up to the expense amount
    PayerSumMismatch {
        expense: ExpenseId,
        amount: Money,
        paid: Money,
    },
    /// A payer is not a member of the group
    UnknownPayer { expense: ExpenseId, member: String },
    /// A participant is not a member of the group
    UnknownParticipant { expense: ExpenseId, member: String },
    /// Nobody shares the expense, so it has no effect
    EmptyParticipants { expense: ExpenseId },
    /// The expense amount is zero or negative
    NonPositiveAmount { expense: ExpenseId, amount: Money },
}

impl LedgerIssue {
    /// The expense this issue was found in
    pub fn expense(&self) -> ExpenseId {
        match self {
            Self::PayerSumMismatch { expense, .. }
            | Self::UnknownPayer { expense, .. }
            | Self::UnknownParticipant { expense, .. }
            | Self::EmptyParticipants { expense }
            | Self::NonPositiveAmount { expense, .. } => *expense,
        }
    }
}

impl fmt::Display for LedgerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayerSumMismatch {
                expense,
                amount,
                paid,
            } => write!(f, "{}: payers cover {} of {}", expense, paid, amount),
            Self::UnknownPayer { expense, member } => {
                write!(f, "{}: payer '{}' is not a group member", expense, member)
            }
            Self::UnknownParticipant { expense, member } => write!(
                f,
                "{}: participant '{}' is not a group member",
                expense, member
            ),
            Self::EmptyParticipants { expense } => {
                write!(f, "{}: nobody shares this expense", expense)
            }
            Self::NonPositiveAmount { expense, amount } => {
                write!(f, "{}: amount {} is not positive", expense, amount)
            }
        }
    }
}

/// Report every integrity issue in a group's expenses
pub fn validate_group(group: &Group) -> Vec<LedgerIssue> {
    let mut issues = Vec::new();

    for expense in &group.expenses {
        if !expense.amount.is_positive() {
            issues.push(LedgerIssue::NonPositiveAmount {
                expense: expense.id,
                amount: expense.amount,
            });
        }

        let paid = expense.paid_total();
        if paid != expense.amount {
            warn!(
                expense = %expense.id,
                amount = %expense.amount,
                paid = %paid,
                "Payer shares do not match expense amount"
            );
            issues.push(LedgerIssue::PayerSumMismatch {
                expense: expense.id,
                amount: expense.amount,
                paid,
            });
        }

        for payment in &expense.paid_by {
            if !group.has_member(&payment.member) {
                issues.push(LedgerIssue::UnknownPayer {
                    expense: expense.id,
                    member: payment.member.clone(),
                });
            }
        }

        let participants = expense.participants(&group.members);
        if participants.is_empty() {
            issues.push(LedgerIssue::EmptyParticipants {
                expense: expense.id,
            });
        }
        for member in participants {
            if !group.has_member(member) {
                issues.push(LedgerIssue::UnknownParticipant {
                    expense: expense.id,
                    member: member.clone(),
                });
            }
        }
    }

    issues
}
