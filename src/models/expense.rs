//! Expense model
//!
//! An expense records who fronted money for something and which members share
//! its cost. Payments are always held in explicit list form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;
use super::payer::Payment;

/// Largest amount a single expense or payment may carry (one billion units)
///
/// Keeps balance sums far from `i64` overflow however many expenses a group holds.
pub const MAX_EXPENSE_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// Spending category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Housing,
    Shopping,
    Health,
    Fun,
    Travel,
    Pets,
    Gifts,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        Self::Food,
        Self::Transport,
        Self::Housing,
        Self::Shopping,
        Self::Health,
        Self::Fun,
        Self::Travel,
        Self::Pets,
        Self::Gifts,
        Self::Other,
    ];

    /// Parse a category from its lowercase key
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Storage key for this category
    pub fn key(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Housing => "housing",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Fun => "fun",
            Self::Travel => "travel",
            Self::Pets => "pets",
            Self::Gifts => "gifts",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Drink",
            Self::Transport => "Transport",
            Self::Housing => "Home & Bills",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Fun => "Leisure",
            Self::Travel => "Travel",
            Self::Pets => "Pets",
            Self::Gifts => "Gifts",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A shared expense within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Total cost
    pub amount: Money,

    /// Who fronted the money and how much each
    pub paid_by: Vec<Payment>,

    /// Members sharing the cost; empty means every group member
    #[serde(default)]
    pub involved_members: Vec<String>,

    /// When the expense happened
    pub date: NaiveDate,

    #[serde(default)]
    pub category: ExpenseCategory,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        paid_by: Vec<Payment>,
        involved_members: Vec<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            paid_by,
            involved_members,
            date,
            category: ExpenseCategory::Other,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the reimbursement expense that records `from` paying `to` back
    ///
    /// `from` is credited as payer and `to` is the only participant, so the
    /// next balance computation cancels exactly this much of the debt.
    pub fn settlement(
        marker: &str,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self::new(
            marker,
            amount,
            vec![Payment::new(from, amount)],
            vec![to.into()],
            date,
        )
    }

    /// Members whose share counts against their balance
    pub fn participants<'a>(&'a self, group_members: &'a [String]) -> &'a [String] {
        if self.involved_members.is_empty() {
            group_members
        } else {
            &self.involved_members
        }
    }

    /// Sum of all payer contributions
    pub fn paid_total(&self) -> Money {
        self.paid_by.iter().map(|p| p.amount).sum()
    }

    /// Check if this expense is a recorded debt settlement
    pub fn is_settlement(&self, marker: &str) -> bool {
        self.description == marker
    }

    /// Check if a member appears as payer or participant
    pub fn references(&self, member: &str) -> bool {
        self.paid_by.iter().any(|p| p.member == member)
            || self.involved_members.iter().any(|m| m == member)
    }

    /// Rewrite every reference to `old` as `new`
    pub fn rename_member(&mut self, old: &str, new: &str) {
        let mut touched = false;
        for payment in self.paid_by.iter_mut().filter(|p| p.member == old) {
            payment.member = new.to_string();
            touched = true;
        }
        for member in self.involved_members.iter_mut().filter(|m| *m == old) {
            *member = new.to_string();
            touched = true;
        }
        if touched {
            self.updated_at = Utc::now();
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount > MAX_EXPENSE_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.paid_by.is_empty() {
            return Err(ExpenseValidationError::NoPayers);
        }

        if let Some(payment) = self.paid_by.iter().find(|p| !p.amount.is_positive()) {
            return Err(ExpenseValidationError::NonPositivePayment {
                member: payment.member.clone(),
                amount: payment.amount,
            });
        }

        if let Some(payment) = self.paid_by.iter().find(|p| p.amount > MAX_EXPENSE_AMOUNT) {
            return Err(ExpenseValidationError::AmountTooLarge(payment.amount));
        }

        let paid = self.paid_total();
        if paid != self.amount {
            return Err(ExpenseValidationError::PayerSumMismatch {
                amount: self.amount,
                paid,
            });
        }

        let mut seen = HashSet::new();
        for member in &self.involved_members {
            if !seen.insert(member.as_str()) {
                return Err(ExpenseValidationError::DuplicateParticipant(member.clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    NoPayers,
    NonPositivePayment { member: String, amount: Money },
    PayerSumMismatch { amount: Money, paid: Money },
    DuplicateParticipant(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} exceeds the limit of {}",
                amount, MAX_EXPENSE_AMOUNT
            ),
            Self::NoPayers => write!(f, "Expense must have at least one payer"),
            Self::NonPositivePayment { member, amount } => write!(
                f,
                "Payment by '{}' must be positive, got {}",
                member, amount
            ),
            Self::PayerSumMismatch { amount, paid } => write!(
                f,
                "Payer shares ({}) do not match expense amount ({})",
                paid, amount
            ),
            Self::DuplicateParticipant(member) => {
                write!(f, "Member '{}' is listed twice as participant", member)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
