//! Payer representations
//!
//! Expenses are always stored with an explicit list of payments. `PaidBy`
//! exists only at the input boundary, where a bare member name is still
//! accepted and expanded to a single payment of the full amount.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// One member's contribution towards an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Member who fronted the money
    pub member: String,

    /// Amount this member paid
    pub amount: Money,
}

impl Payment {
    pub fn new(member: impl Into<String>, amount: Money) -> Self {
        Self {
            member: member.into(),
            amount,
        }
    }
}

/// Payer field as it arrives from callers or legacy records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaidBy {
    /// A single member paid the whole amount
    Single(String),
    /// Several members each paid part of the amount
    Split(Vec<Payment>),
}

impl PaidBy {
    /// Expand into the explicit payment list used everywhere else
    pub fn normalize(self, amount: Money) -> Vec<Payment> {
        match self {
            PaidBy::Single(member) => vec![Payment::new(member, amount)],
            PaidBy::Split(payments) => payments,
        }
    }
}

impl From<&str> for PaidBy {
    fn from(member: &str) -> Self {
        PaidBy::Single(member.to_string())
    }
}

impl From<Vec<Payment>> for PaidBy {
    fn from(payments: Vec<Payment>) -> Self {
        PaidBy::Split(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_payer_gets_full_amount() {
        let payments = PaidBy::from("Anna").normalize(Money::from_cents(4000));
        assert_eq!(payments, vec![Payment::new("Anna", Money::from_cents(4000))]);
    }

    #[test]
    fn test_split_payers_pass_through() {
        let split = vec![
            Payment::new("Anna", Money::from_cents(3000)),
            Payment::new("Ben", Money::from_cents(2000)),
        ];
        let payments = PaidBy::from(split.clone()).normalize(Money::from_cents(5000));
        assert_eq!(payments, split);
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let single: PaidBy = serde_json::from_str(r#""Anna""#).unwrap();
        assert_eq!(single, PaidBy::Single("Anna".into()));

        let split: PaidBy =
            serde_json::from_str(r#"[{"member": "Anna", "amount": 3000}]"#).unwrap();
        assert_eq!(
            split,
            PaidBy::Split(vec![Payment::new("Anna", Money::from_cents(3000))])
        );
    }
}
