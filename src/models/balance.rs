//! Balance model
//!
//! Net position of every group member: positive means the member is owed
//! money, negative means the member owes money.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A single member's net balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member: String,
    pub balance: Money,
}

impl MemberBalance {
    pub fn new(member: impl Into<String>, balance: Money) -> Self {
        Self {
            member: member.into(),
            balance,
        }
    }

    /// Check if this member is owed money
    pub fn is_creditor(&self) -> bool {
        self.balance.is_positive()
    }

    /// Check if this member owes money
    pub fn is_debtor(&self) -> bool {
        self.balance.is_negative()
    }
}

impl fmt::Display for MemberBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.member, self.balance)
    }
}

/// Balances for every member of a group, in group member order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(Vec<MemberBalance>);

impl Balances {
    /// Start every listed member at zero
    pub fn zeroed<S: AsRef<str>>(members: &[S]) -> Self {
        Self(
            members
                .iter()
                .map(|m| MemberBalance::new(m.as_ref(), Money::zero()))
                .collect(),
        )
    }

    /// Balance of a member, if they are part of the mapping
    pub fn get(&self, member: &str) -> Option<Money> {
        self.0
            .iter()
            .find(|b| b.member == member)
            .map(|b| b.balance)
    }

    /// Mutable balance of a member, if they are part of the mapping
    pub fn get_mut(&mut self, member: &str) -> Option<&mut Money> {
        self.0
            .iter_mut()
            .find(|b| b.member == member)
            .map(|b| &mut b.balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberBalance> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all members; zero for any group computed from expenses
    pub fn total(&self) -> Money {
        self.0.iter().map(|b| b.balance).sum()
    }

    /// Members ordered from largest creditor to largest debtor
    ///
    /// Ties keep group member order.
    pub fn sorted_desc(&self) -> Vec<MemberBalance> {
        let mut sorted = self.0.clone();
        sorted.sort_by(|a, b| b.balance.cmp(&a.balance));
        sorted
    }
}

impl FromIterator<MemberBalance> for Balances {
    fn from_iter<I: IntoIterator<Item = MemberBalance>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Balances {
    type Item = MemberBalance;
    type IntoIter = std::vec::IntoIter<MemberBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = &'a MemberBalance;
    type IntoIter = std::slice::Iter<'a, MemberBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Balances {
        [
            MemberBalance::new("Anna", Money::from_cents(-500)),
            MemberBalance::new("Ben", Money::from_cents(1000)),
            MemberBalance::new("Cleo", Money::from_cents(-500)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_zeroed() {
        let balances = Balances::zeroed(&["Anna", "Ben"]);
        assert_eq!(balances.len(), 2);
        assert_eq!(balances.get("Anna"), Some(Money::zero()));
        assert_eq!(balances.get("Zed"), None);
    }

    #[test]
    fn test_get_mut() {
        let mut balances = Balances::zeroed(&["Anna"]);
        *balances.get_mut("Anna").unwrap() += Money::from_cents(250);
        assert_eq!(balances.get("Anna"), Some(Money::from_cents(250)));
        assert!(balances.get_mut("Zed").is_none());
    }

    #[test]
    fn test_total() {
        assert_eq!(sample().total(), Money::zero());
    }

    #[test]
    fn test_sorted_desc_is_stable() {
        let sorted = sample().sorted_desc();
        let names: Vec<_> = sorted.iter().map(|b| b.member.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Anna", "Cleo"]);
    }

    #[test]
    fn test_creditor_debtor() {
        let b = MemberBalance::new("Ben", Money::from_cents(1000));
        assert!(b.is_creditor());
        assert!(!b.is_debtor());
        assert_eq!(format!("{}", b), "Ben: 10.00");
    }
}
