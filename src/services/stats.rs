//! Group spending statistics
//!
//! Aggregates a group's real spending. Recorded debt settlements only move
//! money between members, so they are left out of every figure here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ExpenseCategory, Group, Money};

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: Money,
}

/// Total fronted by one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpenderTotal {
    pub member: String,
    pub amount: Money,
}

/// Total spent on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Spending summary for a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    /// Sum of all non-settlement expenses
    pub total: Money,
    /// Number of non-settlement expenses
    pub expense_count: usize,
    /// Total divided by member count
    pub average_per_member: Money,
    /// Spending per category, largest first
    pub by_category: Vec<CategoryTotal>,
    /// Money fronted per member, largest first
    pub top_spenders: Vec<SpenderTotal>,
    /// Spending per day, oldest first
    pub timeline: Vec<DailyTotal>,
}

impl GroupStats {
    /// Compute statistics, skipping expenses described as `settlement_marker`
    pub fn compute(group: &Group, settlement_marker: &str) -> Self {
        let expenses: Vec<_> = group
            .expenses
            .iter()
            .filter(|e| !e.is_settlement(settlement_marker))
            .collect();

        let total: Money = expenses.iter().map(|e| e.amount).sum();
        let member_count = group.members.len().max(1) as i64;
        let average_per_member = Money::from_cents(total.cents() / member_count);

        let mut categories: Vec<CategoryTotal> = Vec::new();
        let mut spenders: Vec<SpenderTotal> = Vec::new();
        let mut days: BTreeMap<NaiveDate, Money> = BTreeMap::new();

        for expense in &expenses {
            match categories.iter_mut().find(|c| c.category == expense.category) {
                Some(entry) => entry.amount += expense.amount,
                None => categories.push(CategoryTotal {
                    category: expense.category,
                    amount: expense.amount,
                }),
            }

            for payment in &expense.paid_by {
                match spenders.iter_mut().find(|s| s.member == payment.member) {
                    Some(entry) => entry.amount += payment.amount,
                    None => spenders.push(SpenderTotal {
                        member: payment.member.clone(),
                        amount: payment.amount,
                    }),
                }
            }

            *days.entry(expense.date).or_default() += expense.amount;
        }

        categories.sort_by(|a, b| b.amount.cmp(&a.amount));
        spenders.sort_by(|a, b| b.amount.cmp(&a.amount));

        Self {
            total,
            expense_count: expenses.len(),
            average_per_member,
            by_category: categories,
            top_spenders: spenders,
            timeline: days
                .into_iter()
                .map(|(date, amount)| DailyTotal { date, amount })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }
}
