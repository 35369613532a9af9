//! Balance calculator
//!
//! Reduces a group's expenses to a net balance per member. Every payer is
//! credited what they paid and every participant is debited an equal share,
//! computed in whole cents so that balances always sum to exactly zero.
//!
//! References to names that are not current group members are dropped rather
//! than failing the whole calculation.

use tracing::warn;

use crate::models::{Balances, Group};

use super::validation::LedgerIssue;

/// Balances together with the references that had to be dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub balances: Balances,
    pub issues: Vec<LedgerIssue>,
}

impl BalanceReport {
    /// Check if every expense was applied in full
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Compute each member's net balance
///
/// Positive balances are owed money, negative balances owe money. The
/// result follows the group's member order.
pub fn compute_balances(group: &Group) -> Balances {
    compute_balances_with_report(group).balances
}

/// Compute balances and report every dropped reference or skipped expense
///
/// The balances are identical to [`compute_balances`]; the report is purely
/// informational.
pub fn compute_balances_with_report(group: &Group) -> BalanceReport {
    let mut balances = Balances::zeroed(&group.members);
    let mut issues = Vec::new();

    for expense in &group.expenses {
        let participants = expense.participants(&group.members);
        if participants.is_empty() {
            issues.push(LedgerIssue::EmptyParticipants {
                expense: expense.id,
            });
            continue;
        }

        for payment in &expense.paid_by {
            match balances.get_mut(&payment.member) {
                Some(balance) => *balance += payment.amount,
                None => {
                    warn!(
                        expense = %expense.id,
                        member = %payment.member,
                        "Dropping credit for unknown payer"
                    );
                    issues.push(LedgerIssue::UnknownPayer {
                        expense: expense.id,
                        member: payment.member.clone(),
                    });
                }
            }
        }

        let shares = expense.amount.split_evenly(participants.len());
        for (member, share) in participants.iter().zip(shares) {
            match balances.get_mut(member) {
                Some(balance) => *balance -= share,
                None => {
                    warn!(
                        expense = %expense.id,
                        member = %member,
                        "Dropping share of unknown participant"
                    );
                    issues.push(LedgerIssue::UnknownParticipant {
                        expense: expense.id,
                        member: member.clone(),
                    });
                }
            }
        }
    }

    BalanceReport { balances, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money, PaidBy, Payment};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 12).unwrap()
    }

    fn group_of(members: &[&str]) -> Group {
        Group::new("Holiday", members.iter().map(|m| m.to_string()).collect())
    }

    fn expense(amount: i64, paid_by: Vec<Payment>, involved: &[&str]) -> Expense {
        Expense::new(
            "Shared",
            Money::from_cents(amount),
            paid_by,
            involved.iter().map(|m| m.to_string()).collect(),
            date(),
        )
    }

    fn pay(member: &str, cents: i64) -> Payment {
        Payment::new(member, Money::from_cents(cents))
    }

    #[test]
    fn test_no_expenses_all_zero() {
        let balances = compute_balances(&group_of(&["Anna", "Ben"]));
        assert_eq!(balances.get("Anna"), Some(Money::zero()));
        assert_eq!(balances.get("Ben"), Some(Money::zero()));
    }

    #[test]
    fn test_single_expense_equal_split() {
        let mut group = group_of(&["A", "B", "C"]);
        group.add_expense(expense(9000, vec![pay("A", 9000)], &["A", "B", "C"]));

        let balances = compute_balances(&group);
        assert_eq!(balances.get("A"), Some(Money::from_cents(6000)));
        assert_eq!(balances.get("B"), Some(Money::from_cents(-3000)));
        assert_eq!(balances.get("C"), Some(Money::from_cents(-3000)));
    }

    #[test]
    fn test_multi_payer_expense() {
        let mut group = group_of(&["A", "B"]);
        group.add_expense(expense(5000, vec![pay("A", 3000), pay("B", 2000)], &["A", "B"]));

        let balances = compute_balances(&group);
        assert_eq!(balances.get("A"), Some(Money::from_cents(500)));
        assert_eq!(balances.get("B"), Some(Money::from_cents(-500)));
    }

    #[test]
    fn test_partial_participation_leaves_outsider_untouched() {
        let mut group = group_of(&["A", "B", "C"]);
        group.add_expense(expense(4000, vec![pay("A", 4000)], &["A", "B"]));

        let balances = compute_balances(&group);
        assert_eq!(balances.get("A"), Some(Money::from_cents(2000)));
        assert_eq!(balances.get("B"), Some(Money::from_cents(-2000)));
        assert_eq!(balances.get("C"), Some(Money::zero()));
    }

    #[test]
    fn test_payer_need_not_participate() {
        let mut group = group_of(&["A", "B", "C"]);
        group.add_expense(expense(3000, vec![pay("A", 3000)], &["B", "C"]));

        let balances = compute_balances(&group);
        assert_eq!(balances.get("A"), Some(Money::from_cents(3000)));
        assert_eq!(balances.get("B"), Some(Money::from_cents(-1500)));
        assert_eq!(balances.get("C"), Some(Money::from_cents(-1500)));
    }

    #[test]
    fn test_empty_involved_means_everyone() {
        let mut group = group_of(&["A", "B", "C", "D"]);
        group.add_expense(expense(8000, vec![pay("B", 8000)], &[]));

        let balances = compute_balances(&group);
        assert_eq!(balances.get("A"), Some(Money::from_cents(-2000)));
        assert_eq!(balances.get("B"), Some(Money::from_cents(6000)));
    }

    #[test]
    fn test_joining_member_does_not_reshape_balances() {
        let mut group = group_of(&["A", "B", "C"]);
        group.add_expense(expense(9000, vec![pay("A", 9000)], &[]));
        let before = compute_balances(&group);

        group.add_member("D").unwrap();

        let after = compute_balances(&group);
        for member in ["A", "B", "C"] {
            assert_eq!(after.get(member), before.get(member));
        }
        assert_eq!(after.get("D"), Some(Money::zero()));
    }

    #[test]
    fn test_uneven_split_is_exact() {
        let mut group = group_of(&["A", "B", "C"]);
        group.add_expense(expense(1000, vec![pay("A", 1000)], &["A", "B", "C"]));

        let balances = compute_balances(&group);
        assert_eq!(balances.get("A"), Some(Money::from_cents(666)));
        assert_eq!(balances.get("B"), Some(Money::from_cents(-333)));
        assert_eq!(balances.get("C"), Some(Money::from_cents(-333)));
        assert_eq!(balances.total(), Money::zero());
    }

    #[test]
    fn test_legacy_single_payer_equivalent() {
        let mut legacy = group_of(&["A", "B"]);
        let mut explicit = legacy.clone();

        let amount = Money::from_cents(4000);
        legacy.add_expense(Expense::new(
            "Fuel",
            amount,
            PaidBy::from("A").normalize(amount),
            Vec::new(),
            date(),
        ));
        explicit.add_expense(expense(4000, vec![pay("A", 4000)], &[]));

        assert_eq!(compute_balances(&legacy), compute_balances(&explicit));
    }

    #[test]
    fn test_unknown_member_references_are_dropped() {
        let mut group = group_of(&["A", "B"]);
        group.add_expense(expense(2000, vec![pay("Z", 2000)], &["A", "B"]));
        group.add_expense(expense(3000, vec![pay("A", 3000)], &["B", "Y", "A"]));

        let report = compute_balances_with_report(&group);
        // First expense: Z's credit vanishes, A and B still owe 10 each.
        // Second: A +30, shares of 10 each for B, Y (dropped), A.
        assert_eq!(report.balances.get("A"), Some(Money::from_cents(1000)));
        assert_eq!(report.balances.get("B"), Some(Money::from_cents(-2000)));
        assert_eq!(report.issues.len(), 2);
        assert!(!report.is_clean());
        assert_eq!(report.balances, compute_balances(&group));
    }

    #[test]
    fn test_empty_group_skips_expense() {
        let mut group = group_of(&[]);
        group.add_expense(expense(2000, vec![pay("A", 2000)], &[]));

        let report = compute_balances_with_report(&group);
        assert!(report.balances.is_empty());
        assert!(matches!(
            report.issues[..],
            [LedgerIssue::EmptyParticipants { .. }]
        ));
    }

    #[test]
    fn test_expense_order_does_not_matter() {
        let mut forward = group_of(&["A", "B", "C"]);
        forward.add_expense(expense(1000, vec![pay("A", 1000)], &[]));
        forward.add_expense(expense(777, vec![pay("B", 500), pay("C", 277)], &["A", "C"]));
        forward.add_expense(expense(9999, vec![pay("C", 9999)], &["B"]));

        let mut reversed = forward.clone();
        reversed.expenses.reverse();

        assert_eq!(compute_balances(&forward), compute_balances(&reversed));
    }

    #[test]
    fn test_idempotent() {
        let mut group = group_of(&["A", "B", "C"]);
        group.add_expense(expense(1234, vec![pay("A", 1234)], &[]));

        assert_eq!(compute_balances(&group), compute_balances(&group));
    }

    proptest! {
        #[test]
        fn balances_sum_to_zero(
            member_count in 1usize..=6,
            raw in prop::collection::vec(
                (1i64..=100_000, 0usize..6, 0usize..6, prop::collection::vec(0usize..6, 0..6)),
                0..30,
            ),
        ) {
            let names: Vec<String> = (0..member_count).map(|i| format!("M{}", i)).collect();
            let mut group = Group::new("Prop", names.clone());

            for (amount, first_payer, second_payer, involved) in raw {
                let first = &names[first_payer % member_count];
                let second = &names[second_payer % member_count];
                let first_share = amount / 2;
                let paid_by = vec![
                    Payment::new(first.clone(), Money::from_cents(first_share)),
                    Payment::new(second.clone(), Money::from_cents(amount - first_share)),
                ];
                let mut involved: Vec<String> = involved
                    .into_iter()
                    .map(|i| names[i % member_count].clone())
                    .collect();
                involved.dedup();
                group.add_expense(Expense::new(
                    "Prop",
                    Money::from_cents(amount),
                    paid_by,
                    involved,
                    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                ));
            }

            let balances = compute_balances(&group);
            prop_assert_eq!(balances.total(), Money::zero());
        }
    }
}
