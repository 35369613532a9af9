//! Settlement planner
//!
//! Turns member balances into a list of point-to-point payments that clear
//! every debt. Uses greedy largest-first matching: the biggest debtor pays
//! the biggest creditor as much as possible, then whichever side reached
//! zero is replaced by the next one. This is not a minimum-transaction
//! solver, but it is deterministic and produces at most
//! `debtors + creditors - 1` payments.

use tracing::debug;

use crate::models::{Balances, Money, Settlement, SETTLED_TOLERANCE};

/// Plan the payments that bring every balance back to zero
///
/// Balances within [`SETTLED_TOLERANCE`] of zero are considered settled.
/// Members with equal balances keep their group order.
pub fn compute_settlements(balances: &Balances) -> Vec<Settlement> {
    let mut debtors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|b| b.balance < -SETTLED_TOLERANCE)
        .map(|b| (b.member.as_str(), b.balance))
        .collect();
    let mut creditors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|b| b.balance > SETTLED_TOLERANCE)
        .map(|b| (b.member.as_str(), b.balance))
        .collect();

    // Most negative debtor first, largest creditor first; both sorts are stable
    debtors.sort_by(|a, b| a.1.cmp(&b.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let (debtor, owed) = &mut debtors[i];
        let (creditor, due) = &mut creditors[j];

        let amount = owed.abs().min(*due);
        debug!(from = *debtor, to = *creditor, %amount, "Planned settlement");
        settlements.push(Settlement::new(*debtor, *creditor, amount));

        *owed += amount;
        *due -= amount;

        if owed.abs() < SETTLED_TOLERANCE {
            i += 1;
        }
        if *due < SETTLED_TOLERANCE {
            j += 1;
        }
    }

    settlements
}

/// Apply a settlement plan to balances
///
/// Each payment raises the payer's balance and lowers the receiver's.
/// Names that are not in `balances` are ignored.
pub fn apply_settlements(balances: &Balances, settlements: &[Settlement]) -> Balances {
    let mut result = balances.clone();
    for settlement in settlements {
        if let Some(from) = result.get_mut(&settlement.from) {
            *from += settlement.amount;
        }
        if let Some(to) = result.get_mut(&settlement.to) {
            *to -= settlement.amount;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberBalance;
    use proptest::prelude::*;

    fn balances(entries: &[(&str, i64)]) -> Balances {
        entries
            .iter()
            .map(|(m, c)| MemberBalance::new(*m, Money::from_cents(*c)))
            .collect()
    }

    fn settlement(from: &str, to: &str, cents: i64) -> Settlement {
        Settlement::new(from, to, Money::from_cents(cents))
    }

    fn assert_closed(balances: &Balances, plan: &[Settlement]) {
        let after = apply_settlements(balances, plan);
        for b in after.iter() {
            assert!(
                b.balance.abs() <= SETTLED_TOLERANCE,
                "{} left at {}",
                b.member,
                b.balance
            );
        }
    }

    #[test]
    fn test_one_creditor_two_debtors() {
        let input = balances(&[("A", 6000), ("B", -3000), ("C", -3000)]);
        let plan = compute_settlements(&input);

        assert_eq!(
            plan,
            vec![settlement("B", "A", 3000), settlement("C", "A", 3000)]
        );
        assert_closed(&input, &plan);
    }

    #[test]
    fn test_two_members() {
        let input = balances(&[("A", 500), ("B", -500)]);
        assert_eq!(compute_settlements(&input), vec![settlement("B", "A", 500)]);
    }

    #[test]
    fn test_already_settled_group() {
        let input = balances(&[("A", 1), ("B", -1), ("C", 0)]);
        assert!(compute_settlements(&input).is_empty());
        assert!(compute_settlements(&Balances::default()).is_empty());
    }

    #[test]
    fn test_largest_first_matching() {
        let input = balances(&[
            ("A", -1000),
            ("B", 2500),
            ("C", -4000),
            ("D", 1500),
            ("E", 1000),
        ]);
        let plan = compute_settlements(&input);

        assert_eq!(
            plan,
            vec![
                settlement("C", "B", 2500),
                settlement("C", "D", 1500),
                settlement("A", "E", 1000),
            ]
        );
        assert_closed(&input, &plan);
    }

    #[test]
    fn test_partial_transfers_chain() {
        let input = balances(&[("A", 700), ("B", 300), ("C", -500), ("D", -500)]);
        let plan = compute_settlements(&input);

        assert_eq!(
            plan,
            vec![
                settlement("C", "A", 500),
                settlement("D", "A", 200),
                settlement("D", "B", 300),
            ]
        );
        assert_closed(&input, &plan);
    }

    #[test]
    fn test_ties_keep_member_order() {
        let input = balances(&[("Zed", -500), ("Amy", -500), ("Max", 1000)]);
        let plan = compute_settlements(&input);
        assert_eq!(
            plan,
            vec![settlement("Zed", "Max", 500), settlement("Amy", "Max", 500)]
        );
    }

    #[test]
    fn test_residual_below_tolerance_is_dropped() {
        // A one-cent creditor left over after drift is never paid out
        let input = balances(&[("A", 501), ("B", -500)]);
        let plan = compute_settlements(&input);
        assert_eq!(plan, vec![settlement("B", "A", 500)]);
        assert_closed(&input, &plan);
    }

    #[test]
    fn test_idempotent() {
        let input = balances(&[("A", 1234), ("B", -234), ("C", -1000)]);
        assert_eq!(compute_settlements(&input), compute_settlements(&input));
    }

    #[test]
    fn test_apply_settlements_ignores_unknown() {
        let input = balances(&[("A", 500), ("B", -500)]);
        let after = apply_settlements(&input, &[settlement("B", "Z", 500)]);
        assert_eq!(after.get("B"), Some(Money::zero()));
        assert_eq!(after.get("A"), Some(Money::from_cents(500)));
    }

    // Zero-sum balances with no one sitting inside the tolerance window
    fn zero_sum_balances() -> impl Strategy<Value = Balances> {
        prop::collection::vec(-50_000i64..=50_000, 1..8)
            .prop_map(|mut cents| {
                let total: i64 = cents.iter().sum();
                cents.push(-total);
                cents
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| MemberBalance::new(format!("M{}", i), Money::from_cents(c)))
                    .collect::<Balances>()
            })
            .prop_filter("no dust balances", |balances| {
                balances
                    .iter()
                    .all(|b| b.balance.is_zero() || b.balance.abs() > SETTLED_TOLERANCE)
            })
    }

    proptest! {
        #[test]
        fn plan_closes_every_balance(input in zero_sum_balances()) {
            let plan = compute_settlements(&input);
            let after = apply_settlements(&input, &plan);
            for b in after.iter() {
                prop_assert_eq!(b.balance, Money::zero());
            }
        }

        #[test]
        fn plan_amounts_positive_and_bounded(input in zero_sum_balances()) {
            let plan = compute_settlements(&input);
            prop_assert!(plan.iter().all(|s| s.amount.is_positive()));

            let debtors = input.iter().filter(|b| b.balance < -SETTLED_TOLERANCE).count();
            let creditors = input.iter().filter(|b| b.balance > SETTLED_TOLERANCE).count();
            if debtors + creditors > 0 {
                prop_assert!(plan.len() < debtors + creditors);
            } else {
                prop_assert!(plan.is_empty());
            }
        }
    }
}
