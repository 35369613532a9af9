//! Balance and settlement display

use crate::models::{Balances, Settlement};
use crate::services::LedgerIssue;

use super::format_signed;

/// Format balances as a list, largest creditor first
pub fn format_balances(balances: &Balances, symbol: &str) -> String {
    if balances.is_empty() {
        return "No members.".to_string();
    }

    let sorted = balances.sorted_desc();
    let name_width = sorted
        .iter()
        .map(|b| b.member.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {}\n",
        "Member",
        "Balance",
        "Status",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        name_width = name_width
    ));

    for entry in sorted.iter() {
        let status = if entry.is_creditor() {
            "is owed"
        } else if entry.is_debtor() {
            "owes"
        } else {
            "settled"
        };
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {}\n",
            entry.member,
            format_signed(entry.balance, symbol),
            status,
            name_width = name_width
        ));
    }

    output
}

/// Format a settlement plan as "A owes B €X" rows
pub fn format_settlements(settlements: &[Settlement], symbol: &str) -> String {
    if settlements.is_empty() {
        return "Everyone is settled up.".to_string();
    }

    let mut output = String::new();
    for (i, settlement) in settlements.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {} owes {} {}\n",
            i + 1,
            settlement.from,
            settlement.to,
            settlement.amount.format_with_symbol(symbol)
        ));
    }
    output
}

/// Format ledger integrity issues
pub fn format_issues(issues: &[LedgerIssue]) -> String {
    if issues.is_empty() {
        return "No issues found.".to_string();
    }

    let mut output = format!("{} issue(s) found:\n", issues.len());
    for issue in issues {
        output.push_str(&format!("  - {}\n", issue));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, MemberBalance, Money};

    fn balances() -> Balances {
        vec![
            MemberBalance::new("Ben", Money::from_cents(-3000)),
            MemberBalance::new("Anna", Money::from_cents(6000)),
            MemberBalance::new("Cleo", Money::from_cents(-3000)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_balances_sorted_and_signed() {
        let output = format_balances(&balances(), "€");
        let rows: Vec<_> = output.lines().skip(2).collect();

        assert!(rows[0].starts_with("Anna"));
        assert!(rows[0].contains("+€60.00"));
        assert!(rows[0].contains("is owed"));
        assert!(rows[1].contains("-€30.00"));
        assert!(rows[2].ends_with("owes"));
    }

    #[test]
    fn test_empty_balances() {
        assert_eq!(format_balances(&Balances::default(), "€"), "No members.");
    }

    #[test]
    fn test_settlement_rows() {
        let plan = vec![
            Settlement::new("Ben", "Anna", Money::from_cents(3000)),
            Settlement::new("Cleo", "Anna", Money::from_cents(3000)),
        ];
        let output = format_settlements(&plan, "€");

        assert!(output.contains("1. Ben owes Anna €30.00"));
        assert!(output.contains("2. Cleo owes Anna €30.00"));
        assert_eq!(format_settlements(&[], "€"), "Everyone is settled up.");
    }

    #[test]
    fn test_issue_list() {
        let issues = vec![LedgerIssue::EmptyParticipants {
            expense: ExpenseId::new(),
        }];
        let output = format_issues(&issues);
        assert!(output.starts_with("1 issue(s) found:"));
        assert!(output.contains("nobody shares this expense"));
    }
}
