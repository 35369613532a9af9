//! Group display formatting

use crate::audit::AuditEntry;
use crate::models::Group;
use crate::services::GroupSummary;

use super::balance::{format_balances, format_settlements};

/// Format a list of groups as a table
pub fn format_group_list(groups: &[Group]) -> String {
    if groups.is_empty() {
        return "No groups found.".to_string();
    }

    let name_width = groups
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>7}  {:>8}  {}\n",
        "ID",
        "Name",
        "Members",
        "Expenses",
        "Created",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->7}  {:->8}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width
    ));

    for group in groups {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>7}  {:>8}  {}\n",
            group.id.to_string(),
            group.name,
            group.members.len(),
            group.expenses.len(),
            group.created_at.format("%Y-%m-%d"),
            name_width = name_width
        ));
    }

    output
}

/// Format a group's members, balances and settlement plan
pub fn format_group_details(group: &Group, summary: &GroupSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("  ID:        {}\n", group.id));
    output.push_str(&format!("  Members:   {}\n", group.members.join(", ")));
    output.push_str(&format!(
        "  Expenses:  {} ({} spent)\n",
        summary.stats.expense_count,
        summary.stats.total.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Created:   {}\n",
        group.created_at.format("%Y-%m-%d %H:%M")
    ));

    output.push_str("\nBalances:\n");
    output.push_str(&format_balances(&summary.balances, symbol));

    output.push_str("\nSettlement plan:\n");
    output.push_str(&format_settlements(&summary.settlements, symbol));

    if !summary.issues.is_empty() {
        output.push_str(&format!(
            "\n{} integrity issue(s); run `balance check` for details.\n",
            summary.issues.len()
        ));
    }

    output
}

/// Format recent audit entries
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded.".to_string();
    }

    entries
        .iter()
        .map(|e| e.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money, Payment};
    use crate::services::{compute_balances, compute_settlements, validate_group, GroupStats};
    use chrono::NaiveDate;

    fn sample() -> (Group, GroupSummary) {
        let mut group = Group::new("Ski Trip", vec!["Anna".into(), "Ben".into()]);
        group.add_expense(Expense::new(
            "Chalet",
            Money::from_cents(40000),
            vec![Payment::new("Anna", Money::from_cents(40000))],
            Vec::new(),
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        ));
        let balances = compute_balances(&group);
        let summary = GroupSummary {
            settlements: compute_settlements(&balances),
            stats: GroupStats::compute(&group, "debt settlement"),
            issues: validate_group(&group),
            balances,
        };
        (group, summary)
    }

    #[test]
    fn test_group_list() {
        let (group, _) = sample();
        let output = format_group_list(&[group]);
        assert!(output.contains("Ski Trip"));
        assert_eq!(format_group_list(&[]), "No groups found.");
    }

    #[test]
    fn test_group_details() {
        let (group, summary) = sample();
        let output = format_group_details(&group, &summary, "€");

        assert!(output.contains("Members:   Anna, Ben"));
        assert!(output.contains("1 (€400.00 spent)"));
        assert!(output.contains("+€200.00"));
        assert!(output.contains("Ben owes Anna €200.00"));
        assert!(!output.contains("integrity issue"));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(format_audit_entries(&[]), "No history recorded.");
    }
}
