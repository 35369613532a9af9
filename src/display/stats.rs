//! Statistics display formatting

use crate::services::GroupStats;

/// Format group statistics with category, spender and daily breakdowns
pub fn format_stats(stats: &GroupStats, symbol: &str, date_format: &str) -> String {
    if stats.is_empty() {
        return "No spending recorded yet.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Total spent:        {}\n",
        stats.total.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Expenses:           {}\n", stats.expense_count));
    output.push_str(&format!(
        "Average per member: {}\n",
        stats.average_per_member.format_with_symbol(symbol)
    ));

    output.push_str("\nBy category:\n");
    for entry in &stats.by_category {
        output.push_str(&format!(
            "  {:<14} {:>12}  {:>5.1}%\n",
            entry.category.label(),
            entry.amount.format_with_symbol(symbol),
            share(entry.amount.cents(), stats.total.cents())
        ));
    }

    output.push_str("\nTop spenders:\n");
    for entry in &stats.top_spenders {
        output.push_str(&format!(
            "  {:<14} {:>12}\n",
            entry.member,
            entry.amount.format_with_symbol(symbol)
        ));
    }

    output.push_str("\nTimeline:\n");
    for entry in &stats.timeline {
        output.push_str(&format!(
            "  {:<14} {:>12}\n",
            entry.date.format(date_format).to_string(),
            entry.amount.format_with_symbol(symbol)
        ));
    }

    output
}

fn share(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, Group, Money, Payment};
    use chrono::NaiveDate;

    #[test]
    fn test_stats_output() {
        let mut group = Group::new("Trip", vec!["Anna".into(), "Ben".into()]);
        let mut taxi = Expense::new(
            "Taxi",
            Money::from_cents(2500),
            vec![Payment::new("Ben", Money::from_cents(2500))],
            Vec::new(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        );
        taxi.category = ExpenseCategory::Transport;
        group.add_expense(taxi);
        group.add_expense(Expense::new(
            "Snacks",
            Money::from_cents(7500),
            vec![Payment::new("Anna", Money::from_cents(7500))],
            Vec::new(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        ));

        let stats = GroupStats::compute(&group, "debt settlement");
        let output = format_stats(&stats, "€", "%Y-%m-%d");

        assert!(output.contains("Total spent:        €100.00"));
        assert!(output.contains("Average per member: €50.00"));
        assert!(output.contains("Other"));
        assert!(output.contains("75.0%"));
        assert!(output.find("2025-06-01").unwrap() < output.find("2025-06-02").unwrap());
    }

    #[test]
    fn test_empty_stats() {
        let group = Group::new("Quiet", vec!["Anna".into()]);
        let stats = GroupStats::compute(&group, "debt settlement");
        assert_eq!(format_stats(&stats, "€", "%Y-%m-%d"), "No spending recorded yet.");
    }
}
