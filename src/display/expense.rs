//! Expense display formatting

use crate::models::{Expense, Group};

/// Format a group's expenses as a table, in stored order
pub fn format_expense_list(group: &Group, symbol: &str, date_format: &str) -> String {
    if group.expenses.is_empty() {
        return format!("No expenses in {}.", group.name);
    }

    let desc_width = group
        .expenses
        .iter()
        .map(|e| e.description.chars().count())
        .max()
        .unwrap_or(11)
        .clamp(11, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<desc_width$}  {:>12}  {}\n",
        "ID",
        "Date",
        "Description",
        "Amount",
        "Paid by",
        desc_width = desc_width
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<desc_width$}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        desc_width = desc_width
    ));

    for expense in &group.expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<desc_width$}  {:>12}  {}\n",
            expense.id.to_string(),
            expense.date.format(date_format).to_string(),
            truncate(&expense.description, desc_width),
            expense.amount.format_with_symbol(symbol),
            payers(expense),
            desc_width = desc_width
        ));
    }

    output
}

/// Format one expense with its payers and participants
pub fn format_expense_details(
    expense: &Expense,
    group: &Group,
    symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.description));
    output.push_str(&format!("  ID:        {}\n", expense.id));
    output.push_str(&format!("  Date:      {}\n", expense.date.format(date_format)));
    output.push_str(&format!(
        "  Amount:    {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Category:  {}\n", expense.category));
    output.push_str("  Paid by:\n");
    for payment in &expense.paid_by {
        output.push_str(&format!(
            "    {} {}\n",
            payment.member,
            payment.amount.format_with_symbol(symbol)
        ));
    }

    let shared_by = if expense.involved_members.is_empty() {
        format!("everyone ({})", group.members.join(", "))
    } else {
        expense.involved_members.join(", ")
    };
    output.push_str(&format!("  Shared by: {}\n", shared_by));

    output
}

fn payers(expense: &Expense) -> String {
    expense
        .paid_by
        .iter()
        .map(|p| p.member.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
