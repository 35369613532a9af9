//! Expense service
//!
//! Adds, edits and deletes expenses inside a group, and records planned
//! settlements as reimbursement expenses.

use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::audit::EntityType;
use crate::error::{SplitError, SplitResult};
use crate::models::{Expense, ExpenseCategory, Group, GroupId, Money, PaidBy, Settlement};
use crate::storage::Storage;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub paid_by: PaidBy,
    /// Members sharing the cost; empty means everyone
    pub involved: Vec<String>,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

/// Changes to an existing expense; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub paid_by: Option<PaidBy>,
    pub involved: Option<Vec<String>>,
    pub category: Option<ExpenseCategory>,
    pub date: Option<NaiveDate>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add an expense to a group
    ///
    /// Every payer and participant must be a current member.
    pub fn add(&self, group_id: GroupId, input: NewExpense) -> SplitResult<Expense> {
        let mut group = self.load_group(group_id)?;

        let mut expense = Expense::new(
            input.description.trim(),
            input.amount,
            input.paid_by.normalize(input.amount),
            input.involved,
            input.date,
        );
        expense.category = input.category;
        check_expense(&group, &expense)?;

        group.add_expense(expense.clone());
        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            group_id,
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Apply changes to an expense
    ///
    /// When only the amount changes and a single member paid, that member's
    /// payment follows the new amount.
    pub fn edit(
        &self,
        group_id: GroupId,
        expense_ref: &str,
        update: ExpenseUpdate,
    ) -> SplitResult<Expense> {
        let mut group = self.load_group(group_id)?;
        let before = group
            .find_expense_by_ref(expense_ref)
            .cloned()
            .ok_or_else(|| SplitError::expense_not_found(expense_ref))?;

        let mut expense = before.clone();
        if let Some(description) = update.description {
            expense.description = description.trim().to_string();
        }
        if let Some(amount) = update.amount {
            expense.amount = amount;
        }
        match update.paid_by {
            Some(paid_by) => expense.paid_by = paid_by.normalize(expense.amount),
            None => {
                if let [only] = expense.paid_by.as_mut_slice() {
                    only.amount = expense.amount;
                }
            }
        }
        if let Some(involved) = update.involved {
            expense.involved_members = involved;
        }
        if let Some(category) = update.category {
            expense.category = category;
        }
        if let Some(date) = update.date {
            expense.date = date;
        }
        expense.updated_at = Utc::now();
        check_expense(&group, &expense)?;

        group.replace_expense(expense.clone());
        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            group_id,
            Some(expense.description.clone()),
            &before,
            &expense,
            None,
        )?;

        Ok(expense)
    }

    /// Delete an expense by ID reference
    pub fn delete(&self, group_id: GroupId, expense_ref: &str) -> SplitResult<Expense> {
        let mut group = self.load_group(group_id)?;
        let id = group
            .find_expense_by_ref(expense_ref)
            .map(|e| e.id)
            .ok_or_else(|| SplitError::expense_not_found(expense_ref))?;
        let expense = group
            .remove_expense(id)
            .ok_or_else(|| SplitError::expense_not_found(expense_ref))?;

        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            group_id,
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// A group's expenses, newest first
    pub fn list(&self, group_id: GroupId) -> SplitResult<Vec<Expense>> {
        Ok(self.load_group(group_id)?.expenses)
    }

    /// Record a planned payment as a reimbursement expense
    ///
    /// The debtor is credited as payer and the creditor is the only
    /// participant, so the payment cancels exactly that much debt.
    pub fn record_settlement(
        &self,
        group_id: GroupId,
        settlement: &Settlement,
        date: NaiveDate,
        marker: &str,
    ) -> SplitResult<Expense> {
        let mut group = self.load_group(group_id)?;
        if settlement.from == settlement.to {
            return Err(SplitError::Validation(format!(
                "{} cannot settle a debt with themselves",
                settlement.from
            )));
        }

        let expense = Expense::settlement(
            marker,
            settlement.from.clone(),
            settlement.to.clone(),
            settlement.amount,
            date,
        );
        check_expense(&group, &expense)?;

        group.add_expense(expense.clone());
        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Settlement,
            expense.id.to_string(),
            group_id,
            Some(settlement.to_string()),
            &expense,
        )?;

        Ok(expense)
    }

    fn load_group(&self, id: GroupId) -> SplitResult<Group> {
        self.storage
            .groups
            .get(id)?
            .ok_or_else(|| SplitError::group_not_found(id.to_string()))
    }
}

/// Validate an expense and make sure it only names group members
fn check_expense(group: &Group, expense: &Expense) -> SplitResult<()> {
    if let Err(e) = expense.validate() {
        warn!(expense = %expense.id, error = %e, "Rejected expense");
        return Err(SplitError::Validation(e.to_string()));
    }

    let unknown = expense
        .paid_by
        .iter()
        .map(|p| &p.member)
        .chain(&expense.involved_members)
        .find(|m| !group.has_member(m));
    if let Some(member) = unknown {
        return Err(SplitError::Validation(format!(
            "'{}' is not a member of {}",
            member, group.name
        )));
    }

    Ok(())
}
