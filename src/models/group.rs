//! Group model
//!
//! A group is a named set of members plus the expenses they share. Member
//! names are the identity used by expenses, so renames rewrite every
//! reference in the group's expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Expense;
use super::ids::{ExpenseId, GroupId};

/// A group of people sharing expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Ordered, unique member display names
    pub members: Vec<String>,

    /// Expenses, newest first
    #[serde(default)]
    pub expenses: Vec<Expense>,

    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group with the given members
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            members,
            expenses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_member(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// Add a member, rejecting blank or duplicate names
    ///
    /// Expenses shared by everyone (empty participant list) are pinned to the
    /// members present before the join, so a newcomer never inherits a share
    /// of past costs.
    pub fn add_member(&mut self, member: &str) -> Result<(), GroupValidationError> {
        let member = member.trim();
        if member.is_empty() {
            return Err(GroupValidationError::EmptyMemberName);
        }
        if self.has_member(member) {
            return Err(GroupValidationError::DuplicateMember(member.to_string()));
        }
        for expense in &mut self.expenses {
            if expense.involved_members.is_empty() {
                expense.involved_members = self.members.clone();
            }
        }
        self.members.push(member.to_string());
        Ok(())
    }

    /// Rename a member and every payer/participant reference to them
    pub fn rename_member(&mut self, old: &str, new: &str) -> Result<(), GroupValidationError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(GroupValidationError::EmptyMemberName);
        }
        let position = self
            .members
            .iter()
            .position(|m| m == old)
            .ok_or_else(|| GroupValidationError::UnknownMember(old.to_string()))?;
        if old != new && self.has_member(new) {
            return Err(GroupValidationError::DuplicateMember(new.to_string()));
        }

        self.members[position] = new.to_string();
        for expense in &mut self.expenses {
            expense.rename_member(old, new);
        }
        Ok(())
    }

    /// Remove a member who takes no part in any expense
    ///
    /// Expenses without an explicit participant list are shared by everyone,
    /// so they block removal as well.
    pub fn remove_member(&mut self, member: &str) -> Result<(), GroupValidationError> {
        let position = self
            .members
            .iter()
            .position(|m| m == member)
            .ok_or_else(|| GroupValidationError::UnknownMember(member.to_string()))?;

        if self
            .expenses
            .iter()
            .any(|e| e.references(member) || e.involved_members.is_empty())
        {
            return Err(GroupValidationError::MemberHasExpenses(member.to_string()));
        }
        if self.members.len() == 1 {
            return Err(GroupValidationError::NoMembers);
        }

        self.members.remove(position);
        Ok(())
    }

    /// Add an expense at the front of the list
    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
    }

    /// Find an expense by ID
    pub fn find_expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Find an expense by full or short ID reference
    pub fn find_expense_by_ref(&self, reference: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id.matches(reference))
    }

    /// Replace an existing expense in place, returning the previous version
    pub fn replace_expense(&mut self, expense: Expense) -> Option<Expense> {
        let slot = self.expenses.iter_mut().find(|e| e.id == expense.id)?;
        Some(std::mem::replace(slot, expense))
    }

    /// Remove an expense, returning it if it existed
    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        let position = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(position))
    }

    /// Validate the group's own fields
    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }
        if self.members.is_empty() {
            return Err(GroupValidationError::NoMembers);
        }
        for (i, member) in self.members.iter().enumerate() {
            if member.trim().is_empty() {
                return Err(GroupValidationError::EmptyMemberName);
            }
            if self.members[..i].contains(member) {
                return Err(GroupValidationError::DuplicateMember(member.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} members)", self.name, self.members.len())
    }
}

/// Validation errors for groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    EmptyName,
    NoMembers,
    EmptyMemberName,
    DuplicateMember(String),
    UnknownMember(String),
    MemberHasExpenses(String),
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Group name cannot be empty"),
            Self::NoMembers => write!(f, "Group must have at least one member"),
            Self::EmptyMemberName => write!(f, "Member name cannot be empty"),
            Self::DuplicateMember(name) => write!(f, "Member '{}' is already in the group", name),
            Self::UnknownMember(name) => write!(f, "Member '{}' is not in the group", name),
            Self::MemberHasExpenses(name) => write!(
                f,
                "Member '{}' still appears in expenses and cannot be removed",
                name
            ),
        }
    }
}

impl std::error::Error for GroupValidationError {}
