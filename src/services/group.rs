//! Group service
//!
//! Creates and deletes groups and manages their member lists. Member
//! changes go through the group model so expense references stay in step.

use serde::Serialize;

use crate::audit::EntityType;
use crate::error::{SplitError, SplitResult};
use crate::models::{Balances, Group, GroupId, Settlement};
use crate::storage::Storage;

use super::balance::compute_balances;
use super::settlement::compute_settlements;
use super::stats::GroupStats;
use super::validation::{validate_group, LedgerIssue};

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
}

/// Everything needed to show where a group stands
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub balances: Balances,
    pub settlements: Vec<Settlement>,
    pub stats: GroupStats,
    pub issues: Vec<LedgerIssue>,
}

impl<'a> GroupService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new group
    ///
    /// Member names are trimmed; the group needs at least one member and
    /// names must be unique within it.
    pub fn create(&self, name: &str, members: &[String]) -> SplitResult<Group> {
        let name = name.trim();
        if self.storage.groups.name_exists(name, None)? {
            return Err(SplitError::Duplicate {
                entity_type: "Group",
                identifier: name.to_string(),
            });
        }

        let members = members.iter().map(|m| m.trim().to_string()).collect();
        let group = Group::new(name, members);
        group
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            group.id,
            Some(group.name.clone()),
            &group,
        )?;

        Ok(group)
    }

    pub fn get(&self, id: GroupId) -> SplitResult<Option<Group>> {
        self.storage.groups.get(id)
    }

    /// Find a group by name or ID reference
    pub fn find(&self, reference: &str) -> SplitResult<Option<Group>> {
        self.storage.groups.find(reference)
    }

    /// Like [`find`](Self::find), but a missing group is an error
    pub fn require(&self, reference: &str) -> SplitResult<Group> {
        self.find(reference)?
            .ok_or_else(|| SplitError::group_not_found(reference))
    }

    /// All groups, newest first
    pub fn list(&self) -> SplitResult<Vec<Group>> {
        self.storage.groups.get_all()
    }

    /// Delete a group and all of its expenses
    pub fn delete(&self, id: GroupId) -> SplitResult<Group> {
        let group = self
            .get(id)?
            .ok_or_else(|| SplitError::group_not_found(id.to_string()))?;

        self.storage.groups.delete(id)?;
        self.storage.groups.save()?;

        self.storage.log_delete(
            EntityType::Group,
            group.id.to_string(),
            group.id,
            Some(group.name.clone()),
            &group,
        )?;

        Ok(group)
    }

    pub fn add_member(&self, id: GroupId, member: &str) -> SplitResult<Group> {
        let mut group = self.load(id)?;
        group
            .add_member(member)
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        let member = member.trim();
        self.storage.log_create(
            EntityType::Member,
            member,
            group.id,
            Some(group.name.clone()),
            &member,
        )?;

        Ok(group)
    }

    /// Rename a member, rewriting every expense that mentions them
    pub fn rename_member(&self, id: GroupId, old: &str, new: &str) -> SplitResult<Group> {
        let mut group = self.load(id)?;
        if !group.has_member(old) {
            return Err(SplitError::member_not_found(old));
        }
        group
            .rename_member(old, new)
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        let new = new.trim();
        self.storage.log_update(
            EntityType::Member,
            new,
            group.id,
            Some(group.name.clone()),
            &old,
            &new,
            Some(format!("Renamed {} to {}", old, new)),
        )?;

        Ok(group)
    }

    /// Remove a member who has no part in any expense
    pub fn remove_member(&self, id: GroupId, member: &str) -> SplitResult<Group> {
        let mut group = self.load(id)?;
        if !group.has_member(member) {
            return Err(SplitError::member_not_found(member));
        }
        group
            .remove_member(member)
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.groups.upsert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_delete(
            EntityType::Member,
            member,
            group.id,
            Some(group.name.clone()),
            &member,
        )?;

        Ok(group)
    }

    /// Balances, settlement plan, statistics and integrity issues
    pub fn summary(&self, group: &Group, settlement_marker: &str) -> GroupSummary {
        let balances = compute_balances(group);
        let settlements = compute_settlements(&balances);
        GroupSummary {
            settlements,
            stats: GroupStats::compute(group, settlement_marker),
            issues: validate_group(group),
            balances,
        }
    }

    fn load(&self, id: GroupId) -> SplitResult<Group> {
        self.get(id)?
            .ok_or_else(|| SplitError::group_not_found(id.to_string()))
    }
}
