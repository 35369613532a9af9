//! Group repository for JSON storage
//!
//! Manages loading and saving groups to groups.json. The file is migrated
//! to the current schema on load and always written back in it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{SplitError, SplitResult};
use crate::models::{Group, GroupId};

use super::file_io::{read_json_value, write_json_atomic};
use super::migration::{migrate, GroupsDocument};

/// Repository for group persistence
pub struct GroupRepository {
    path: PathBuf,
    data: RwLock<HashMap<GroupId, Group>>,
}

impl GroupRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load groups from disk, migrating older documents
    pub fn load(&self) -> SplitResult<()> {
        let document = match read_json_value(&self.path)? {
            Some(raw) => migrate(raw)?,
            None => GroupsDocument::default(),
        };

        let mut data = self
            .data
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for group in document.groups {
            data.insert(group.id, group);
        }

        Ok(())
    }

    /// Save groups to disk in the current schema
    pub fn save(&self) -> SplitResult<()> {
        let document = GroupsDocument {
            groups: self.get_all()?,
            ..GroupsDocument::default()
        };

        write_json_atomic(&self.path, &document)
    }

    pub fn get(&self, id: GroupId) -> SplitResult<Option<Group>> {
        let data = self
            .data
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all groups, newest first
    pub fn get_all(&self) -> SplitResult<Vec<Group>> {
        let data = self
            .data
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut groups: Vec<_> = data.values().cloned().collect();
        groups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(groups)
    }

    /// Get a group by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> SplitResult<Option<Group>> {
        let data = self
            .data
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|g| g.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Find a group by ID reference or name
    pub fn find(&self, reference: &str) -> SplitResult<Option<Group>> {
        {
            let data = self
                .data
                .read()
                .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

            if let Some(group) = data.values().find(|g| g.id.matches(reference)) {
                return Ok(Some(group.clone()));
            }
        }

        self.find_by_name(reference)
    }

    /// Insert or update a group
    pub fn upsert(&self, group: Group) -> SplitResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(group.id, group);
        Ok(())
    }

    /// Delete a group, returning whether it existed
    pub fn delete(&self, id: GroupId) -> SplitResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if a group name is already taken
    pub fn name_exists(&self, name: &str, exclude_id: Option<GroupId>) -> SplitResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .any(|g| g.name.to_lowercase() == name_lower && Some(g.id) != exclude_id))
    }

    pub fn count(&self) -> SplitResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| SplitError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
