//! Storage layer for SplitLedger
//!
//! Groups live in a single JSON document written atomically; every change
//! is also recorded in the audit log.

pub mod file_io;
pub mod groups;
pub mod migration;

pub use file_io::{read_json, write_json_atomic};
pub use groups::GroupRepository;
pub use migration::{migrate, GroupsDocument, CURRENT_SCHEMA_VERSION};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SplitPaths;
use crate::error::SplitResult;
use crate::models::GroupId;

/// Main storage coordinator
pub struct Storage {
    paths: SplitPaths,
    pub groups: GroupRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create storage rooted at `paths`, creating directories as needed
    pub fn new(paths: SplitPaths) -> SplitResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            groups: GroupRepository::new(paths.groups_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &SplitPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> SplitResult<()> {
        self.groups.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> SplitResult<()> {
        self.groups.save()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        group_id: GroupId,
        entity_name: Option<String>,
        entity: &T,
    ) -> SplitResult<()> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id,
            group_id,
            entity_name,
            entity,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        group_id: GroupId,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> SplitResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            group_id,
            entity_name,
            before,
            after,
            summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        group_id: GroupId,
        entity_name: Option<String>,
        entity: &T,
    ) -> SplitResult<()> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            group_id,
            entity_name,
            entity,
        ))
    }

    /// Check if SplitLedger has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::Group;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_mutations_reach_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let group = Group::new("Flat", vec!["Anna".into()]);
        storage
            .log_create(
                EntityType::Group,
                group.id.to_string(),
                group.id,
                Some(group.name.clone()),
                &group,
            )
            .unwrap();
        storage
            .log_delete(EntityType::Group, group.id.to_string(), group.id, None, &group)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Delete);
    }
}
