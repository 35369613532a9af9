//! Path management for SplitLedger
//!
//! ## Path Resolution Order
//!
//! 1. `SPLITLEDGER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/splitledger` or `~/.config/splitledger`
//! 3. Windows: `%APPDATA%\splitledger`

use std::path::PathBuf;

use crate::error::SplitError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SPLITLEDGER_DATA_DIR";

/// Manages all paths used by SplitLedger
#[derive(Debug, Clone)]
pub struct SplitPaths {
    base_dir: PathBuf,
}

impl SplitPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SplitError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SplitPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/splitledger/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to groups.json
    pub fn groups_file(&self) -> PathBuf {
        self.data_dir().join("groups.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SplitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SplitError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SplitError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if SplitLedger has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SplitError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                SplitError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("splitledger"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SplitError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SplitError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("splitledger"))
}
