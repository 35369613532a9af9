//! Configuration module for SplitLedger
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SplitPaths;
pub use settings::Settings;
