//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::StaticsConfig;
use config::ConfigError;
use std::path::Path;

/// Name of the per-workspace configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = "statics.toml";

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<StaticsConfig, ConfigError> {
        MergeService::load(workspace_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<StaticsConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> StaticsConfig {
        StaticsConfig::default()
    }
}
