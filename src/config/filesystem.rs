//! FsConfig: how a `Files` instance resolves names.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

/// Runtime filesystem configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsConfig {
    /// Serve from the embedded snapshot (false: read everything from disk)
    #[serde(default = "default_true")]
    pub use_embedded: bool,

    /// On an embedded miss, retry against disk under `base_path`
    #[serde(default)]
    pub fallback_to_disk: bool,

    /// Absolute root for disk lookups. Names are appended to it verbatim.
    #[serde(default)]
    pub base_path: String,
}

impl FsConfig {
    /// Serve the embedded snapshot only.
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Serve everything from disk under `base_path`.
    pub fn disk(base_path: impl Into<String>) -> Self {
        Self {
            use_embedded: false,
            fallback_to_disk: false,
            base_path: base_path.into(),
        }
    }

    /// Serve the embedded snapshot, falling back to `base_path` on a miss.
    pub fn with_fallback(base_path: impl Into<String>) -> Self {
        Self {
            use_embedded: true,
            fallback_to_disk: true,
            base_path: base_path.into(),
        }
    }

    /// True when some lookups go to disk.
    pub fn touches_disk(&self) -> bool {
        !self.use_embedded || self.fallback_to_disk
    }

    /// A disk-touching configuration needs an absolute base path.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.touches_disk() {
            return Ok(());
        }
        if self.base_path.is_empty() {
            return Err(ApiError::ConfigError(
                "base_path is required when reading from disk; without it there is no root to resolve local files against"
                    .to_string(),
            ));
        }
        if !Path::new(&self.base_path).is_absolute() {
            return Err(ApiError::ConfigError(format!(
                "base_path must be absolute, got '{}'",
                self.base_path
            )));
        }
        Ok(())
    }
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            use_embedded: default_true(),
            fallback_to_disk: false,
            base_path: String::new(),
        }
    }
}
