//! Configuration
//!
//! Layered configuration for the runtime filesystem, snapshot generation,
//! and logging. See [`ConfigLoader`] for source precedence.

pub mod facade;
pub mod filesystem;
pub mod merge;
pub mod paths;
pub mod snapshot;
pub mod sources;

pub use facade::ConfigLoader;
pub use filesystem::FsConfig;
pub use paths::xdg_root as xdg;
pub use snapshot::SnapshotConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration document (`statics.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticsConfig {
    #[serde(default)]
    pub fs: FsConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
