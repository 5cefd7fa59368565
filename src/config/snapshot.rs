//! SnapshotConfig: defaults for the `snapshot` command.

use crate::error::SnapshotError;
use crate::tree::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_input() -> PathBuf {
    PathBuf::from("static")
}

/// Snapshot generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Directory to snapshot (relative to workspace root)
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Where to write the snapshot document; None writes to stdout
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Regex of logical paths to leave out, e.g. `\.gitignore$`
    #[serde(default)]
    pub ignore: Option<String>,

    /// Prefix stripped from every stored path
    #[serde(default)]
    pub prefix: Option<String>,
}

impl SnapshotConfig {
    pub fn walker_config(&self) -> Result<WalkerConfig, SnapshotError> {
        WalkerConfig::from_patterns(self.ignore.as_deref(), self.prefix.as_deref())
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: None,
            ignore: None,
            prefix: None,
        }
    }
}
