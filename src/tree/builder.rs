//! Tree builder
//!
//! Runs the walker over a root directory and applies prefix normalization to
//! the finished tree.

use crate::error::SnapshotError;
use crate::tree::node::{FileMode, Node};
use crate::tree::path;
use crate::tree::walker::{Walker, WalkerConfig};
use std::path::PathBuf;
use tracing::info;

/// Builds snapshot trees from a directory on disk.
pub struct TreeBuilder {
    root: PathBuf,
    base: PathBuf,
    walker_config: WalkerConfig,
}

impl TreeBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            base: PathBuf::from("."),
            walker_config: WalkerConfig::default(),
        }
    }

    /// Resolve a relative root against `base` instead of the current
    /// directory. Stored paths still start from the root as given.
    pub fn with_base(mut self, base: PathBuf) -> Self {
        self.base = base;
        self
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Walk the root and return the finished tree.
    ///
    /// Every path in the result has the configured prefix removed and a
    /// leading `/`.
    pub fn build(&self) -> Result<Node, SnapshotError> {
        info!(root = %self.root.display(), "Building snapshot");
        let mut tree = Walker::new(&self.walker_config).walk_from(&self.base, &self.root)?;
        apply_prefix(&mut tree, self.walker_config.prefix.as_deref());
        info!(nodes = tree.count(), root = %tree.path, "Snapshot complete");
        Ok(tree)
    }

    /// An empty root directory record, for committing an artifact before the
    /// first real snapshot. The root does not need to exist.
    pub fn placeholder(&self) -> Result<Node, SnapshotError> {
        let logical = path::logical_root(&self.root);
        if logical.is_empty() {
            return Err(SnapshotError::InvalidRoot(format!(
                "'{}' does not name a directory",
                self.root.display()
            )));
        }
        let name = logical.rsplit('/').next().unwrap_or_default().to_string();
        let stored = path::normalize(&logical, self.walker_config.prefix.as_deref());
        Ok(Node::directory(stored, name, FileMode(0o755), 0))
    }
}

fn apply_prefix(node: &mut Node, prefix: Option<&str>) {
    node.path = path::normalize(&node.path, prefix);
    for child in &mut node.files {
        apply_prefix(child, prefix);
    }
}
