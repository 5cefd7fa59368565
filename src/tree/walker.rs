//! Filesystem walker
//!
//! Depth-first walk that turns a directory into a [`Node`] tree. Every
//! recursive call receives an explicit [`Location`]: the physical path used
//! for I/O and the logical path recorded in the snapshot. The two only
//! diverge below a symlinked directory, where I/O continues from the resolved
//! target while the logical path stays rooted at the link.

use crate::codec;
use crate::error::SnapshotError;
use crate::tree::node::{FileMode, Node};
use crate::tree::path;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Entries whose logical path matches are skipped along with their subtree.
    pub ignore: Option<Regex>,
    /// Stripped from every stored logical path once the walk completes.
    pub prefix: Option<String>,
}

impl WalkerConfig {
    /// Build a config from the raw pattern and prefix strings.
    ///
    /// Empty strings count as absent.
    pub fn from_patterns(ignore: Option<&str>, prefix: Option<&str>) -> Result<Self, SnapshotError> {
        let ignore = match ignore {
            Some(p) if !p.is_empty() => Some(Regex::new(p)?),
            _ => None,
        };
        let prefix = prefix.filter(|p| !p.is_empty()).map(str::to_string);
        Ok(Self { ignore, prefix })
    }

    fn is_ignored(&self, logical: &str) -> bool {
        self.ignore
            .as_ref()
            .map(|re| re.is_match(logical))
            .unwrap_or(false)
    }
}

/// A directory being walked.
#[derive(Debug, Clone)]
struct Location {
    physical: PathBuf,
    logical: String,
}

/// Walker over one snapshot root.
pub struct Walker<'a> {
    config: &'a WalkerConfig,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk `root` into a tree whose paths are still un-prefixed logical paths.
    pub fn walk(&self, root: &Path) -> Result<Node, SnapshotError> {
        self.walk_from(Path::new("."), root)
    }

    /// Like [`walk`](Self::walk), but reads `root` from under `base`. Logical
    /// paths come from `root` alone.
    pub fn walk_from(&self, base: &Path, root: &Path) -> Result<Node, SnapshotError> {
        let logical = path::logical_root(root);
        if logical.is_empty() {
            return Err(SnapshotError::InvalidRoot(format!(
                "'{}' does not name a directory",
                root.display()
            )));
        }

        let on_disk = base.join(root);
        let meta = std::fs::metadata(&on_disk).map_err(|e| SnapshotError::io(&on_disk, e))?;
        if !meta.is_dir() {
            return Err(SnapshotError::InvalidRoot(format!(
                "{} is not a directory",
                on_disk.display()
            )));
        }
        let physical =
            dunce::canonicalize(&on_disk).map_err(|e| SnapshotError::io(&on_disk, e))?;

        let name = logical.rsplit('/').next().unwrap_or_default().to_string();
        let mut node = Node::directory(
            logical.clone(),
            name,
            FileMode::from_metadata(&meta),
            mod_time(&meta),
        );

        let location = Location {
            physical: physical.clone(),
            logical,
        };
        let mut ancestors = vec![physical];
        node.files = self.walk_dir(&location, &mut ancestors)?;
        Ok(node)
    }

    fn walk_dir(
        &self,
        dir: &Location,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<Vec<Node>, SnapshotError> {
        let mut children = Vec::new();

        let entries = WalkDir::new(&dir.physical)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let here = Location {
                physical: entry.path().to_path_buf(),
                logical: path::join(&dir.logical, &name),
            };

            if self.config.is_ignored(&here.logical) {
                debug!(path = %here.logical, "Ignoring entry");
                continue;
            }

            let file_type = entry.file_type();

            if file_type.is_dir() {
                let meta = entry.metadata()?;
                children.push(self.descend(here.clone(), here, name, &meta, ancestors)?);
                continue;
            }

            if file_type.is_symlink() {
                let target = dunce::canonicalize(&here.physical).map_err(|source| {
                    SnapshotError::Symlink {
                        path: here.physical.clone(),
                        source,
                    }
                })?;
                let meta = std::fs::metadata(&target).map_err(|source| SnapshotError::Symlink {
                    path: here.physical.clone(),
                    source,
                })?;

                if meta.is_dir() {
                    if ancestors.contains(&target) {
                        return Err(SnapshotError::SymlinkLoop {
                            link: here.physical,
                            target,
                        });
                    }
                    debug!(
                        link = %here.logical,
                        target = %target.display(),
                        "Following symlinked directory"
                    );
                    let linked = Location {
                        physical: target,
                        logical: here.logical.clone(),
                    };
                    children.push(self.descend(linked, here, name, &meta, ancestors)?);
                    continue;
                }

                if meta.is_file() {
                    children.push(self.snapshot_file(&here, name, &target, &meta)?);
                } else {
                    warn!(path = %here.logical, "Skipping symlink to special file");
                }
                continue;
            }

            if file_type.is_file() {
                let meta = entry.metadata()?;
                children.push(self.snapshot_file(&here, name, &here.physical, &meta)?);
            } else {
                warn!(path = %here.logical, "Skipping special file");
            }
        }

        Ok(children)
    }

    /// Record a directory at `at` and walk its contents from `read_from`.
    fn descend(
        &self,
        read_from: Location,
        at: Location,
        name: String,
        meta: &Metadata,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<Node, SnapshotError> {
        let mut node = Node::directory(at.logical, name, FileMode::from_metadata(meta), mod_time(meta));
        ancestors.push(read_from.physical.clone());
        let files = self.walk_dir(&read_from, ancestors);
        ancestors.pop();
        node.files = files?;
        Ok(node)
    }

    fn snapshot_file(
        &self,
        at: &Location,
        name: String,
        read_from: &Path,
        meta: &Metadata,
    ) -> Result<Node, SnapshotError> {
        let bytes = std::fs::read(read_from).map_err(|e| SnapshotError::io(read_from, e))?;
        let compressed = codec::encode(&bytes).map_err(|source| SnapshotError::Encode {
            path: read_from.to_path_buf(),
            source,
        })?;
        info!(path = %at.logical, size = bytes.len(), "Processing");
        Ok(Node::file(
            at.logical.clone(),
            name,
            bytes.len() as u64,
            FileMode::from_metadata(meta),
            mod_time(meta),
            compressed,
        ))
    }
}

/// Modification time truncated to whole seconds; 0 when the platform has none.
fn mod_time(meta: &Metadata) -> i64 {
    meta.modified()
        .map(|t| DateTime::<Utc>::from(t).timestamp())
        .unwrap_or(0)
}
