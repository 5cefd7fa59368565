//! Virtual filesystem
//!
//! [`Files`] rehydrates a snapshot and answers open/stat/readdir/read
//! against it, optionally falling back to the real filesystem:
//!
//! ```text
//! name ──► Dir::open
//!            ├─► embedded index hit ──► Handle::Embedded
//!            ├─► miss, fallback off ──► ApiError::NotFound
//!            └─► miss, fallback on  ──► base_path + name ──► Handle::Disk
//! ```
//!
//! With `use_embedded = false` every name goes straight to disk, which keeps
//! local development working without regenerating the snapshot.

pub mod dir;
pub mod file;
pub mod index;

pub use dir::{resolve_disk_path, Dir, FileSystem};
pub use file::{DiskFile, EmbeddedFile, FileInfo, Handle};
pub use index::{PathIndex, RuntimeNode};

use crate::config::FsConfig;
use crate::error::ApiError;
use crate::tree::{path, Node};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::info;

/// A rehydrated snapshot plus the rules for reaching disk.
#[derive(Debug, Clone)]
pub struct Files {
    base_path: String,
    dir: Dir,
}

impl Files {
    /// Validate `config` and rehydrate `tree`.
    ///
    /// In pure disk mode the tree is not decoded at all. Corrupt payloads
    /// and bad configuration are reported here, before any file is served.
    pub fn new(config: &FsConfig, tree: &Node) -> Result<Self, ApiError> {
        config.validate()?;

        let index = if config.use_embedded {
            PathIndex::build(tree)?
        } else {
            PathIndex::default()
        };
        info!(
            embedded = config.use_embedded,
            fallback = config.fallback_to_disk,
            nodes = index.len(),
            "Static files ready"
        );

        Ok(Self {
            base_path: config.base_path.clone(),
            dir: Dir::new(
                config.use_embedded,
                config.fallback_to_disk,
                config.base_path.clone(),
                index,
            ),
        })
    }

    /// Parse a snapshot document and rehydrate it.
    pub fn from_json(config: &FsConfig, json: &str) -> Result<Self, ApiError> {
        let tree = Node::from_json(json)?;
        Self::new(config, &tree)
    }

    /// The filesystem view, for plugging into a file server.
    pub fn fs(&self) -> &Dir {
        &self.dir
    }

    /// Name used to open `name`: verbatim for the embedded index, base path
    /// concatenated with `name` (no separator inserted) for disk mode.
    pub fn determine_path(&self, name: &str) -> String {
        if self.dir.use_embedded() {
            return name.to_string();
        }
        format!("{}{}", self.base_path, name)
    }

    /// Open a file or directory.
    pub fn open(&self, name: &str) -> Result<Handle, ApiError> {
        self.dir.open(&self.determine_path(name))
    }

    /// Read a whole file.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        let mut handle = self.open(name)?;
        let mut buf = Vec::new();
        handle.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// List a directory sorted by name.
    pub fn read_dir(&self, name: &str) -> Result<Vec<FileInfo>, ApiError> {
        let mut handle = self.open(name)?;
        let mut entries = handle.readdir(-1)?.unwrap_or_default();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(entries)
    }

    /// Read every file in a directory, keyed by full logical path.
    ///
    /// Subdirectories are descended only when `recursive` is set and never
    /// appear as keys themselves.
    pub fn read_files(
        &self,
        name: &str,
        recursive: bool,
    ) -> Result<BTreeMap<String, Vec<u8>>, ApiError> {
        let mut results = BTreeMap::new();
        let handle = self.open(name)?;
        self.read_files_into(name, handle, &mut results, recursive)?;
        Ok(results)
    }

    fn read_files_into(
        &self,
        dirname: &str,
        mut handle: Handle,
        results: &mut BTreeMap<String, Vec<u8>>,
        recursive: bool,
    ) -> Result<(), ApiError> {
        let entries = handle.readdir(-1)?.unwrap_or_default();

        for entry in entries {
            let child = path::join(dirname, entry.name());
            if entry.is_dir() {
                if recursive {
                    let sub = self.open(&child)?;
                    self.read_files_into(&child, sub, results, recursive)?;
                }
                continue;
            }
            let bytes = self.read_file(&child)?;
            results.insert(child, bytes);
        }

        Ok(())
    }

    /// Number of embedded nodes.
    pub fn len(&self) -> usize {
        self.dir.index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.dir.index().is_empty()
    }

    /// Every embedded logical path, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.dir.index().paths()
    }
}
