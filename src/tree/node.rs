//! Snapshot node types
//!
//! [`Node`] is the record written into a generated artifact and read back at
//! process start. Field names serialize in PascalCase so the JSON document
//! matches the embedded tree schema exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission and type bits of a node.
///
/// Type flags occupy the high bits, permissions the low nine bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMode(pub u32);

impl FileMode {
    pub const DIR: u32 = 1 << 31;
    pub const SYMLINK: u32 = 1 << 27;
    pub const PERM: u32 = 0o777;

    /// Build a mode from permission bits and a directory flag.
    pub fn new(perm: u32, is_dir: bool) -> Self {
        let mut bits = perm & Self::PERM;
        if is_dir {
            bits |= Self::DIR;
        }
        FileMode(bits)
    }

    /// Derive a mode from OS metadata.
    pub fn from_metadata(meta: &std::fs::Metadata) -> Self {
        Self::new(permission_bits(meta), meta.is_dir())
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_dir(self) -> bool {
        self.0 & Self::DIR != 0
    }

    pub fn is_symlink(self) -> bool {
        self.0 & Self::SYMLINK != 0
    }

    pub fn perm(self) -> u32 {
        self.0 & Self::PERM
    }
}

#[cfg(unix)]
fn permission_bits(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn permission_bits(meta: &std::fs::Metadata) -> u32 {
    match (meta.is_dir(), meta.permissions().readonly()) {
        (true, _) => 0o755,
        (false, true) => 0o444,
        (false, false) => 0o644,
    }
}

impl fmt::Display for FileMode {
    /// Renders as `drwxr-xr-x` style text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_dir() {
            'd'
        } else if self.is_symlink() {
            'L'
        } else {
            '-'
        };
        let mut out = String::with_capacity(10);
        out.push(kind);
        for shift in [6u32, 3, 0] {
            let triple = (self.perm() >> shift) & 0o7;
            out.push(if triple & 0o4 != 0 { 'r' } else { '-' });
            out.push(if triple & 0o2 != 0 { 'w' } else { '-' });
            out.push(if triple & 0o1 != 0 { 'x' } else { '-' });
        }
        f.write_str(&out)
    }
}

/// A file or directory record in a snapshot tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Node {
    /// Logical, slash-separated path; unique within a tree.
    pub path: String,
    /// Final path segment.
    pub name: String,
    /// Uncompressed length in bytes, 0 for directories.
    pub size: u64,
    pub mode: FileMode,
    /// Modification time in whole unix seconds.
    pub mod_time: i64,
    pub is_dir: bool,
    /// Encoded payload (see [`crate::codec`]), empty for directories.
    #[serde(default)]
    pub compressed: String,
    /// Children in directory-read order.
    #[serde(default)]
    pub files: Vec<Node>,
}

impl Node {
    /// Directory record with no children yet.
    pub fn directory(path: String, name: String, mode: FileMode, mod_time: i64) -> Self {
        Node {
            path,
            name,
            size: 0,
            mode: FileMode(mode.bits() | FileMode::DIR),
            mod_time,
            is_dir: true,
            compressed: String::new(),
            files: Vec::new(),
        }
    }

    /// Leaf record carrying an encoded payload.
    pub fn file(
        path: String,
        name: String,
        size: u64,
        mode: FileMode,
        mod_time: i64,
        compressed: String,
    ) -> Self {
        Node {
            path,
            name,
            size,
            mode,
            mod_time,
            is_dir: false,
            compressed,
            files: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.files.iter().map(Node::count).sum::<usize>()
    }

    /// Depth-first, pre-order walk over the subtree.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Find a node by its logical path.
    pub fn find(&self, path: &str) -> Option<&Node> {
        self.iter().find(|n| n.path == path)
    }

    /// Parse a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render this tree as a pretty-printed snapshot document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Pre-order iterator returned by [`Node::iter`].
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.files.iter().rev());
        Some(node)
    }
}
