//! Statics: Embedded Static Files
//!
//! Snapshots a directory tree into a compressed, serializable [`tree::Node`]
//! record at build time, and serves it back at run time as a read-only
//! virtual filesystem with optional fallback to the real disk.

pub mod codec;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod tooling;
pub mod tree;

pub use config::FsConfig;
pub use error::{ApiError, DecodeError, SnapshotError};
pub use fs::{FileInfo, FileSystem, Files, Handle};
pub use tree::{FileMode, Node, TreeBuilder, WalkerConfig};
