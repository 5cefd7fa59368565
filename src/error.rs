//! Error types for snapshot generation and the virtual filesystem.

use std::path::PathBuf;
use thiserror::Error;

/// Failure decoding an embedded payload back into raw bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid gzip stream: {0}")]
    Gzip(#[source] std::io::Error),
}

/// Errors raised while walking a directory tree into a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid snapshot root: {0}")]
    InvalidRoot(String),

    #[error("Invalid ignore pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to resolve symlink {path}: {source}")]
    Symlink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Symlink {link} points back into its own ancestor {target}")]
    SymlinkLoop { link: PathBuf, target: PathBuf },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by the runtime filesystem and the tooling built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Corrupt payload for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },

    #[error("Duplicate path in tree: {0}")]
    DuplicatePath(String),

    #[error("{0} is not UTF-8 text")]
    NotText(String),

    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Invalid snapshot document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// True for the plain "no such file" outcome, whether it came from the
    /// embedded index or from a disk lookup.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound(_) => true,
            ApiError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
