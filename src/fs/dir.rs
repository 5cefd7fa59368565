//! Filesystem front: resolves a name to an embedded node or a disk file.

use crate::error::ApiError;
use crate::fs::file::{DiskFile, EmbeddedFile, Handle};
use crate::fs::index::PathIndex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Something that can open files by name, the way a file server expects.
pub trait FileSystem: Send + Sync {
    fn open(&self, name: &str) -> Result<Handle, ApiError>;
}

/// Embedded index with optional disk fallback.
#[derive(Debug, Clone)]
pub struct Dir {
    use_embedded: bool,
    fallback_to_disk: bool,
    base_path: String,
    index: Arc<PathIndex>,
}

impl Dir {
    pub(crate) fn new(
        use_embedded: bool,
        fallback_to_disk: bool,
        base_path: String,
        index: PathIndex,
    ) -> Self {
        Self {
            use_embedded,
            fallback_to_disk,
            base_path,
            index: Arc::new(index),
        }
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn use_embedded(&self) -> bool {
        self.use_embedded
    }

    /// Map a logical name onto disk under the base path.
    pub fn disk_path(&self, name: &str) -> PathBuf {
        resolve_disk_path(&self.base_path, name)
    }
}

impl FileSystem for Dir {
    fn open(&self, name: &str) -> Result<Handle, ApiError> {
        if self.use_embedded {
            if let Some(node) = self.index.get(name) {
                return Ok(Handle::Embedded(EmbeddedFile::new(Arc::clone(node))));
            }
            if !self.fallback_to_disk {
                return Err(ApiError::NotFound(name.to_string()));
            }
            debug!(path = name, "Not embedded, falling back to disk");
        }

        let path = self.disk_path(name);
        Ok(Handle::Disk(DiskFile::open(path)?))
    }
}

/// Concatenate `base` and `name` with no separator inserted, unless `name`
/// already carries the base. Slashes become the platform separator.
pub fn resolve_disk_path(base: &str, name: &str) -> PathBuf {
    let joined = if name.starts_with(base) {
        name.to_string()
    } else {
        format!("{base}{name}")
    };
    PathBuf::from(joined.replace('/', std::path::MAIN_SEPARATOR_STR))
}
