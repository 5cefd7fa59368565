//! Open file handles
//!
//! A [`Handle`] is what `open` hands back: either a view over an embedded
//! node or a real file on disk. Each handle owns its own read position and
//! its own directory cursor, so two readers of the same directory page
//! through it independently.

use crate::error::ApiError;
use crate::fs::index::RuntimeNode;
use crate::tree::FileMode;
use chrono::{DateTime, Utc};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Metadata returned by `stat` and directory listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    name: String,
    size: u64,
    mode: FileMode,
    mod_time: i64,
    is_dir: bool,
}

impl FileInfo {
    pub fn new(name: String, size: u64, mode: FileMode, mod_time: i64, is_dir: bool) -> Self {
        Self {
            name,
            size,
            mode,
            mod_time,
            is_dir,
        }
    }

    /// Project OS metadata. Directories report a size of 0, like embedded ones.
    pub fn from_metadata(name: String, meta: &std::fs::Metadata) -> Self {
        let mod_time = meta
            .modified()
            .map(|t| DateTime::<Utc>::from(t).timestamp())
            .unwrap_or(0);
        let size = if meta.is_dir() { 0 } else { meta.len() };
        Self::new(name, size, FileMode::from_metadata(meta), mod_time, meta.is_dir())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Modification time in unix seconds.
    pub fn mod_time(&self) -> i64 {
        self.mod_time
    }

    pub fn modified(&self) -> SystemTime {
        if self.mod_time >= 0 {
            UNIX_EPOCH + Duration::from_secs(self.mod_time as u64)
        } else {
            UNIX_EPOCH - Duration::from_secs(self.mod_time.unsigned_abs())
        }
    }

    pub fn modified_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.mod_time, 0)
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// Advance a directory cursor over `total` entries.
///
/// Returns the slice of entries to hand out, or `None` once the cursor has
/// run off the end. Reaching the end and asking for everything (`count <= 0`)
/// both rewind the cursor to 0.
pub(crate) fn paginate(cursor: &mut usize, total: usize, count: isize) -> Option<Range<usize>> {
    if *cursor >= total {
        *cursor = 0;
        return None;
    }

    let start = *cursor;
    if count <= 0 {
        *cursor = 0;
        return Some(start..total);
    }

    let end = total.min(start.saturating_add(count as usize));
    *cursor = end;
    Some(start..end)
}

/// Handle over an embedded node.
#[derive(Debug)]
pub struct EmbeddedFile {
    node: Arc<RuntimeNode>,
    reader: Cursor<Arc<[u8]>>,
    cursor: usize,
}

impl EmbeddedFile {
    pub(crate) fn new(node: Arc<RuntimeNode>) -> Self {
        let reader = Cursor::new(Arc::clone(&node.data));
        Self {
            node,
            reader,
            cursor: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.node.path
    }

    pub fn stat(&self) -> FileInfo {
        self.node.info.clone()
    }

    pub fn readdir(&mut self, count: isize) -> Result<Option<Vec<FileInfo>>, ApiError> {
        if !self.node.info.is_dir() {
            return Err(ApiError::NotADirectory(self.node.path.clone()));
        }
        let children = &self.node.children;
        Ok(paginate(&mut self.cursor, children.len(), count)
            .map(|range| children[range].iter().map(|c| c.info.clone()).collect()))
    }
}

/// Handle over a real file or directory.
#[derive(Debug)]
pub struct DiskFile {
    path: PathBuf,
    file: std::fs::File,
    listing: Option<Vec<FileInfo>>,
    cursor: usize,
}

impl DiskFile {
    pub(crate) fn open(path: PathBuf) -> std::io::Result<Self> {
        let file = std::fs::File::open(&path)?;
        Ok(Self {
            path,
            file,
            listing: None,
            cursor: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stat(&self) -> Result<FileInfo, ApiError> {
        let meta = self.file.metadata()?;
        Ok(FileInfo::from_metadata(file_name(&self.path), &meta))
    }

    pub fn readdir(&mut self, count: isize) -> Result<Option<Vec<FileInfo>>, ApiError> {
        if !self.file.metadata()?.is_dir() {
            return Err(ApiError::NotADirectory(self.path.display().to_string()));
        }
        if self.listing.is_none() {
            self.listing = Some(list_dir(&self.path)?);
        }
        let listing = self.listing.as_deref().unwrap_or_default();
        let page = paginate(&mut self.cursor, listing.len(), count).map(|r| listing[r].to_vec());
        if self.cursor == 0 {
            // next pass starts over, so pick up changes made since this one
            self.listing = None;
        }
        Ok(page)
    }
}

/// List a directory in OS order, stat'ing through symlinks so linked
/// directories report as directories. Dangling links fall back to the
/// link's own metadata.
fn list_dir(path: &Path) -> std::io::Result<Vec<FileInfo>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let meta = match std::fs::metadata(entry.path()) {
            Ok(meta) => meta,
            Err(_) => entry.metadata()?,
        };
        out.push(FileInfo::from_metadata(
            entry.file_name().to_string_lossy().into_owned(),
            &meta,
        ));
    }
    Ok(out)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// An open file, embedded or on disk.
#[derive(Debug)]
pub enum Handle {
    Embedded(EmbeddedFile),
    Disk(DiskFile),
}

impl Handle {
    pub fn stat(&self) -> Result<FileInfo, ApiError> {
        match self {
            Handle::Embedded(f) => Ok(f.stat()),
            Handle::Disk(f) => f.stat(),
        }
    }

    /// Read the next page of directory entries.
    ///
    /// `count <= 0` returns every remaining entry. `Ok(None)` marks the end
    /// of the listing; the following call starts again from the first entry.
    pub fn readdir(&mut self, count: isize) -> Result<Option<Vec<FileInfo>>, ApiError> {
        match self {
            Handle::Embedded(f) => f.readdir(count),
            Handle::Disk(f) => f.readdir(count),
        }
    }

    /// Release the handle. Embedded handles hold no OS resource.
    pub fn close(self) -> Result<(), ApiError> {
        drop(self);
        Ok(())
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Handle::Embedded(_))
    }
}

impl Read for Handle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Handle::Embedded(f) => f.reader.read(buf),
            Handle::Disk(f) => f.file.read(buf),
        }
    }
}

impl Seek for Handle {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        match self {
            Handle::Embedded(f) => f.reader.seek(pos),
            Handle::Disk(f) => f.file.seek(pos),
        }
    }
}
