use crate::error::{Result, SyncError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A filesystem entry as seen at the moment it was classified.
///
/// Entries are never cached: every decision re-reads the filesystem so that
/// changes made earlier in the run are visible.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Size in bytes (0 for directories)
    pub size: u64,
    pub modified: SystemTime,
}

/// Classify `path`, following symlinks.
///
/// Anything that is not a directory is treated as a file; a broken symlink
/// surfaces as `NotFound` from the underlying metadata call.
pub fn classify(path: &Path) -> Result<FileEntry> {
    let metadata =
        fs::metadata(path).map_err(|e| SyncError::from_io(path, e, SyncError::metadata))?;

    let modified = metadata
        .modified()
        .map_err(|e| SyncError::from_io(path, e, SyncError::metadata))?;

    let kind = if metadata.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    };

    Ok(FileEntry {
        path: path.to_path_buf(),
        kind,
        size: if kind == EntryKind::File { metadata.len() } else { 0 },
        modified,
    })
}

/// Like [`classify`], but a missing path is `Ok(None)` instead of an error.
pub fn probe(path: &Path) -> Result<Option<FileEntry>> {
    match classify(path) {
        Ok(entry) => Ok(Some(entry)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
