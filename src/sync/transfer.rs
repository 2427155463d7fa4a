use super::entry::FileEntry;
use crate::error::{Result, SyncError};
use filetime::FileTime;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

// 256KB chunks
const CHUNK_SIZE: usize = 256 * 1024;

/// Applies filesystem changes. In dry-run mode every operation is a no-op
/// that still reports what it would have transferred.
pub struct Transferrer {
    dry_run: bool,
}

impl Transferrer {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a directory and any missing ancestors
    pub fn create_dir(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            tracing::debug!("Would create directory: {}", path.display());
            return Ok(());
        }

        fs::create_dir_all(path).map_err(|e| SyncError::from_io(path, e, SyncError::create_dir))?;
        tracing::debug!("Created directory: {}", path.display());
        Ok(())
    }

    /// Copy `source` over `dest` and stamp `dest` with the source mtime.
    ///
    /// Existing content at `dest` is truncated. A failure part-way leaves
    /// whatever was written so far. Returns the number of bytes copied.
    pub fn copy_file(&self, source: &FileEntry, dest: &Path) -> Result<u64> {
        if self.dry_run {
            tracing::debug!("Would copy: {} -> {}", source.path.display(), dest.display());
            return Ok(source.size);
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SyncError::from_io(parent, e, SyncError::create_dir))?;
        }

        let (bytes_written, checksum) = stream_copy(&source.path, dest)?;

        tracing::debug!(
            "Copied {} -> {} ({} bytes, xxh3: {:x})",
            source.path.display(),
            dest.display(),
            bytes_written,
            checksum
        );

        let mtime = FileTime::from_system_time(source.modified);
        filetime::set_file_times(dest, mtime, mtime)
            .map_err(|e| SyncError::from_io(dest, e, SyncError::set_times))?;

        Ok(bytes_written)
    }
}

/// Stream `source` into `dest`. Both handles are closed before returning,
/// including on error.
fn stream_copy(source: &Path, dest: &Path) -> Result<(u64, u64)> {
    let mut source_file =
        File::open(source).map_err(|e| SyncError::from_io(source, e, SyncError::copy))?;
    let mut dest_file =
        File::create(dest).map_err(|e| SyncError::from_io(dest, e, SyncError::copy))?;

    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut hasher = xxhash_rust::xxh3::Xxh3::new();
    let mut bytes_written = 0u64;

    loop {
        let bytes_read = source_file
            .read(&mut buffer)
            .map_err(|e| SyncError::from_io(source, e, SyncError::copy))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
        dest_file
            .write_all(&buffer[..bytes_read])
            .map_err(|e| SyncError::from_io(dest, e, SyncError::copy))?;

        bytes_written += bytes_read as u64;
    }

    dest_file
        .flush()
        .map_err(|e| SyncError::from_io(dest, e, SyncError::copy))?;

    Ok((bytes_written, hasher.digest()))
}
