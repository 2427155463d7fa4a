use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Path not found: {path}\nIt may have been removed while the sync was running.")]
    NotFound { path: PathBuf },

    #[error("Permission denied: {path}\nTry checking file ownership or running with appropriate permissions.")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory: {path}\nCause: {source}\nCheck that the directory exists and you have read permissions.")]
    ReadDirError { path: PathBuf, source: io::Error },

    #[error("Failed to read metadata: {path}\nCause: {source}")]
    MetadataError { path: PathBuf, source: io::Error },

    #[error("Failed to create directory: {path}\nCause: {source}\nCheck write permissions on the parent directory.")]
    CreateDirError { path: PathBuf, source: io::Error },

    #[error("Failed to copy file: {path}\nCause: {source}\nCheck disk space and write permissions on the destination.")]
    CopyError { path: PathBuf, source: io::Error },

    #[error("Failed to set modification time: {path}\nCause: {source}")]
    SetTimesError { path: PathBuf, source: io::Error },

    #[error("Not a regular file: {path}\nSymbolic links to directories are not followed.")]
    NotAFile { path: PathBuf },

    #[error("Invalid path: {path}\nThe entry does not lie under the folder being walked.")]
    InvalidPath { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Map an I/O failure on `path` to an error variant.
    ///
    /// Missing paths and permission failures get their own variants regardless
    /// of the operation; everything else is wrapped by `otherwise`.
    pub fn from_io(
        path: &Path,
        err: io::Error,
        otherwise: fn(PathBuf, io::Error) -> SyncError,
    ) -> SyncError {
        match err.kind() {
            io::ErrorKind::NotFound => SyncError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => SyncError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => otherwise(path.to_path_buf(), err),
        }
    }

    pub fn read_dir(path: PathBuf, source: io::Error) -> SyncError {
        SyncError::ReadDirError { path, source }
    }

    pub fn metadata(path: PathBuf, source: io::Error) -> SyncError {
        SyncError::MetadataError { path, source }
    }

    pub fn create_dir(path: PathBuf, source: io::Error) -> SyncError {
        SyncError::CreateDirError { path, source }
    }

    pub fn copy(path: PathBuf, source: io::Error) -> SyncError {
        SyncError::CopyError { path, source }
    }

    pub fn set_times(path: PathBuf, source: io::Error) -> SyncError {
        SyncError::SetTimesError { path, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Format bytes for human-readable display
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let mapped = SyncError::from_io(Path::new("/a/b"), err, SyncError::copy);
        assert!(mapped.is_not_found());
        assert!(mapped.to_string().contains("/a/b"));
    }

    #[test]
    fn test_from_io_permission_denied() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let mapped = SyncError::from_io(Path::new("/locked"), err, SyncError::copy);
        assert!(matches!(mapped, SyncError::PermissionDenied { .. }));
    }

    #[test]
    fn test_from_io_falls_back_to_context_variant() {
        let err = io::Error::other("disk on fire");
        let mapped = SyncError::from_io(Path::new("/x"), err, SyncError::set_times);
        assert!(matches!(mapped, SyncError::SetTimesError { .. }));
        assert!(mapped.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
