use super::entry::{self, EntryKind, FileEntry};
use super::output::{Reporter, SyncEvent};
use super::strategy::{self, Direction, SyncAction};
use super::transfer::Transferrer;
use super::SyncStats;
use crate::error::{Result, SyncError};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Walks one tree and reconciles every entry against the other tree.
pub struct Reconciler<'a> {
    transferrer: &'a Transferrer,
    reporter: &'a Reporter,
}

impl<'a> Reconciler<'a> {
    pub fn new(transferrer: &'a Transferrer, reporter: &'a Reporter) -> Self {
        Self {
            transferrer,
            reporter,
        }
    }

    /// Reconcile everything under `src` against `dst`, depth first.
    ///
    /// Children are listed in file-name order. A directory missing from `dst`
    /// is created before its contents are visited. Any error stops the walk.
    pub fn reconcile(&self, src: &Path, dst: &Path, stats: &mut SyncStats) -> Result<()> {
        let walker = WalkDir::new(src)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for result in walker {
            let entry = result.map_err(|e| walk_error(src, e))?;
            let src_path = entry.path();
            let relative = src_path
                .strip_prefix(src)
                .map_err(|_| SyncError::InvalidPath {
                    path: src_path.to_path_buf(),
                })?;
            let dst_path = dst.join(relative);

            if entry.file_type().is_dir() {
                self.reconcile_dir(&dst_path, stats)?;
            } else {
                self.reconcile_file(src_path, &dst_path, stats)?;
            }
        }

        Ok(())
    }

    /// Make sure a directory exists at `dst_path`. Whatever is already there is
    /// accepted as-is.
    fn reconcile_dir(&self, dst_path: &Path, stats: &mut SyncStats) -> Result<()> {
        if entry::probe(dst_path)?.is_some() {
            return Ok(());
        }

        self.transferrer.create_dir(dst_path)?;
        stats.dirs_created += 1;
        self.reporter.report(&SyncEvent::CreateDir {
            path: dst_path.to_path_buf(),
        });
        Ok(())
    }

    fn reconcile_file(
        &self,
        src_path: &Path,
        dst_path: &Path,
        stats: &mut SyncStats,
    ) -> Result<()> {
        let source = entry::classify(src_path)?;
        if source.kind == EntryKind::Directory {
            // The walk does not follow links, so this is a symlink to a directory
            return Err(SyncError::NotAFile {
                path: src_path.to_path_buf(),
            });
        }

        let Some(dest) = entry::probe(dst_path)? else {
            return self.create(&source, dst_path, stats);
        };

        match strategy::plan_file(&source, Some(&dest)) {
            SyncAction::Skip => {
                tracing::trace!("Unchanged: {}", src_path.display());
                stats.files_skipped += 1;
                Ok(())
            }
            SyncAction::Create => self.create(&source, dst_path, stats),
            SyncAction::Update(Direction::Forward) => {
                self.update(&source, dst_path, Direction::Forward, stats)
            }
            SyncAction::Update(Direction::Reverse) => {
                self.update(&dest, src_path, Direction::Reverse, stats)
            }
        }
    }

    fn create(&self, source: &FileEntry, dst_path: &Path, stats: &mut SyncStats) -> Result<()> {
        let bytes = self.transferrer.copy_file(source, dst_path)?;
        stats.files_created += 1;
        stats.bytes_transferred += bytes;
        self.reporter.report(&SyncEvent::Create {
            path: dst_path.to_path_buf(),
            size: bytes,
        });
        Ok(())
    }

    fn update(
        &self,
        winner: &FileEntry,
        target: &Path,
        direction: Direction,
        stats: &mut SyncStats,
    ) -> Result<()> {
        tracing::debug!(
            "Newer side wins ({}): {} -> {}",
            direction,
            winner.path.display(),
            target.display()
        );

        let bytes = self.transferrer.copy_file(winner, target)?;
        stats.files_updated += 1;
        stats.bytes_transferred += bytes;
        self.reporter.report(&SyncEvent::Update {
            path: target.to_path_buf(),
            size: bytes,
            direction,
        });
        Ok(())
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> SyncError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());

    match err.into_io_error() {
        Some(io_err) => SyncError::from_io(&path, io_err, SyncError::read_dir),
        None => SyncError::read_dir(path, io::Error::other("filesystem loop detected")),
    }
}

/// Relative paths of everything under `root`, for comparing trees in tests.
#[cfg(test)]
pub(crate) fn list_tree(root: &Path) -> Vec<std::path::PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}
