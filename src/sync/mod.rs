pub mod entry;
pub mod output;
pub mod reconcile;
pub mod strategy;
pub mod transfer;

use crate::error::Result;
use output::{OutputMode, Reporter, SyncEvent};
use reconcile::Reconciler;
use std::path::Path;
use std::time::{Duration, Instant};
use transfer::Transferrer;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    pub dirs_created: usize,
    pub files_created: usize,
    pub files_updated: usize,
    pub files_skipped: usize,
    pub bytes_transferred: u64,
    pub duration: Duration,
}

impl SyncStats {
    /// Number of filesystem changes made (or planned, in dry-run)
    pub fn changes(&self) -> usize {
        self.dirs_created + self.files_created + self.files_updated
    }

    fn summary_event(&self) -> SyncEvent {
        SyncEvent::Summary {
            dirs_created: self.dirs_created,
            files_created: self.files_created,
            files_updated: self.files_updated,
            files_skipped: self.files_skipped,
            bytes_transferred: self.bytes_transferred,
            duration_secs: self.duration.as_secs_f64(),
        }
    }
}

/// Bidirectional sync between two folders: one pass A → B, then B → A.
pub struct SyncEngine {
    dry_run: bool,
    output: OutputMode,
}

impl SyncEngine {
    pub fn new(dry_run: bool, output: OutputMode) -> Self {
        Self { dry_run, output }
    }

    pub fn sync(&self, folder_a: &Path, folder_b: &Path) -> Result<SyncStats> {
        tracing::info!(
            "Starting sync: {} ↔ {}",
            folder_a.display(),
            folder_b.display()
        );
        let start = Instant::now();

        let reporter = Reporter::new(self.output, self.dry_run);
        let transferrer = Transferrer::new(self.dry_run);
        let reconciler = Reconciler::new(&transferrer, &reporter);
        let mut stats = SyncStats::default();

        reporter.report(&SyncEvent::Start {
            folder_a: folder_a.to_path_buf(),
            folder_b: folder_b.to_path_buf(),
            dry_run: self.dry_run,
        });

        // The second pass re-reads both trees, so it sees everything the first one wrote
        for (source, destination) in [(folder_a, folder_b), (folder_b, folder_a)] {
            tracing::info!("Pass: {} → {}", source.display(), destination.display());
            reporter.report(&SyncEvent::Pass {
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
            });

            // A dry-run first pass creates nothing, so a second folder it would
            // have created is still missing here. Walk it as an empty tree.
            if self.dry_run && stats.changes() > 0 && entry::probe(source)?.is_none() {
                tracing::debug!("Would walk {}: not created yet", source.display());
                continue;
            }

            reconciler.reconcile(source, destination, &mut stats)?;
        }

        stats.duration = start.elapsed();
        reporter.report(&stats.summary_event());

        tracing::info!(
            "Sync complete: {} directories created, {} files created, {} updated, {} skipped",
            stats.dirs_created,
            stats.files_created,
            stats.files_updated,
            stats.files_skipped
        );

        Ok(stats)
    }
}
