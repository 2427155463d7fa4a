use super::strategy::Direction;
use serde::Serialize;
use std::path::PathBuf;

/// How actions are reported on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One line per action
    Human,
    /// Nothing on stdout
    Quiet,
    /// NDJSON events
    Json,
}

/// Machine-readable sync events, one JSON object per line
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    Start {
        folder_a: PathBuf,
        folder_b: PathBuf,
        dry_run: bool,
    },
    Pass {
        source: PathBuf,
        destination: PathBuf,
    },
    CreateDir {
        path: PathBuf,
    },
    Create {
        path: PathBuf,
        size: u64,
    },
    Update {
        path: PathBuf,
        size: u64,
        direction: Direction,
    },
    Summary {
        dirs_created: usize,
        files_created: usize,
        files_updated: usize,
        files_skipped: usize,
        bytes_transferred: u64,
        duration_secs: f64,
    },
    Error {
        message: String,
    },
}

impl SyncEvent {
    /// Emit this event as JSON to stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Console line for an action event, `None` for bookkeeping events
    pub fn human_line(&self, dry_run: bool) -> Option<String> {
        let line = match (self, dry_run) {
            (SyncEvent::CreateDir { path }, false) => format!("Directory created: {}", path.display()),
            (SyncEvent::CreateDir { path }, true) => {
                format!("Would create directory: {}", path.display())
            }
            (SyncEvent::Create { path, .. }, false) => format!("File created: {}", path.display()),
            (SyncEvent::Create { path, .. }, true) => format!("Would create file: {}", path.display()),
            (SyncEvent::Update { path, .. }, false) => format!("File updated: {}", path.display()),
            (SyncEvent::Update { path, .. }, true) => format!("Would update file: {}", path.display()),
            _ => return None,
        };
        Some(line)
    }
}

pub struct Reporter {
    mode: OutputMode,
    dry_run: bool,
}

impl Reporter {
    pub fn new(mode: OutputMode, dry_run: bool) -> Self {
        Self { mode, dry_run }
    }

    pub fn report(&self, event: &SyncEvent) {
        match self.mode {
            OutputMode::Quiet => {}
            OutputMode::Json => event.emit(),
            OutputMode::Human => {
                if let Some(line) = event.human_line(self.dry_run) {
                    println!("{}", line);
                }
            }
        }
    }
}
