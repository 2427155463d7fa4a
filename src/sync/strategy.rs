use super::entry::FileEntry;
use serde::Serialize;
use std::fmt;

/// Which way a copy runs relative to the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Pass source overwrites pass destination
    Forward,
    /// Pass destination overwrites pass source
    Reverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Skip - both sides equivalent
    Skip,
    /// Create - destination missing
    Create,
    /// Update - both sides exist but differ; copy in the given direction
    Update(Direction),
}

/// Two files are equivalent when size and mtime match exactly.
///
/// No tolerance window: the copy engine stamps the destination with the
/// source's full-resolution mtime, so a synchronized pair always compares equal.
pub fn equivalent(a: &FileEntry, b: &FileEntry) -> bool {
    a.size == b.size && a.modified == b.modified
}

/// Decide what to do with a source file given the destination's current state.
///
/// Only a strictly newer source copies forward. Equal mtimes with different
/// sizes copy in reverse, so the destination wins a tie.
pub fn plan_file(source: &FileEntry, dest: Option<&FileEntry>) -> SyncAction {
    let Some(dest) = dest else {
        return SyncAction::Create;
    };

    if equivalent(source, dest) {
        return SyncAction::Skip;
    }

    if source.modified > dest.modified {
        SyncAction::Update(Direction::Forward)
    } else {
        SyncAction::Update(Direction::Reverse)
    }
}
