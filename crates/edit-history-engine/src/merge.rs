/// Coalescing policy: decides whether a record merges into the current level.
///
/// Kept as a pure function of its inputs so it can be tested without an
/// engine and without real time passing.
use std::time::{Duration, Instant};

use crate::level::{ChangeKind, Level, RecordOptions};

/// Outcome of the coalescing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Overwrite the current level in place.
    Coalesce,
    /// Append a fresh level.
    NewLevel,
}

/// Decides how a record at `now` relates to the `current` level.
///
/// `open` is false once coalescing has been broken (undo, redo, branch
/// discard, or an explicit break). A text edit coalesces only when both it
/// and the current level are non-persistent text edits and the gap since
/// the current level's last write is strictly below `window`.
pub fn coalesce_decision<S>(
    current: &Level<S>,
    open: bool,
    options: &RecordOptions,
    now: Instant,
    window: Duration,
) -> MergeDecision {
    if !open
        || options.persistent
        || options.kind != ChangeKind::Text
        || current.persistent
        || current.kind != ChangeKind::Text
    {
        return MergeDecision::NewLevel;
    }

    if now.saturating_duration_since(current.timestamp) < window {
        MergeDecision::Coalesce
    } else {
        MergeDecision::NewLevel
    }
}
