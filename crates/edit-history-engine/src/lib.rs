/// Undo/redo history with time-based coalescing of rapid edits.
///
/// Provides a `HistoryEngine` that keeps an ordered sequence of content
/// snapshots ("levels") and a cursor into it. Consecutive text edits inside
/// the merge window overwrite the current level; structural changes and
/// persistent checkpoints always start a new one. History is session-scoped
/// and never written to disk.
pub mod clock;
pub mod config;
pub mod engine;
pub mod level;
pub mod merge;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::HistoryConfig;
pub use engine::{HistoryEngine, RecordOutcome};
pub use level::{ChangeKind, Level, RecordOptions, SelectionSnapshot};
pub use merge::{coalesce_decision, MergeDecision};
