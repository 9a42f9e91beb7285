// Re-exports from edit-history-engine and conversion traits.
// Bridges the engine's selection snapshots with the session's Caret type.
pub use edit_history_engine::{
    ChangeKind, Clock, HistoryConfig, HistoryEngine, Level, ManualClock, RecordOptions,
    RecordOutcome, SelectionSnapshot, SystemClock,
};

use crate::caret::Caret;

impl From<SelectionSnapshot> for Caret {
    fn from(s: SelectionSnapshot) -> Self {
        Caret {
            block: s.block,
            offset: s.offset,
        }
    }
}

impl From<Caret> for SelectionSnapshot {
    fn from(c: Caret) -> Self {
        SelectionSnapshot {
            block: c.block,
            offset: c.offset,
        }
    }
}
