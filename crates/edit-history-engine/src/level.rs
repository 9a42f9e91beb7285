/// Core types for recorded levels and record options.
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Caret position restored alongside a level's content.
///
/// Independent of any particular content model: `block` is the index of the
/// block holding the caret and `offset` a char offset inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    /// 0-indexed block.
    pub block: usize,
    /// 0-indexed char offset within the block.
    pub offset: usize,
}

/// Classifies a change for coalescing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Plain text typed or deleted inside a block. May coalesce.
    #[default]
    Text,
    /// Block insertion, split, merge, or format change. Never coalesces.
    Structural,
}

/// Options accompanying a `record` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOptions {
    pub kind: ChangeKind,
    /// Marks a durable checkpoint (save, publish) that must not be merged into.
    pub persistent: bool,
    pub selection: Option<SelectionSnapshot>,
}

impl RecordOptions {
    /// A coalescable text edit.
    pub fn text() -> Self {
        Self::default()
    }

    /// A structural edit that always starts a new level.
    pub fn structural() -> Self {
        Self {
            kind: ChangeKind::Structural,
            ..Self::default()
        }
    }

    /// A persistence checkpoint.
    pub fn checkpoint() -> Self {
        Self {
            kind: ChangeKind::Structural,
            persistent: true,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: SelectionSnapshot) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// One recorded, restorable snapshot of editable content.
///
/// Levels are only written by the engine; callers get shared references.
#[derive(Debug, Clone)]
pub struct Level<S> {
    pub(crate) state: S,
    /// Time of the last write (creation or latest coalesced edit).
    pub(crate) timestamp: Instant,
    pub(crate) persistent: bool,
    pub(crate) kind: ChangeKind,
    pub(crate) selection: Option<SelectionSnapshot>,
}

impl<S> Level<S> {
    /// Seed level: persistent so the first edit never merges into it.
    pub(crate) fn seed(state: S, timestamp: Instant) -> Self {
        Self {
            state,
            timestamp,
            persistent: true,
            kind: ChangeKind::Structural,
            selection: None,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn selection(&self) -> Option<SelectionSnapshot> {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_snapshot_default() {
        let snap = SelectionSnapshot::default();
        assert_eq!(snap.block, 0);
        assert_eq!(snap.offset, 0);
    }

    #[test]
    fn test_record_options_presets() {
        let text = RecordOptions::text();
        assert_eq!(text.kind, ChangeKind::Text);
        assert!(!text.persistent);

        let structural = RecordOptions::structural();
        assert_eq!(structural.kind, ChangeKind::Structural);
        assert!(!structural.persistent);

        let checkpoint = RecordOptions::checkpoint();
        assert!(checkpoint.persistent);
    }

    #[test]
    fn test_with_selection() {
        let sel = SelectionSnapshot { block: 2, offset: 7 };
        let opts = RecordOptions::text().with_selection(sel);
        assert_eq!(opts.selection, Some(sel));
    }

    #[test]
    fn test_seed_level_is_persistent_boundary() {
        let level = Level::seed(String::new(), Instant::now());
        assert!(level.is_persistent());
        assert_eq!(level.kind(), ChangeKind::Structural);
        assert!(level.selection().is_none());
    }

    #[test]
    fn test_change_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ChangeKind::Structural).unwrap();
        assert_eq!(json, "\"structural\"");
        let kind: ChangeKind = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(kind, ChangeKind::Text);
    }
}
