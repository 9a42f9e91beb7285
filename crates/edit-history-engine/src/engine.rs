/// Core undo/redo engine: a cursor over an ordered sequence of levels.
///
/// The level at the cursor is always the content currently shown. Recording
/// either overwrites that level (coalescing) or appends a new one after
/// discarding any redo branch. Undo and redo only move the cursor.
use std::time::Instant;

use crate::config::HistoryConfig;
use crate::level::{Level, RecordOptions};
use crate::merge::{coalesce_decision, MergeDecision};

/// What a `record` call did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new level was appended at the tail.
    Appended,
    /// The current level was overwritten in place.
    Coalesced,
    /// State was unchanged; the current level became a persistent boundary.
    Checkpointed,
    /// State was unchanged; nothing but the stored selection moved.
    Unchanged,
}

/// Manages undo/redo history for a single editing session.
///
/// Each session owns its own engine; there is no shared or global history.
/// The sequence is never empty: it starts with a seed level holding the
/// loaded content.
pub struct HistoryEngine<S> {
    /// Recorded levels, oldest first.
    levels: Vec<Level<S>>,
    /// Index of the level currently applied.
    cursor: usize,
    /// Whether the next text record may merge into the current level.
    /// Cleared by undo, redo, reset, and explicit breaks.
    coalescing_open: bool,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl<S> std::fmt::Debug for HistoryEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryEngine")
            .field("levels_len", &self.levels.len())
            .field("cursor", &self.cursor)
            .field("coalescing_open", &self.coalescing_open)
            .field("config", &self.config)
            .finish()
    }
}

impl<S: Clone + PartialEq> HistoryEngine<S> {
    /// Creates an engine seeded with `initial` as its only level.
    pub fn new(initial: S, config: HistoryConfig, now: Instant) -> Self {
        Self {
            levels: vec![Level::seed(initial, now)],
            cursor: 0,
            coalescing_open: false,
            config,
        }
    }

    /// Creates an engine with default config, timestamped now.
    ///
    /// Convenience constructor for tests and simple usage.
    pub fn with_defaults(initial: S) -> Self {
        Self::new(initial, HistoryConfig::default(), Instant::now())
    }

    /// Records `state`, timestamped now.
    pub fn record(&mut self, state: S, options: RecordOptions) -> RecordOutcome {
        self.record_at(state, options, Instant::now())
    }

    /// Records `state` as of `now`.
    ///
    /// Unchanged state never adds a level: a persistent record only marks
    /// the current level as a boundary, so save/publish leave the sequence
    /// untouched. Otherwise any redo branch is discarded and the state
    /// either coalesces into the current level or is appended.
    pub fn record_at(&mut self, state: S, options: RecordOptions, now: Instant) -> RecordOutcome {
        let current = &mut self.levels[self.cursor];
        if current.state == state {
            if let Some(selection) = options.selection {
                current.selection = Some(selection);
            }
            if options.persistent {
                current.persistent = true;
                tracing::debug!(cursor = self.cursor, "Checkpoint on unchanged level");
                return RecordOutcome::Checkpointed;
            }
            return RecordOutcome::Unchanged;
        }

        self.discard_redo_branch();

        let window = self.config.merge_window;
        let current = &mut self.levels[self.cursor];
        if coalesce_decision(current, self.coalescing_open, &options, now, window)
            == MergeDecision::Coalesce
        {
            current.state = state;
            current.timestamp = now;
            if options.selection.is_some() {
                current.selection = options.selection;
            }
            tracing::trace!(cursor = self.cursor, "Coalesced edit into current level");
            return RecordOutcome::Coalesced;
        }

        self.levels.push(Level {
            state,
            timestamp: now,
            persistent: options.persistent,
            kind: options.kind,
            selection: options.selection,
        });
        self.cursor = self.levels.len() - 1;
        self.coalescing_open = true;
        tracing::debug!(
            cursor = self.cursor,
            kind = ?options.kind,
            persistent = options.persistent,
            "Appended level"
        );

        self.enforce_capacity();
        RecordOutcome::Appended
    }

    /// Forces a level break so the next edit starts a new level.
    pub fn break_coalescing(&mut self) {
        self.coalescing_open = false;
    }

    /// Steps back one level.
    ///
    /// Returns the level to apply, or `None` if already at the oldest level.
    pub fn undo(&mut self) -> Option<&Level<S>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.coalescing_open = false;
        tracing::debug!(cursor = self.cursor, "Undo");
        Some(&self.levels[self.cursor])
    }

    /// Steps forward one level.
    ///
    /// Returns the level to apply, or `None` if already at the tail.
    pub fn redo(&mut self) -> Option<&Level<S>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.coalescing_open = false;
        tracing::debug!(cursor = self.cursor, "Redo");
        Some(&self.levels[self.cursor])
    }

    /// Whether an older level exists.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a newer level exists.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.levels.len()
    }

    /// Drops every level and seeds the history with `state`.
    ///
    /// Used when content is reloaded from its persisted form.
    pub fn reset(&mut self, state: S, now: Instant) {
        let dropped = self.levels.len();
        self.levels.clear();
        self.levels.push(Level::seed(state, now));
        self.cursor = 0;
        self.coalescing_open = false;
        tracing::debug!(dropped, "History reset to seed level");
    }

    /// The level currently applied.
    pub fn current(&self) -> &Level<S> {
        &self.levels[self.cursor]
    }

    /// Index of the level currently applied.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of levels, seed included.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: the seed level is never removed.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// All levels, oldest first.
    pub fn levels(&self) -> &[Level<S>] {
        &self.levels
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Truncates every level after the cursor.
    fn discard_redo_branch(&mut self) {
        let keep = self.cursor + 1;
        if self.levels.len() > keep {
            let discarded = self.levels.len() - keep;
            self.levels.truncate(keep);
            self.coalescing_open = false;
            tracing::debug!(discarded, "Discarded redo branch");
        }
    }

    /// Evicts the oldest levels beyond capacity.
    fn enforce_capacity(&mut self) {
        let max = self.config.effective_max_levels();
        if self.levels.len() > max {
            let excess = self.levels.len() - max;
            self.levels.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
            tracing::debug!(evicted = excess, "Evicted oldest levels");
        }
    }
}
