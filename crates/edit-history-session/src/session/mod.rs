//! Editing session combining content, caret, history, and view.
//!
//! An `EditingSession` is the editing surface's side of the history
//! contract. Each user action mutates the content, records it with the
//! history engine, and then pushes the result to the view. Undo and redo
//! take the restored level and push it through the same view path, so the
//! model and the view cannot drift apart. Save, publish, and reload live
//! in the `persist` submodule.

mod persist;

pub use persist::{PostStatus, SavedDocument};

use crate::caret::Caret;
use crate::content::Content;
use crate::history::{
    Clock, HistoryConfig, HistoryEngine, RecordOptions, RecordOutcome, SelectionSnapshot,
    SystemClock,
};
use crate::view::RenderedView;

/// A single editing session over one document.
pub struct EditingSession {
    /// The authoritative content.
    content: Content,
    /// Caret inside the focused block, `None` when no block has focus.
    caret: Option<Caret>,
    /// Whether newly typed text is bold.
    bold: bool,
    /// Undo/redo history of `content`.
    history: HistoryEngine<Content>,
    /// What the user sees.
    view: RenderedView,
    /// Time source for level timestamps.
    clock: Box<dyn Clock>,
    /// Last saved or published document.
    saved: Option<SavedDocument>,
}

impl std::fmt::Debug for EditingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditingSession")
            .field("content", &self.content)
            .field("caret", &self.caret)
            .field("bold", &self.bold)
            .field("history", &self.history)
            .field("saved", &self.saved.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for EditingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditingSession {
    /// Creates a session over an empty document using the system clock.
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default(), SystemClock)
    }

    /// Creates a session over an empty document.
    pub fn with_config(config: HistoryConfig, clock: impl Clock + 'static) -> Self {
        Self::open(SavedDocument::default(), config, clock)
    }

    /// Opens a previously saved document with a fresh history.
    pub fn open(saved: SavedDocument, config: HistoryConfig, clock: impl Clock + 'static) -> Self {
        let content = saved.content.clone();
        let history = HistoryEngine::new(content.clone(), config, clock.now());
        let saved = if saved.content.is_empty() {
            None
        } else {
            Some(saved)
        };
        let mut session = Self {
            content,
            caret: None,
            bold: false,
            history,
            view: RenderedView::new(),
            clock: Box::new(clock),
            saved,
        };
        session.apply_to_view();
        session
    }

    /// Appends an empty paragraph and moves the caret into it.
    pub fn append_block(&mut self) {
        let index = self.content.append_block();
        self.caret = Some(Caret::new(index, 0));
        self.bold = false;
        self.commit(RecordOptions::structural());
    }

    /// Moves the caret to the end of block `index`.
    ///
    /// Returns false if there is no such block. Moving the caret closes the
    /// current coalescing level but records nothing.
    pub fn select_block(&mut self, index: usize) -> bool {
        let Some(block) = self.content.block(index) else {
            return false;
        };
        self.caret = Some(Caret::new(index, block.len_chars()));
        self.history.break_coalescing();
        self.apply_to_view();
        true
    }

    /// Inserts `text` at the caret using the active inline format.
    ///
    /// Returns false if nothing was inserted (no focus or empty text).
    pub fn type_text(&mut self, text: &str) -> bool {
        let Some(caret) = self.caret else {
            return false;
        };
        if text.is_empty() {
            return false;
        }
        if let Err(e) = self
            .content
            .insert_text(caret.block, caret.offset, text, self.bold)
        {
            tracing::warn!("Failed to insert text: {e}");
            return false;
        }
        self.caret = Some(Caret::new(
            caret.block,
            caret.offset + text.chars().count(),
        ));
        self.commit(RecordOptions::text());
        true
    }

    /// Deletes the char before the caret, joining blocks at a block start.
    ///
    /// Returns false if there was nothing to delete.
    pub fn delete_backward(&mut self) -> bool {
        let Some(caret) = self.caret else {
            return false;
        };
        if caret.offset > 0 {
            if let Err(e) = self.content.remove_char(caret.block, caret.offset - 1) {
                tracing::warn!("Failed to delete char: {e}");
                return false;
            }
            self.caret = Some(Caret::new(caret.block, caret.offset - 1));
            self.commit(RecordOptions::text());
            return true;
        }
        if caret.block == 0 {
            return false;
        }
        match self.content.merge_with_previous(caret.block) {
            Ok(join) => {
                self.caret = Some(Caret::new(caret.block - 1, join));
                self.commit(RecordOptions::structural());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to merge blocks: {e}");
                false
            }
        }
    }

    /// Splits the focused block at the caret; the caret moves to the new block.
    pub fn press_enter(&mut self) -> bool {
        let Some(caret) = self.caret else {
            return false;
        };
        match self.content.split_block(caret.block, caret.offset) {
            Ok(index) => {
                self.caret = Some(Caret::new(index, 0));
                self.commit(RecordOptions::structural());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to split block: {e}");
                false
            }
        }
    }

    /// Flips bold for subsequently typed text.
    ///
    /// No content changes, but the next typing starts its own level.
    /// Returns the new state.
    pub fn toggle_bold(&mut self) -> bool {
        self.bold = !self.bold;
        self.history.break_coalescing();
        self.bold
    }

    /// Performs undo. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let (content, selection) = match self.history.undo() {
            Some(level) => (level.state().clone(), level.selection()),
            None => return false,
        };
        self.restore(content, selection);
        true
    }

    /// Performs redo. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let (content, selection) = match self.history.redo() {
            Some(level) => (level.state().clone(), level.selection()),
            None => return false,
        };
        self.restore(content, selection);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn caret(&self) -> Option<Caret> {
        self.caret
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub fn history(&self) -> &HistoryEngine<Content> {
        &self.history
    }

    /// Returns the content as plain text, blocks joined by newlines.
    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }

    /// Whether the view shows exactly the current content and caret.
    pub fn is_view_in_sync(&self) -> bool {
        self.view.matches(&self.content, self.caret)
    }

    /// Records the current content and refreshes the view.
    fn commit(&mut self, options: RecordOptions) -> RecordOutcome {
        let options = match self.caret {
            Some(caret) => options.with_selection(caret.into()),
            None => options,
        };
        let outcome = self
            .history
            .record_at(self.content.clone(), options, self.clock.now());
        self.apply_to_view();
        outcome
    }

    /// Makes a restored level the live state.
    ///
    /// Without a stored selection the caret keeps its block where possible.
    fn restore(&mut self, content: Content, selection: Option<SelectionSnapshot>) {
        self.caret = if content.is_empty() {
            None
        } else {
            let caret = selection
                .map(Caret::from)
                .or(self.caret)
                .unwrap_or_else(|| Caret::end_of(&content));
            Some(caret.clamped(&content))
        };
        self.content = content;
        self.bold = false;
        self.apply_to_view();
    }

    /// The single path from model to view.
    fn apply_to_view(&mut self) {
        self.view.apply(&self.content, self.caret);
    }
}
