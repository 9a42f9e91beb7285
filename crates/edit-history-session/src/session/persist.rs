//! Save, publish, and reload.
//!
//! Saving never touches history levels: it records a persistent checkpoint
//! so the next edit cannot merge backward across the save. Reloading
//! rebuilds content from the last saved document and reseeds history.

use serde::{Deserialize, Serialize};

use super::EditingSession;
use crate::content::Content;
use crate::history::RecordOptions;

/// Publication state of a saved document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// Content as last handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedDocument {
    pub content: Content,
    pub status: PostStatus,
}

impl EditingSession {
    /// Saves the current content as a draft.
    pub fn save_draft(&mut self) -> SavedDocument {
        self.checkpoint(PostStatus::Draft)
    }

    /// Publishes the current content.
    pub fn publish(&mut self) -> SavedDocument {
        self.checkpoint(PostStatus::Published)
    }

    /// Discards the live session state and reopens the last saved document.
    ///
    /// History is reset to a single seed level holding the saved content,
    /// so nothing is undoable until the next edit. Focus is cleared.
    pub fn reload(&mut self) {
        let content = self
            .saved
            .as_ref()
            .map(|s| s.content.clone())
            .unwrap_or_default();
        let now = self.clock.now();
        self.history.reset(content.clone(), now);
        self.content = content;
        self.caret = None;
        self.bold = false;
        self.apply_to_view();
        tracing::info!(blocks = self.content.len_blocks(), "Reloaded saved document");
    }

    /// The document as last saved or published, if any.
    pub fn saved(&self) -> Option<&SavedDocument> {
        self.saved.as_ref()
    }

    /// Whether the live content differs from what was last saved.
    pub fn is_dirty(&self) -> bool {
        match &self.saved {
            Some(saved) => saved.content != self.content,
            None => !self.content.is_empty(),
        }
    }

    fn checkpoint(&mut self, status: PostStatus) -> SavedDocument {
        let outcome = self.commit(RecordOptions::checkpoint());
        let saved = SavedDocument {
            content: self.content.clone(),
            status,
        };
        self.saved = Some(saved.clone());
        tracing::info!(?status, ?outcome, "Saved document");
        saved
    }
}
