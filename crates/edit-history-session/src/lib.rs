//! Editing session that drives the history engine.
//!
//! Stands in for a rich content editor: block content with inline bold,
//! a caret, save/publish/reload, and a rendered view kept in lockstep with
//! the model through undo and redo.

pub mod caret;
pub mod content;
pub mod history;
pub mod session;
pub mod view;

pub use caret::Caret;
pub use content::{Block, BlockId, Content, TextRun};
pub use session::{EditingSession, PostStatus, SavedDocument};
pub use view::{RenderedBlock, RenderedView};
