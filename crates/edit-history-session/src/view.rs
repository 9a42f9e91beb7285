/// What the user sees: a rendered copy of the content plus focus.
///
/// The view is never edited directly. Every change reaches it through
/// [`RenderedView::apply`], so a stale view after undo/redo shows up as a
/// mismatch in [`RenderedView::matches`].
use crate::caret::Caret;
use crate::content::{BlockId, Content};

/// One rendered block: flattened text plus bold char ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub id: BlockId,
    pub text: String,
    /// Half-open char ranges rendered in bold.
    pub bold_ranges: Vec<(usize, usize)>,
}

/// The live editable view.
#[derive(Debug, Clone, Default)]
pub struct RenderedView {
    blocks: Vec<RenderedBlock>,
    focus: Option<Caret>,
    /// Bumped on every apply, like a frame counter.
    version: u64,
}

impl RenderedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything shown with `content` and moves focus to `caret`.
    ///
    /// Focus is dropped when there is no block to hold it.
    pub fn apply(&mut self, content: &Content, caret: Option<Caret>) {
        self.blocks = render_blocks(content);
        self.focus = if content.is_empty() {
            None
        } else {
            caret.map(|c| c.clamped(content))
        };
        self.version = self.version.wrapping_add(1);
    }

    /// Whether the view shows exactly `content` with focus at `caret`.
    pub fn matches(&self, content: &Content, caret: Option<Caret>) -> bool {
        let focus = if content.is_empty() {
            None
        } else {
            caret.map(|c| c.clamped(content))
        };
        self.blocks == render_blocks(content) && self.focus == focus
    }

    /// Text of the focused block, or empty when nothing has focus.
    pub fn active_text(&self) -> &str {
        self.focus
            .and_then(|c| self.blocks.get(c.block))
            .map_or("", |b| b.text.as_str())
    }

    /// All rendered text, blocks joined by newlines.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    pub fn focus(&self) -> Option<Caret> {
        self.focus
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

fn render_blocks(content: &Content) -> Vec<RenderedBlock> {
    content
        .blocks()
        .iter()
        .map(|block| {
            let mut text = String::new();
            let mut bold_ranges = Vec::new();
            let mut pos = 0;
            for run in &block.runs {
                let len = run.text.chars().count();
                if run.bold {
                    bold_ranges.push((pos, pos + len));
                }
                text.push_str(&run.text);
                pos += len;
            }
            RenderedBlock {
                id: block.id,
                text,
                bold_ranges,
            }
        })
        .collect()
}
