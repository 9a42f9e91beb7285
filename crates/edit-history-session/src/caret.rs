/// Caret model: a collapsed selection inside one block.
use crate::content::Content;

/// Caret position as block index and char offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Caret {
    /// 0-indexed block.
    pub block: usize,
    /// 0-indexed char offset within the block.
    pub offset: usize,
}

impl Caret {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    /// Caret at the end of the last block, or the origin for empty content.
    pub fn end_of(content: &Content) -> Self {
        match content.len_blocks().checked_sub(1) {
            Some(last) => {
                let offset = content.block(last).map_or(0, |b| b.len_chars());
                Self::new(last, offset)
            }
            None => Self::default(),
        }
    }

    /// Returns this caret moved to the nearest valid position in `content`.
    pub fn clamped(self, content: &Content) -> Self {
        let Some(last) = content.len_blocks().checked_sub(1) else {
            return Self::default();
        };
        let block = self.block.min(last);
        let len = content.block(block).map_or(0, |b| b.len_chars());
        Self::new(block, self.offset.min(len))
    }
}
