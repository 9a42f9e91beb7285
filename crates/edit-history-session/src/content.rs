/// Block-structured content: the state snapshot stored in every history level.
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Stable identifier of a block within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u64);

/// A run of text sharing one inline format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    pub fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// A paragraph block made of formatted runs.
///
/// Runs are kept normalized: no empty runs and no two neighbours with
/// the same format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub runs: Vec<TextRun>,
}

impl Block {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            runs: Vec::new(),
        }
    }

    /// Returns the block's text without formatting.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Returns the number of chars in the block.
    pub fn len_chars(&self) -> usize {
        self.runs.iter().map(TextRun::len_chars).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Inserts `text` at char `offset` with the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is past the end of the block.
    pub fn insert(&mut self, offset: usize, text: &str, bold: bool) -> Result<()> {
        self.check_offset(offset)?;
        if text.is_empty() {
            return Ok(());
        }
        let mut tail = self.split_off(offset)?;
        self.runs.push(TextRun {
            text: text.to_string(),
            bold,
        });
        self.runs.append(&mut tail);
        normalize_runs(&mut self.runs);
        Ok(())
    }

    /// Removes the char at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no char at `offset`.
    pub fn remove_char(&mut self, offset: usize) -> Result<()> {
        let mut remaining = offset;
        let mut removed = false;
        for run in &mut self.runs {
            let len = run.len_chars();
            if remaining < len {
                let start = char_to_byte(&run.text, remaining);
                let end = char_to_byte(&run.text, remaining + 1);
                run.text.replace_range(start..end, "");
                removed = true;
                break;
            }
            remaining -= len;
        }
        if !removed {
            anyhow::bail!(
                "char offset {} out of bounds (block has {} chars)",
                offset,
                self.len_chars()
            );
        }
        normalize_runs(&mut self.runs);
        Ok(())
    }

    /// Splits the block at char `offset`, returning the runs after it.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is past the end of the block.
    pub fn split_off(&mut self, offset: usize) -> Result<Vec<TextRun>> {
        self.check_offset(offset)?;
        let mut remaining = offset;
        let mut split_at = self.runs.len();
        let mut tail = Vec::new();
        for (i, run) in self.runs.iter_mut().enumerate() {
            let len = run.len_chars();
            if remaining <= len {
                let byte = char_to_byte(&run.text, remaining);
                let rest = run.text.split_off(byte);
                if !rest.is_empty() {
                    tail.push(TextRun {
                        text: rest,
                        bold: run.bold,
                    });
                }
                split_at = i + 1;
                break;
            }
            remaining -= len;
        }
        tail.extend(self.runs.drain(split_at..));
        normalize_runs(&mut self.runs);
        normalize_runs(&mut tail);
        Ok(tail)
    }

    /// Appends runs at the end of the block.
    pub fn append_runs(&mut self, mut runs: Vec<TextRun>) {
        self.runs.append(&mut runs);
        normalize_runs(&mut self.runs);
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        let len = self.len_chars();
        if offset > len {
            anyhow::bail!("char offset {} out of bounds (block has {} chars)", offset, len);
        }
        Ok(())
    }
}

/// The full editable content: an ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    blocks: Vec<Block>,
    next_id: u64,
}

impl Content {
    /// Creates empty content with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds content with one plain-text block per entry.
    pub fn from_paragraphs(paragraphs: &[&str]) -> Self {
        let mut content = Self::new();
        for text in paragraphs {
            let index = content.append_block();
            if let Some(block) = content.blocks.get_mut(index) {
                block.append_runs(vec![TextRun::plain(text)]);
            }
        }
        content
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns all block texts joined by newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Appends an empty block and returns its index.
    pub fn append_block(&mut self) -> usize {
        let block = Block::new(self.allocate_id());
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    /// Inserts `text` into block `index` at char `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block or offset is out of bounds.
    pub fn insert_text(&mut self, index: usize, offset: usize, text: &str, bold: bool) -> Result<()> {
        self.block_mut(index)?.insert(offset, text, bold)
    }

    /// Removes the char at `offset` in block `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block or offset is out of bounds.
    pub fn remove_char(&mut self, index: usize, offset: usize) -> Result<()> {
        self.block_mut(index)?.remove_char(offset)
    }

    /// Splits block `index` at `offset`; the tail becomes a new block right after it.
    ///
    /// Returns the index of the new block.
    ///
    /// # Errors
    ///
    /// Returns an error if the block or offset is out of bounds.
    pub fn split_block(&mut self, index: usize, offset: usize) -> Result<usize> {
        let tail = self.block_mut(index)?.split_off(offset)?;
        let mut block = Block::new(self.allocate_id());
        block.append_runs(tail);
        self.blocks.insert(index + 1, block);
        Ok(index + 1)
    }

    /// Merges block `index` into the block before it.
    ///
    /// Returns the char offset in the previous block where the join happened.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is 0 or out of bounds.
    pub fn merge_with_previous(&mut self, index: usize) -> Result<usize> {
        if index == 0 || index >= self.blocks.len() {
            anyhow::bail!(
                "block index {} cannot be merged (content has {} blocks)",
                index,
                self.blocks.len()
            );
        }
        let removed = self.blocks.remove(index);
        let previous = &mut self.blocks[index - 1];
        let join = previous.len_chars();
        previous.append_runs(removed.runs);
        Ok(join)
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut Block> {
        let len = self.blocks.len();
        match self.blocks.get_mut(index) {
            Some(block) => Ok(block),
            None => anyhow::bail!("block index {} out of bounds (content has {} blocks)", index, len),
        }
    }

    fn allocate_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Converts a char offset into a byte offset, clamping to the end.
fn char_to_byte(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Drops empty runs and joins neighbours that share a format.
fn normalize_runs(runs: &mut Vec<TextRun>) {
    runs.retain(|r| !r.text.is_empty());
    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());
    for run in runs.drain(..) {
        match merged.last_mut() {
            Some(last) if last.bold == run.bold => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    *runs = merged;
}
