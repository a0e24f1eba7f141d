//! Document representation - source text split into line blocks
//!
//! Each line is one block. A block's length counts the line separator, so
//! consecutive blocks tile the text with no gaps, and the final block is one
//! byte longer than the text it ends.

use std::mem;
use std::path::Path;

use crate::syntax::{BlockSequence, FormatRange, TextBlock};

/// One line of a document with the formats attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBlock {
    /// Byte offset of the line in the document
    position: usize,
    /// Line text without the trailing newline
    text: String,
    /// Formats from the last highlighting pass
    formats: Vec<FormatRange>,
}

impl LineBlock {
    /// Get the line text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Formats attached by the last highlighting pass
    pub fn formats(&self) -> &[FormatRange] {
        &self.formats
    }
}

impl TextBlock for LineBlock {
    fn position(&self) -> usize {
        self.position
    }

    fn length(&self) -> usize {
        self.text.len() + 1
    }

    fn clear_formats(&mut self) {
        self.formats.clear();
    }

    fn set_formats(&mut self, formats: Vec<FormatRange>) {
        self.formats = formats;
    }
}

/// Source text plus its line blocks
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    blocks: Vec<LineBlock>,
    /// Spans marked for redraw since the last `take_dirty_spans`
    dirty: Vec<(usize, usize)>,
}

impl Document {
    /// Create a document from text
    pub fn new(text: impl Into<String>) -> Self {
        let mut doc = Self::default();
        doc.set_text(text);
        doc
    }

    /// Create a document from file contents
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(content))
    }

    /// Replace the text and rebuild the blocks
    ///
    /// Formats stay attached to blocks by index until the next highlighting
    /// pass replaces them, so they may be stale in between.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let mut old_blocks = mem::take(&mut self.blocks).into_iter();

        let mut position = 0;
        for line in self.text.split('\n') {
            let formats = old_blocks.next().map(|b| b.formats).unwrap_or_default();
            self.blocks.push(LineBlock {
                position,
                text: line.to_string(),
                formats,
            });
            position += line.len() + 1;
        }
    }

    /// Get the full text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get a block by index
    pub fn block(&self, idx: usize) -> Option<&LineBlock> {
        self.blocks.get(idx)
    }

    /// Iterate over all blocks
    pub fn blocks(&self) -> impl Iterator<Item = &LineBlock> {
        self.blocks.iter()
    }

    /// Drain the spans marked dirty since the last call
    pub fn take_dirty_spans(&mut self) -> Vec<(usize, usize)> {
        mem::take(&mut self.dirty)
    }
}

impl BlockSequence for Document {
    type Block = LineBlock;

    fn block_mut(&mut self, index: usize) -> Option<&mut LineBlock> {
        self.blocks.get_mut(index)
    }

    fn mark_contents_dirty(&mut self, position: usize, length: usize) {
        self.dirty.push((position, length));
    }
}
