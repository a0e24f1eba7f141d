//! Mapping style ranges onto text blocks
//!
//! The document is presented as an ordered sequence of blocks (lines), each
//! with its own offset and length. A mapping pass walks the sorted ranges
//! and the blocks together, once, front to back, and hands every block the
//! ranges that intersect it expressed relative to the block start.
//!
//! Emitted lengths are the full range length, not the part inside the block:
//! a range that continues onto the next line paints past the end of this one
//! and the renderer clips it. A range spanning several blocks is attributed
//! to each of them.

use std::mem;

use super::range::{Range, RangeSet};
use super::style::{Style, StyleTable};
use super::tokens::StyleTag;

/// Style range relative to the start of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintRange {
    pub tag: StyleTag,
    /// Offset from the block start; negative when the range began earlier
    pub start: isize,
    /// Full length of the originating range
    pub length: usize,
}

impl PaintRange {
    /// Attach the visual style for this range's tag
    pub fn resolve(self, table: &StyleTable) -> FormatRange {
        FormatRange {
            tag: self.tag,
            start: self.start,
            length: self.length,
            style: table.get(self.tag),
        }
    }
}

/// Paint ranges computed for one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintInstruction {
    /// Position of the block in traversal order
    pub block_index: usize,
    /// Ranges in start order; empty clears previous styling
    pub ranges: Vec<PaintRange>,
}

/// Paint range with its style resolved, as stored on a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRange {
    pub tag: StyleTag,
    pub start: isize,
    pub length: usize,
    pub style: Style,
}

/// A block of the target document
pub trait TextBlock {
    /// Offset of the block in the document text
    fn position(&self) -> usize;
    /// Length of the block, including any trailing separator
    fn length(&self) -> usize;
    /// Invalid blocks end the traversal
    fn is_valid(&self) -> bool {
        true
    }
    /// Drop the formats attached by a previous pass
    fn clear_formats(&mut self);
    /// Attach the formats for this pass
    fn set_formats(&mut self, formats: Vec<FormatRange>);
}

/// Ordered blocks of the target document
///
/// Blocks are requested with increasing indices starting at zero; `None`
/// ends the sequence.
pub trait BlockSequence {
    type Block: TextBlock;

    fn block_mut(&mut self, index: usize) -> Option<&mut Self::Block>;

    /// Schedule `[position, position + length)` for redraw
    fn mark_contents_dirty(&mut self, position: usize, length: usize);
}

/// Cursor state of one mapping pass
///
/// Feed it blocks in document order with `map_block`. Ranges are consumed
/// once they can no longer reach a later block.
pub struct BlockMapper<'a> {
    ranges: &'a [Range],
    /// Next range not yet looked at
    next: usize,
    /// Ranges that extend past the end of the previous block
    carried: Vec<Range>,
}

impl<'a> BlockMapper<'a> {
    /// Start a pass over `ranges`, which must be sorted by start
    pub fn new(ranges: &'a RangeSet) -> Self {
        Self {
            ranges: ranges.as_slice(),
            next: 0,
            carried: Vec::new(),
        }
    }

    /// Compute the paint ranges for the next block
    pub fn map_block(&mut self, position: usize, length: usize) -> Vec<PaintRange> {
        let block_end = position + length;
        let carried = mem::take(&mut self.carried);

        let first_fresh = self.next;
        while self.ranges.get(self.next).is_some_and(|r| r.start < block_end) {
            self.next += 1;
        }
        let fresh = &self.ranges[first_fresh..self.next];

        // Carried ranges started before any fresh one, so start order holds
        let mut painted = Vec::new();
        for range in carried.into_iter().chain(fresh.iter().copied()) {
            let intersection_start = range.start.max(position);
            let intersection_end = range.end().min(block_end);
            if intersection_end > intersection_start {
                painted.push(PaintRange {
                    tag: range.tag,
                    start: range.start as isize - position as isize,
                    length: range.length,
                });
            }
            if range.end() > block_end {
                self.carried.push(range);
            }
        }
        painted
    }

    /// Ranges that no block has consumed yet
    pub fn remaining(&self) -> usize {
        self.ranges.len() - self.next + self.carried.len()
    }
}

/// Compute paint instructions for `(position, length)` blocks without
/// touching any document
pub fn map_to_blocks<I>(ranges: &RangeSet, blocks: I) -> Vec<PaintInstruction>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut mapper = BlockMapper::new(ranges);
    blocks
        .into_iter()
        .enumerate()
        .map(|(block_index, (position, length))| PaintInstruction {
            block_index,
            ranges: mapper.map_block(position, length),
        })
        .collect()
}

/// Map `ranges` onto every block of `blocks`, replacing their formats and
/// marking each visited block dirty
///
/// Every block is visited exactly once, in order, even when `ranges` is
/// empty. Returns the number of blocks visited.
pub fn apply_to_blocks<B>(ranges: &RangeSet, blocks: &mut B, table: &StyleTable) -> usize
where
    B: BlockSequence + ?Sized,
{
    let mut mapper = BlockMapper::new(ranges);
    let mut index = 0;

    while let Some(block) = blocks.block_mut(index) {
        if !block.is_valid() {
            break;
        }
        let (position, length) = (block.position(), block.length());
        let formats: Vec<FormatRange> = mapper
            .map_block(position, length)
            .into_iter()
            .map(|paint| paint.resolve(table))
            .collect();

        log::trace!("block {index} at {position}+{length}: {} formats", formats.len());
        block.clear_formats();
        block.set_formats(formats);
        blocks.mark_contents_dirty(position, length);
        index += 1;
    }

    if mapper.remaining() > 0 {
        log::debug!("{} ranges lie past the last block", mapper.remaining());
    }
    index
}
