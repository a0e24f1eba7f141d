//! Syntax highlighting core
//!
//! This module turns a token stream and a syntax tree into style ranges
//! and maps those ranges onto the blocks of a document:
//! - Lexical pass: classify tokens into highlight categories
//! - Semantic pass: tag tree constructs (import directives)
//! - Block mapping: split the merged ranges per block

mod blocks;
mod lexical;
mod range;
mod semantic;
mod style;
mod tokens;

pub use blocks::{
    apply_to_blocks, map_to_blocks, BlockMapper, BlockSequence, FormatRange, PaintInstruction,
    PaintRange, TextBlock,
};
pub use lexical::{classify, compute_lexical_ranges, Scanner};
pub use range::{Range, RangeSet};
pub use semantic::compute_semantic_ranges;
pub use style::{Color, Style, StyleTable};
pub use tokens::StyleTag;
