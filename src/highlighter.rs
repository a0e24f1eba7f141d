//! Highlighting pipeline
//!
//! `CodeHighlighter` owns the ranges of the current pass. A pass runs the
//! lexical scan, optionally the semantic scan, merges both into one set
//! sorted by start, and then maps that set onto a document's blocks.

use crate::lang::{self, SourceScanner, SourceUnit};
use crate::syntax::{
    apply_to_blocks, compute_lexical_ranges, compute_semantic_ranges, BlockSequence, RangeSet,
    Scanner, StyleTable,
};

/// Collects ranges from both passes and applies them to documents
#[derive(Debug, Default)]
pub struct CodeHighlighter {
    formats: RangeSet,
}

impl CodeHighlighter {
    /// Create a highlighter with no ranges
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the ranges of a lexical scan
    pub fn process_source<S: Scanner + ?Sized>(&mut self, scanner: &mut S) {
        self.formats.merge(compute_lexical_ranges(scanner));
        self.formats.sort();
    }

    /// Add the ranges of a semantic scan
    pub fn process_ast(&mut self, root: &SourceUnit) {
        self.formats.merge(compute_semantic_ranges(root));
        self.formats.sort();
    }

    /// Replace the formats of every block of `document` with this pass's
    /// ranges; returns the number of blocks visited
    pub fn update_formatting<B>(&self, document: &mut B, table: &StyleTable) -> usize
    where
        B: BlockSequence + ?Sized,
    {
        apply_to_blocks(&self.formats, document, table)
    }

    /// Ranges collected so far, sorted by start
    pub fn formats(&self) -> &RangeSet {
        &self.formats
    }

    /// Start a new pass
    pub fn clear(&mut self) {
        self.formats.clear();
    }

    /// Run a full pass over `source` and apply it to `document`
    ///
    /// When `semantic` is set and the source does not parse, the pass goes
    /// ahead with lexical ranges only. Returns the number of ranges applied.
    pub fn highlight<B>(
        &mut self,
        source: &str,
        document: &mut B,
        table: &StyleTable,
        semantic: bool,
    ) -> usize
    where
        B: BlockSequence + ?Sized,
    {
        self.clear();
        self.process_source(&mut SourceScanner::new(source));

        if semantic {
            match lang::parse(source) {
                Ok(unit) => self.process_ast(&unit),
                Err(err) => log::warn!("semantic highlighting skipped: {err}"),
            }
        }

        let blocks = self.update_formatting(document, table);
        log::debug!("applied {} ranges to {blocks} blocks", self.formats.len());
        self.formats.len()
    }
}
