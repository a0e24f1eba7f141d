//! Style ranges over source text
//!
//! A `RangeSet` is rebuilt from scratch on every highlighting pass and
//! replaces the previous one wholesale.

use std::slice;

use crate::lang::Location;

use super::tokens::StyleTag;

/// A styled interval `[start, start + length)` of source bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Highlight category
    pub tag: StyleTag,
    /// Byte offset where the range starts
    pub start: usize,
    /// Length in bytes
    pub length: usize,
}

impl Range {
    /// Create a new range
    pub fn new(tag: StyleTag, start: usize, length: usize) -> Self {
        Self { tag, start, length }
    }

    /// Create a range covering a source location
    pub fn from_location(tag: StyleTag, location: Location) -> Self {
        Self::new(tag, location.start, location.len())
    }

    /// Byte offset one past the end of the range
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Collection of style ranges produced by one or more passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<Range>,
}

impl RangeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a range (order is restored by `sort`)
    pub fn push(&mut self, range: Range) {
        self.ranges.push(range);
    }

    /// Append every range of `other` after the ranges already held
    pub fn merge(&mut self, other: RangeSet) {
        self.ranges.extend(other.ranges);
    }

    /// Stable sort by start offset; equal starts keep insertion order
    pub fn sort(&mut self) {
        self.ranges.sort_by_key(|range| range.start);
    }

    /// Drop every range
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Number of ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the set holds no ranges
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate ranges in their current order
    pub fn iter(&self) -> slice::Iter<'_, Range> {
        self.ranges.iter()
    }

    /// Ranges in their current order
    pub fn as_slice(&self) -> &[Range] {
        &self.ranges
    }
}

impl FromIterator<Range> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

impl Extend<Range> for RangeSet {
    fn extend<I: IntoIterator<Item = Range>>(&mut self, iter: I) {
        self.ranges.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a Range;
    type IntoIter = slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location() {
        let range = Range::from_location(StyleTag::Comment, Location::new(4, 9));
        assert_eq!(range, Range::new(StyleTag::Comment, 4, 5));
        assert_eq!(range.end(), 9);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut set: RangeSet = [
            Range::new(StyleTag::Import, 10, 2),
            Range::new(StyleTag::Keyword, 0, 6),
            Range::new(StyleTag::Import, 0, 9),
            Range::new(StyleTag::Comment, 10, 1),
        ]
        .into_iter()
        .collect();
        set.sort();

        let order: Vec<_> = set.iter().map(|r| (r.start, r.tag)).collect();
        assert_eq!(
            order,
            vec![
                (0, StyleTag::Keyword),
                (0, StyleTag::Import),
                (10, StyleTag::Import),
                (10, StyleTag::Comment),
            ]
        );
    }

    #[test]
    fn test_merge_appends() {
        let mut lexical = RangeSet::new();
        lexical.push(Range::new(StyleTag::Keyword, 0, 6));
        let mut semantic = RangeSet::new();
        semantic.push(Range::new(StyleTag::Import, 0, 9));

        lexical.merge(semantic);
        assert_eq!(lexical.len(), 2);
        assert_eq!(lexical.as_slice()[1].tag, StyleTag::Import);

        lexical.clear();
        assert!(lexical.is_empty());
    }
}
