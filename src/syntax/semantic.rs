//! Semantic highlighting pass over the syntax tree

use crate::lang::{AstVisitor, ImportDirective, SourceUnit};

use super::range::{Range, RangeSet};
use super::tokens::StyleTag;

/// Collects ranges for the tree constructs that get their own style
struct HighlightVisitor<'a> {
    ranges: &'a mut RangeSet,
}

impl AstVisitor for HighlightVisitor<'_> {
    fn visit_import_directive(&mut self, node: &ImportDirective) -> bool {
        self.ranges.push(Range::from_location(StyleTag::Import, node.location));
        true
    }
}

/// Walk the tree and collect one range per semantic construct
///
/// The result is sorted by start offset and independent of the lexical pass.
pub fn compute_semantic_ranges(root: &SourceUnit) -> RangeSet {
    let mut ranges = RangeSet::new();
    root.accept(&mut HighlightVisitor { ranges: &mut ranges });
    ranges.sort();
    log::debug!("semantic pass produced {} ranges", ranges.len());
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parse;

    #[test]
    fn test_import_spans_whole_directive() {
        let source = "import X; uint a = 1;";
        let ranges = compute_semantic_ranges(&parse(source).unwrap());
        assert_eq!(ranges.as_slice(), &[Range::new(StyleTag::Import, 0, 9)]);
    }

    #[test]
    fn test_every_import_is_found() {
        let source = "pragma solidity ^0.4.0;\nimport \"a.sol\";\ncontract C {}\nimport * as B from \"b.sol\";\n";
        let ranges = compute_semantic_ranges(&parse(source).unwrap());
        let spans: Vec<_> = ranges.iter().map(|r| &source[r.start..r.end()]).collect();
        assert_eq!(spans, vec!["import \"a.sol\";", "import * as B from \"b.sol\";"]);
        assert!(ranges.iter().all(|r| r.tag == StyleTag::Import));
    }

    #[test]
    fn test_no_imports() {
        let ranges = compute_semantic_ranges(&parse("contract C { uint x; }").unwrap());
        assert!(ranges.is_empty());
    }
}
