use solhl::lang::{parse, SourceScanner};
use solhl::syntax::{
    apply_to_blocks, compute_lexical_ranges, compute_semantic_ranges, map_to_blocks, Range,
    RangeSet, StyleTable, StyleTag, TextBlock,
};
use solhl::{render_document, CodeHighlighter, Document, RenderOptions};

const CONTRACT: &str = r#"pragma solidity ^0.4.0;
import "owned.sol";
import * as Math from "math.sol";

/* Token
   contract */
contract Token is owned {
    mapping (address => uint) balances;
    string public name = "Token";

    function transfer(address to, uint value) returns (bool) {
        if (balances[msg.sender] < value) return false;
        delete balances[to];
        return true; // done
    }
}
"#;

fn combined(source: &str) -> RangeSet {
    let mut ranges = compute_lexical_ranges(&mut SourceScanner::new(source));
    ranges.merge(compute_semantic_ranges(&parse(source).unwrap()));
    ranges.sort();
    ranges
}

#[test]
fn import_and_number_on_single_line() {
    let source = "import X; uint a = 1;";
    let mut doc = Document::new(source);
    apply_to_blocks(&combined(source), &mut doc, &StyleTable::default());

    let block = doc.block(0).unwrap();
    let interesting: Vec<_> = block
        .formats()
        .iter()
        .filter(|f| matches!(f.tag, StyleTag::Import | StyleTag::NumberLiteral))
        .map(|f| (f.tag, f.start, f.length))
        .collect();
    assert_eq!(
        interesting,
        vec![(StyleTag::Import, 0, 9), (StyleTag::NumberLiteral, 19, 1)]
    );
}

#[test]
fn comment_spanning_two_blocks() {
    let mut ranges = RangeSet::new();
    ranges.push(Range::new(StyleTag::Comment, 5, 10));
    let instructions = map_to_blocks(&ranges, [(0, 10), (10, 8)]);

    let spans: Vec<Vec<(isize, usize)>> = instructions
        .iter()
        .map(|i| i.ranges.iter().map(|r| (r.start, r.length)).collect())
        .collect();
    assert_eq!(spans, vec![vec![(5, 10)], vec![(-5, 10)]]);
}

#[test]
fn block_comment_reaches_every_line_it_covers() {
    let mut doc = Document::new(CONTRACT);
    CodeHighlighter::new().highlight(CONTRACT, &mut doc, &StyleTable::default(), true);

    let comment_lines: Vec<usize> = doc
        .blocks()
        .enumerate()
        .filter(|(_, b)| b.formats().iter().any(|f| f.tag == StyleTag::Comment))
        .map(|(i, _)| i)
        .collect();
    // Lines 5 and 6 hold the block comment, line 14 the trailing one
    assert_eq!(comment_lines, vec![4, 5, 13]);

    let second = doc.block(5).unwrap();
    assert!(second.formats()[0].start < 0);
}

#[test]
fn imports_are_highlighted_per_line() {
    let mut doc = Document::new(CONTRACT);
    CodeHighlighter::new().highlight(CONTRACT, &mut doc, &StyleTable::default(), true);

    for line in [1, 2] {
        let block = doc.block(line).unwrap();
        let import = block
            .formats()
            .iter()
            .find(|f| f.tag == StyleTag::Import)
            .expect("import format");
        assert_eq!(import.start, 0);
        assert_eq!(import.length, block.text().len());
    }
    assert!(doc.block(0).unwrap().formats().iter().all(|f| f.tag != StyleTag::Import));
}

#[test]
fn semantic_pass_can_be_disabled() {
    let mut doc = Document::new(CONTRACT);
    CodeHighlighter::new().highlight(CONTRACT, &mut doc, &StyleTable::default(), false);
    assert!(doc
        .blocks()
        .flat_map(|b| b.formats())
        .all(|f| f.tag != StyleTag::Import));
}

#[test]
fn every_block_is_flushed_and_marked_dirty() {
    let mut doc = Document::new(CONTRACT);
    let visited = apply_to_blocks(&RangeSet::new(), &mut doc, &StyleTable::default());
    assert_eq!(visited, doc.block_count());

    let dirty = doc.take_dirty_spans();
    let expected: Vec<_> = doc.blocks().map(|b| (b.position(), b.length())).collect();
    assert_eq!(dirty, expected);
}

#[test]
fn rehighlight_after_edit_replaces_stale_formats() {
    let mut doc = Document::new("uint a;\nuint b;");
    let mut highlighter = CodeHighlighter::new();
    let source = doc.text().to_string();
    highlighter.highlight(&source, &mut doc, &StyleTable::default(), true);
    assert_eq!(doc.block(1).unwrap().formats().len(), 1);

    doc.set_text("x;\n// note\ny;");
    let source = doc.text().to_string();
    highlighter.highlight(&source, &mut doc, &StyleTable::default(), true);

    assert!(doc.block(0).unwrap().formats().is_empty());
    assert_eq!(doc.block(1).unwrap().formats()[0].tag, StyleTag::Comment);
    assert!(doc.block(2).unwrap().formats().is_empty());
}

#[test]
fn render_plain_round_trips_text() {
    let mut doc = Document::new(CONTRACT);
    CodeHighlighter::new().highlight(CONTRACT, &mut doc, &StyleTable::default(), true);

    let mut out = Vec::new();
    let options = RenderOptions {
        color: false,
        tab_width: 4,
        ..Default::default()
    };
    render_document(&mut out, &doc, &StyleTable::default(), &options).unwrap();
    let rendered = String::from_utf8(out).unwrap();
    assert_eq!(rendered, CONTRACT);
}

#[test]
fn imports_survive_constructors_and_free_definitions() {
    let source = "import \"a.sol\";\nenum E { A }\ncontract C {\n    constructor() public {}\n}\n";
    let mut doc = Document::new(source);
    CodeHighlighter::new().highlight(source, &mut doc, &StyleTable::default(), true);

    let import = doc.block(0).unwrap();
    assert!(import
        .formats()
        .iter()
        .any(|f| f.tag == StyleTag::Import && f.start == 0 && f.length == import.text().len()));
}
