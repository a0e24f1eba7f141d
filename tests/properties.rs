use proptest::prelude::*;

use solhl::lang::SourceScanner;
use solhl::syntax::{
    classify, compute_lexical_ranges, map_to_blocks, Range, RangeSet, Scanner, StyleTag,
};

fn tag() -> impl Strategy<Value = StyleTag> {
    prop::sample::select(StyleTag::ALL.to_vec())
}

fn ranges() -> impl Strategy<Value = Vec<Range>> {
    prop::collection::vec(
        (tag(), 0usize..200, 0usize..40).prop_map(|(tag, start, length)| Range::new(tag, start, length)),
        0..30,
    )
}

/// Contiguous blocks starting at `first`
fn blocks() -> impl Strategy<Value = Vec<(usize, usize)>> {
    (0usize..20, prop::collection::vec(0usize..30, 0..12)).prop_map(|(first, lengths)| {
        let mut position = first;
        lengths
            .into_iter()
            .map(|length| {
                let block = (position, length);
                position += length;
                block
            })
            .collect()
    })
}

fn intersects(range: &Range, (position, length): (usize, usize)) -> bool {
    range.start.max(position) < range.end().min(position + length)
}

proptest! {
    #[test]
    fn sort_is_stable_and_ordered(input in ranges()) {
        let mut set: RangeSet = input.iter().copied().collect();
        set.sort();
        let sorted = set.as_slice();

        prop_assert!(sorted.windows(2).all(|w| w[0].start <= w[1].start));
        let mut expected = input.clone();
        expected.sort_by_key(|r| r.start);
        prop_assert_eq!(sorted, expected.as_slice());
    }

    #[test]
    fn every_block_visited_once(input in ranges(), layout in blocks()) {
        let mut set: RangeSet = input.into_iter().collect();
        set.sort();
        let instructions = map_to_blocks(&set, layout.clone());

        prop_assert_eq!(instructions.len(), layout.len());
        for (i, instruction) in instructions.iter().enumerate() {
            prop_assert_eq!(instruction.block_index, i);
        }
    }

    #[test]
    fn ranges_reach_exactly_the_blocks_they_overlap(input in ranges(), layout in blocks()) {
        let mut set: RangeSet = input.into_iter().collect();
        set.sort();
        let instructions = map_to_blocks(&set, layout.clone());

        for (instruction, &(position, length)) in instructions.iter().zip(&layout) {
            let expected: Vec<_> = set
                .iter()
                .filter(|r| intersects(r, (position, length)))
                .map(|r| (r.tag, r.start as isize - position as isize, r.length))
                .collect();
            let actual: Vec<_> = instruction
                .ranges
                .iter()
                .map(|p| (p.tag, p.start, p.length))
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn lexical_ranges_follow_classifier(source in "[a-z0-9 ;=\"/*\n]{0,80}") {
        let ranges = compute_lexical_ranges(&mut SourceScanner::new(&source));
        for range in &ranges {
            prop_assert!(range.end() <= source.len());
            let text = &source[range.start..range.end()];
            let rescanned = SourceScanner::new(text);
            prop_assert_eq!(classify(rescanned.current_token()), Some(range.tag));
        }
    }
}
