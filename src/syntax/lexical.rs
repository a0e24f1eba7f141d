//! Token classification and the lexical highlighting pass

use crate::lang::{Location, TokenKind};

use super::range::{Range, RangeSet};
use super::tokens::StyleTag;

/// Token source consumed by the lexical pass
///
/// The scanner is positioned on a current token at all times. The stream
/// ends with `TokenKind::Eos`.
pub trait Scanner {
    /// Kind of the current token
    fn current_token(&self) -> TokenKind;
    /// Source location of the current token
    fn current_location(&self) -> Location;
    /// Move to the next token and return its kind
    fn advance(&mut self) -> TokenKind;
}

/// Map a token kind to its highlight category, if it has one
pub fn classify(kind: TokenKind) -> Option<StyleTag> {
    match kind {
        k if k.is_reserved_word() => Some(StyleTag::Keyword),
        TokenKind::In
        | TokenKind::Delete
        | TokenKind::NullLiteral
        | TokenKind::TrueLiteral
        | TokenKind::FalseLiteral => Some(StyleTag::Keyword),
        TokenKind::StringLiteral => Some(StyleTag::StringLiteral),
        TokenKind::CommentLiteral => Some(StyleTag::Comment),
        TokenKind::Number => Some(StyleTag::NumberLiteral),
        _ => None,
    }
}

/// Run the scanner to the end of its stream, collecting one range per
/// classified token
///
/// The result is sorted by start offset.
pub fn compute_lexical_ranges<S: Scanner + ?Sized>(scanner: &mut S) -> RangeSet {
    let mut ranges = RangeSet::new();
    let mut token = scanner.current_token();
    while token != TokenKind::Eos {
        if let Some(tag) = classify(token) {
            ranges.push(Range::from_location(tag, scanner.current_location()));
        }
        token = scanner.advance();
    }
    ranges.sort();
    log::debug!("lexical pass produced {} ranges", ranges.len());
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::SourceScanner;

    /// Replays a fixed token list, ignoring source text entirely
    struct ScriptedScanner {
        tokens: Vec<(TokenKind, Location)>,
        index: usize,
    }

    impl ScriptedScanner {
        fn new(tokens: Vec<(TokenKind, Location)>) -> Self {
            Self { tokens, index: 0 }
        }
    }

    impl Scanner for ScriptedScanner {
        fn current_token(&self) -> TokenKind {
            self.tokens.get(self.index).map_or(TokenKind::Eos, |t| t.0)
        }

        fn current_location(&self) -> Location {
            self.tokens.get(self.index).map_or_else(Location::default, |t| t.1)
        }

        fn advance(&mut self) -> TokenKind {
            self.index += 1;
            self.current_token()
        }
    }

    #[test]
    fn test_classify_rules() {
        assert_eq!(classify(TokenKind::Break), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::Contract), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::UintM), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::In), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::Delete), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::NullLiteral), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::TrueLiteral), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::FalseLiteral), Some(StyleTag::Keyword));
        assert_eq!(classify(TokenKind::StringLiteral), Some(StyleTag::StringLiteral));
        assert_eq!(classify(TokenKind::CommentLiteral), Some(StyleTag::Comment));
        assert_eq!(classify(TokenKind::Number), Some(StyleTag::NumberLiteral));
    }

    #[test]
    fn test_classify_unstyled() {
        for kind in [
            TokenKind::Eos,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Assign,
            TokenKind::Not,
            TokenKind::TypesEnd,
            TokenKind::Illegal,
        ] {
            assert_eq!(classify(kind), None, "{kind:?} should not be styled");
        }
    }

    #[test]
    fn test_lexical_ranges_from_source() {
        let source = "uint a = 1; // done\nstring s = \"x\";";
        let ranges = compute_lexical_ranges(&mut SourceScanner::new(source));
        let found: Vec<_> = ranges.iter().map(|r| (r.tag, &source[r.start..r.end()])).collect();
        assert_eq!(
            found,
            vec![
                (StyleTag::Keyword, "uint"),
                (StyleTag::NumberLiteral, "1"),
                (StyleTag::Comment, "// done"),
                (StyleTag::Keyword, "string"),
                (StyleTag::StringLiteral, "\"x\""),
            ]
        );
    }

    #[test]
    fn test_lexical_ranges_are_sorted() {
        // Scanner reports tokens out of order; the pass must still sort them
        let mut scanner = ScriptedScanner::new(vec![
            (TokenKind::Number, Location::new(20, 21)),
            (TokenKind::Identifier, Location::new(15, 16)),
            (TokenKind::Return, Location::new(5, 11)),
        ]);
        let ranges = compute_lexical_ranges(&mut scanner);
        assert_eq!(
            ranges.as_slice(),
            &[
                Range::new(StyleTag::Keyword, 5, 6),
                Range::new(StyleTag::NumberLiteral, 20, 1),
            ]
        );
    }

    #[test]
    fn test_empty_stream() {
        let ranges = compute_lexical_ranges(&mut ScriptedScanner::new(Vec::new()));
        assert!(ranges.is_empty());
    }

    #[test]
    fn test_inverted_location_has_zero_length() {
        let mut scanner = ScriptedScanner::new(vec![(TokenKind::Number, Location::new(9, 4))]);
        let ranges = compute_lexical_ranges(&mut scanner);
        assert_eq!(ranges.as_slice(), &[Range::new(StyleTag::NumberLiteral, 9, 0)]);
    }
}
