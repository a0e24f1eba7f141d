//! Byte-oriented scanner for contract sources
//!
//! The scanner always holds one current token. `advance` moves to the next
//! one; once the end of input is reached it keeps reporting `Eos`.

use crate::syntax::Scanner;

use super::token::{Location, TokenKind};

/// Scanner over an in-memory source string
#[derive(Clone)]
pub struct SourceScanner<'a> {
    source: &'a str,
    /// Position of the next unread byte
    pos: usize,
    current: TokenKind,
    location: Location,
    /// Whether comments are dropped instead of reported as `CommentLiteral`
    skip_comments: bool,
}

impl<'a> SourceScanner<'a> {
    /// Create a scanner positioned on the first token, reporting comments
    pub fn new(source: &'a str) -> Self {
        Self::with_comments(source, true)
    }

    /// Create a scanner positioned on the first token, dropping comments
    pub fn skipping_comments(source: &'a str) -> Self {
        Self::with_comments(source, false)
    }

    fn with_comments(source: &'a str, report_comments: bool) -> Self {
        let mut scanner = Self {
            source,
            pos: 0,
            current: TokenKind::Eos,
            location: Location::default(),
            skip_comments: !report_comments,
        };
        scanner.scan();
        scanner
    }

    /// The source text being scanned
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Text of the current token
    pub fn current_text(&self) -> &'a str {
        self.location.slice(self.source)
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Scan the next token into `current`/`location`
    fn scan(&mut self) {
        loop {
            self.skip_whitespace();
            let start = self.pos;
            let kind = self.scan_token();
            if kind == TokenKind::CommentLiteral && self.skip_comments {
                continue;
            }
            self.current = kind;
            self.location = Location::new(start, self.pos);
            return;
        }
    }

    fn scan_token(&mut self) -> TokenKind {
        let Some(b) = self.peek() else {
            return TokenKind::Eos;
        };

        match b {
            b'"' | b'\'' => self.scan_string(b),
            b'0'..=b'9' => self.scan_number(),
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            b'/' if self.peek_at(1) == Some(b'/') => self.scan_line_comment(),
            b'/' if self.peek_at(1) == Some(b'*') => self.scan_block_comment(),
            b if is_identifier_start(b) => self.scan_word(),
            _ => self.scan_operator(),
        }
    }

    fn scan_string(&mut self, quote: u8) -> TokenKind {
        self.pos += 1;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => {
                    self.pos += 1;
                    // The escaped byte may not be the end of the string
                    if self.peek().is_some_and(|c| c != b'\n') {
                        self.advance_char();
                    }
                }
                b'\n' => return TokenKind::Illegal,
                _ if b == quote => {
                    self.pos += 1;
                    return TokenKind::StringLiteral;
                }
                _ => self.advance_char(),
            }
        }
        TokenKind::Illegal
    }

    fn scan_number(&mut self) -> TokenKind {
        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            self.eat_while(|b| b.is_ascii_hexdigit());
            return if self.pos == digits_start {
                TokenKind::Illegal
            } else {
                TokenKind::Number
            };
        }

        self.eat_while(|b| b.is_ascii_digit());
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.eat_while(|b| b.is_ascii_digit());
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.eat_while(|b| b.is_ascii_digit());
            }
        }
        TokenKind::Number
    }

    fn scan_line_comment(&mut self) -> TokenKind {
        self.eat_while(|b| b != b'\n');
        TokenKind::CommentLiteral
    }

    fn scan_block_comment(&mut self) -> TokenKind {
        self.pos += 2;
        match self.source[self.pos..].find("*/") {
            Some(offset) => {
                self.pos += offset + 2;
                TokenKind::CommentLiteral
            }
            None => {
                self.pos = self.source.len();
                TokenKind::Illegal
            }
        }
    }

    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_while(is_identifier_part);
        TokenKind::from_word(&self.source[start..self.pos])
    }

    fn scan_operator(&mut self) -> TokenKind {
        let rest = &self.source.as_bytes()[self.pos..];
        let (kind, len) = match rest {
            [b'>', b'>', b'=', ..] => (TokenKind::AssignSar, 3),
            [b'<', b'<', b'=', ..] => (TokenKind::AssignShl, 3),
            [b'=', b'>', ..] => (TokenKind::Arrow, 2),
            [b'=', b'=', ..] => (TokenKind::Equal, 2),
            [b'!', b'=', ..] => (TokenKind::NotEqual, 2),
            [b'<', b'=', ..] => (TokenKind::LessThanOrEqual, 2),
            [b'>', b'=', ..] => (TokenKind::GreaterThanOrEqual, 2),
            [b'<', b'<', ..] => (TokenKind::Shl, 2),
            [b'>', b'>', ..] => (TokenKind::Sar, 2),
            [b'|', b'|', ..] => (TokenKind::Or, 2),
            [b'&', b'&', ..] => (TokenKind::And, 2),
            [b'*', b'*', ..] => (TokenKind::Exp, 2),
            [b'+', b'+', ..] => (TokenKind::Inc, 2),
            [b'-', b'-', ..] => (TokenKind::Dec, 2),
            [b'|', b'=', ..] => (TokenKind::AssignBitOr, 2),
            [b'^', b'=', ..] => (TokenKind::AssignBitXor, 2),
            [b'&', b'=', ..] => (TokenKind::AssignBitAnd, 2),
            [b'+', b'=', ..] => (TokenKind::AssignAdd, 2),
            [b'-', b'=', ..] => (TokenKind::AssignSub, 2),
            [b'*', b'=', ..] => (TokenKind::AssignMul, 2),
            [b'/', b'=', ..] => (TokenKind::AssignDiv, 2),
            [b'%', b'=', ..] => (TokenKind::AssignMod, 2),
            [b'(', ..] => (TokenKind::LParen, 1),
            [b')', ..] => (TokenKind::RParen, 1),
            [b'[', ..] => (TokenKind::LBrack, 1),
            [b']', ..] => (TokenKind::RBrack, 1),
            [b'{', ..] => (TokenKind::LBrace, 1),
            [b'}', ..] => (TokenKind::RBrace, 1),
            [b':', ..] => (TokenKind::Colon, 1),
            [b';', ..] => (TokenKind::Semicolon, 1),
            [b'.', ..] => (TokenKind::Period, 1),
            [b'?', ..] => (TokenKind::Conditional, 1),
            [b'=', ..] => (TokenKind::Assign, 1),
            [b',', ..] => (TokenKind::Comma, 1),
            [b'|', ..] => (TokenKind::BitOr, 1),
            [b'^', ..] => (TokenKind::BitXor, 1),
            [b'&', ..] => (TokenKind::BitAnd, 1),
            [b'+', ..] => (TokenKind::Add, 1),
            [b'-', ..] => (TokenKind::Sub, 1),
            [b'*', ..] => (TokenKind::Mul, 1),
            [b'/', ..] => (TokenKind::Div, 1),
            [b'%', ..] => (TokenKind::Mod, 1),
            [b'<', ..] => (TokenKind::LessThan, 1),
            [b'>', ..] => (TokenKind::GreaterThan, 1),
            [b'!', ..] => (TokenKind::Not, 1),
            [b'~', ..] => (TokenKind::BitNot, 1),
            _ => {
                self.advance_char();
                return TokenKind::Illegal;
            }
        };
        self.pos += len;
        kind
    }

    /// Step over one UTF-8 encoded char
    fn advance_char(&mut self) {
        let width = self.source[self.pos..].chars().next().map_or(1, char::len_utf8);
        self.pos += width;
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }
}

impl Scanner for SourceScanner<'_> {
    fn current_token(&self) -> TokenKind {
        self.current
    }

    fn current_location(&self) -> Location {
        self.location
    }

    fn advance(&mut self) -> TokenKind {
        if self.current != TokenKind::Eos {
            self.scan();
        }
        self.current
    }
}

fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_identifier_part(b: u8) -> bool {
    is_identifier_start(b) || b.is_ascii_digit()
}
