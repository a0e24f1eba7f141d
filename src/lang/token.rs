//! Token kinds and source locations
//!
//! The declaration order of `TokenKind` is significant: every reserved
//! word, including the elementary type names, lives in the contiguous
//! stretch `Break..TypesEnd`. `In` and `Delete` are operators and the
//! literal keywords (`null`, `true`, `false`) are literals, so they sit
//! outside that stretch.

use std::fmt;

/// Half-open byte interval `[start, end)` into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Byte offset of the first byte (inclusive)
    pub start: usize,
    /// Byte offset one past the last byte (exclusive)
    pub end: usize,
}

impl Location {
    /// Create a new location
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes (zero for inverted locations)
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the location covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Slice the source text covered by this location
    ///
    /// Returns an empty string when the location is out of bounds or not on
    /// a char boundary.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Lexical token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// End of stream
    Eos,

    // Punctuators
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Period,
    Conditional,
    Arrow,

    // Assignment operators
    Assign,
    AssignBitOr,
    AssignBitXor,
    AssignBitAnd,
    AssignShl,
    AssignSar,
    AssignAdd,
    AssignSub,
    AssignMul,
    AssignDiv,
    AssignMod,

    // Binary operators
    Comma,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Sar,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,

    // Comparison operators
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    In,

    // Unary operators
    Not,
    BitNot,
    Inc,
    Dec,
    Delete,

    // Keywords
    Break,
    Anonymous,
    As,
    Case,
    Constant,
    Continue,
    Contract,
    Default,
    Do,
    Else,
    Emit,
    Enum,
    Event,
    External,
    For,
    Function,
    If,
    Import,
    Indexed,
    Interface,
    Internal,
    Is,
    Library,
    Mapping,
    Memory,
    Modifier,
    New,
    Payable,
    Pragma,
    Private,
    Public,
    Pure,
    Return,
    Returns,
    Storage,
    Struct,
    Switch,
    Using,
    Var,
    View,
    While,

    // Elementary type names
    Address,
    Bool,
    Byte,
    Bytes,
    BytesM,
    Hash,
    Int,
    IntM,
    Real,
    String,
    Uint,
    UintM,
    UReal,
    TypesEnd,

    // Literals
    NullLiteral,
    TrueLiteral,
    FalseLiteral,
    Number,
    StringLiteral,
    CommentLiteral,

    // Identifiers
    Identifier,

    /// Unrecognised input, unterminated strings and comments
    Illegal,
}

impl TokenKind {
    /// Check if this kind lies in the contiguous keyword stretch
    pub fn is_reserved_word(self) -> bool {
        (TokenKind::Break..TokenKind::TypesEnd).contains(&self)
    }

    /// Check if this kind names an elementary type
    pub fn is_elementary_type(self) -> bool {
        (TokenKind::Address..TokenKind::TypesEnd).contains(&self)
    }

    /// Resolve an identifier-shaped word to its keyword kind
    ///
    /// Returns `Identifier` for anything that is not reserved.
    pub fn from_word(word: &str) -> TokenKind {
        match word {
            "anonymous" => TokenKind::Anonymous,
            "as" => TokenKind::As,
            "break" => TokenKind::Break,
            "case" => TokenKind::Case,
            "constant" => TokenKind::Constant,
            "continue" => TokenKind::Continue,
            "contract" => TokenKind::Contract,
            "default" => TokenKind::Default,
            "delete" => TokenKind::Delete,
            "do" => TokenKind::Do,
            "else" => TokenKind::Else,
            "emit" => TokenKind::Emit,
            "enum" => TokenKind::Enum,
            "event" => TokenKind::Event,
            "external" => TokenKind::External,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "import" => TokenKind::Import,
            "in" => TokenKind::In,
            "indexed" => TokenKind::Indexed,
            "interface" => TokenKind::Interface,
            "internal" => TokenKind::Internal,
            "is" => TokenKind::Is,
            "library" => TokenKind::Library,
            "mapping" => TokenKind::Mapping,
            "memory" => TokenKind::Memory,
            "modifier" => TokenKind::Modifier,
            "new" => TokenKind::New,
            "payable" => TokenKind::Payable,
            "pragma" => TokenKind::Pragma,
            "private" => TokenKind::Private,
            "public" => TokenKind::Public,
            "pure" => TokenKind::Pure,
            "return" => TokenKind::Return,
            "returns" => TokenKind::Returns,
            "storage" => TokenKind::Storage,
            "struct" => TokenKind::Struct,
            "switch" => TokenKind::Switch,
            "using" => TokenKind::Using,
            "var" => TokenKind::Var,
            "view" => TokenKind::View,
            "while" => TokenKind::While,
            "address" => TokenKind::Address,
            "bool" => TokenKind::Bool,
            "byte" => TokenKind::Byte,
            "bytes" => TokenKind::Bytes,
            "hash" => TokenKind::Hash,
            "int" => TokenKind::Int,
            "real" => TokenKind::Real,
            "string" => TokenKind::String,
            "uint" => TokenKind::Uint,
            "ureal" => TokenKind::UReal,
            "null" => TokenKind::NullLiteral,
            "true" => TokenKind::TrueLiteral,
            "false" => TokenKind::FalseLiteral,
            _ => sized_type(word).unwrap_or(TokenKind::Identifier),
        }
    }
}

/// Recognise `intN`, `uintN` (N = 8..=256, multiple of 8) and
/// `bytesN` (N = 1..=32)
fn sized_type(word: &str) -> Option<TokenKind> {
    let parse_suffix = |prefix: &str| -> Option<u16> {
        let digits = word.strip_prefix(prefix)?;
        if digits.is_empty() || digits.starts_with('0') {
            return None;
        }
        digits.parse().ok()
    };

    if let Some(bits) = parse_suffix("uint") {
        return (bits % 8 == 0 && bits <= 256).then_some(TokenKind::UintM);
    }
    if let Some(bits) = parse_suffix("int") {
        return (bits % 8 == 0 && bits <= 256).then_some(TokenKind::IntM);
    }
    if let Some(size) = parse_suffix("bytes") {
        return (1..=32).contains(&size).then_some(TokenKind::BytesM);
    }
    None
}
