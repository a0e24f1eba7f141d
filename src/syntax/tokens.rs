//! Highlight categories
//!
//! This module defines the categories a source range can be tagged with
//! and their default visual styles.

use super::style::{Color, Style};

/// Highlight category assigned to a range of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Reserved words, elementary type names and literal keywords
    Keyword,
    /// Line and block comments
    Comment,
    /// Quoted string literals
    StringLiteral,
    /// Decimal and hex number literals
    NumberLiteral,
    /// Whole import directives (from the semantic pass)
    Import,
}

impl StyleTag {
    /// Every tag, in declaration order
    pub const ALL: [StyleTag; 5] = [
        StyleTag::Keyword,
        StyleTag::Comment,
        StyleTag::StringLiteral,
        StyleTag::NumberLiteral,
        StyleTag::Import,
    ];

    /// Get the default style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            StyleTag::Keyword => Style::fg(Color::Rgb(0x93, 0xa1, 0xa1)).with_bold(),
            StyleTag::Comment => Style::fg(Color::Rgb(0x85, 0x99, 0x00)).with_italic(),
            StyleTag::StringLiteral => Style::fg(Color::Rgb(0xdc, 0x32, 0x2f)),
            StyleTag::NumberLiteral => Style::fg(Color::Rgb(0xee, 0xe8, 0xd5)),
            StyleTag::Import => Style::fg(Color::Rgb(0x6c, 0x71, 0xc4)),
        }
    }

    /// Get a human-readable name for this tag
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Keyword => "Keyword",
            StyleTag::Comment => "Comment",
            StyleTag::StringLiteral => "StringLiteral",
            StyleTag::NumberLiteral => "NumberLiteral",
            StyleTag::Import => "Import",
        }
    }

    /// Parse a tag from its name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Keyword" => Some(StyleTag::Keyword),
            "Comment" => Some(StyleTag::Comment),
            "StringLiteral" => Some(StyleTag::StringLiteral),
            "NumberLiteral" => Some(StyleTag::NumberLiteral),
            "Import" => Some(StyleTag::Import),
            _ => None,
        }
    }
}
