//! Style types for highlighted text
//!
//! A `Style` is the opaque visual descriptor the highlighter hands to the
//! renderer. The core never looks inside one; it only carries the
//! `StyleTag -> Style` lookup through `StyleTable`.

use std::collections::HashMap;

use crate::error::{HighlightError, Result};

use super::tokens::StyleTag;

/// Terminal colors (ANSI 16-color palette plus 24-bit RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a config value
    ///
    /// Accepts palette names (`red`, `bright-blue`, `bright_blue`) and
    /// `#rrggbb` hex triplets.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| HighlightError::InvalidColor(value.to_string()));
        }

        let color = match value.to_lowercase().replace('_', "-").as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return Err(HighlightError::InvalidColor(value.to_string())),
        };
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Parse a style description such as `"#93a1a1 on black bold"`
    ///
    /// The first word is the foreground color, `on <color>` sets the
    /// background, and `bold`, `italic`, `underline` toggle attributes.
    pub fn parse(description: &str) -> Result<Self> {
        let mut style = Style::default();
        let mut words = description.split_whitespace();
        let mut seen_fg = false;

        while let Some(word) = words.next() {
            match word.to_lowercase().as_str() {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "on" => {
                    let bg = words.next().ok_or_else(|| {
                        HighlightError::InvalidColor(format!("missing background in '{description}'"))
                    })?;
                    style.bg = Color::parse(bg)?;
                }
                _ if !seen_fg => {
                    style.fg = Color::parse(word)?;
                    seen_fg = true;
                }
                _ => return Err(HighlightError::InvalidColor(word.to_string())),
            }
        }

        Ok(style)
    }
}

/// Mapping from highlight category to visual style
///
/// Passed explicitly into the block mapper and the renderer so that several
/// themes can coexist (tests, split views) without any global state.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    /// Base style for unhighlighted text
    pub base: Style,
    styles: HashMap<StyleTag, Style>,
}

impl StyleTable {
    /// Create a table where every tag has no styling
    pub fn plain() -> Self {
        Self {
            base: Style::default(),
            styles: HashMap::new(),
        }
    }

    /// Look up the style for a tag
    pub fn get(&self, tag: StyleTag) -> Style {
        self.styles.get(&tag).copied().unwrap_or_default()
    }

    /// Override the style for a tag
    pub fn set(&mut self, tag: StyleTag, style: Style) {
        self.styles.insert(tag, style);
    }

    /// Apply `name -> description` overrides on top of this table
    ///
    /// Names are style tag names (`"Keyword"`, `"Import"`, ...), plus the
    /// special names `"Base"` for the unhighlighted text style.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, description) in overrides {
            let style = Style::parse(description)?;
            if name.eq_ignore_ascii_case("base") {
                self.base = style;
                continue;
            }
            let tag = StyleTag::from_name(name)
                .ok_or_else(|| HighlightError::UnknownStyleTag(name.to_string()))?;
            self.set(tag, style);
        }
        Ok(self)
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let mut table = Self {
            base: Style::fg(Color::Rgb(0xee, 0xe8, 0xd5)).with_bg(Color::Rgb(0x00, 0x2b, 0x36)),
            styles: HashMap::new(),
        };
        for tag in StyleTag::ALL {
            table.set(tag, tag.default_style());
        }
        table
    }
}
