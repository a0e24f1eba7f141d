//! Terminal rendering of highlighted documents
//!
//! Writes each block's text with its attached formats applied. Formats
//! carry unclipped lengths and may start before the block, so they are
//! clipped to the line here.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    self as term, Attribute, ContentStyle, Print, PrintStyledContent, StyledContent,
};
use unicode_width::UnicodeWidthChar;

use crate::document::Document;
use crate::error::Result;
use crate::syntax::{Color, FormatRange, Style, StyleTable};

/// Rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix every line with its number
    pub show_line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Truncate lines to this many columns
    pub max_cols: Option<usize>,
    /// Emit terminal color sequences
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            tab_width: 8,
            max_cols: None,
            color: true,
        }
    }
}

/// Render every block of `doc` to `out`
///
/// Blocks are separated by newlines. The empty block after a trailing
/// newline is not a line of its own; the output ends with a newline instead.
pub fn render_document<W: Write>(
    out: &mut W,
    doc: &Document,
    table: &StyleTable,
    options: &RenderOptions,
) -> Result<()> {
    let mut lines: Vec<_> = doc.blocks().collect();
    let trailing_newline = lines.len() > 1 && lines.last().is_some_and(|b| b.text().is_empty());
    if trailing_newline {
        lines.pop();
    }
    let number_width = lines.len().to_string().len();

    for (idx, block) in lines.into_iter().enumerate() {
        if idx > 0 {
            queue!(out, Print('\n'))?;
        }
        if options.show_line_numbers {
            let number = format!("{:>number_width$} ", idx + 1);
            if options.color {
                let mut dim = ContentStyle::new();
                dim.attributes.set(Attribute::Dim);
                queue!(out, PrintStyledContent(StyledContent::new(dim, number)))?;
            } else {
                queue!(out, Print(number))?;
            }
        }
        render_line(out, block.text(), block.formats(), table, options)?;
    }
    if trailing_newline {
        queue!(out, Print('\n'))?;
    }

    out.flush()?;
    Ok(())
}

/// Render one line with its formats, without the trailing newline
fn render_line<W: Write>(
    out: &mut W,
    text: &str,
    formats: &[FormatRange],
    table: &StyleTable,
    options: &RenderOptions,
) -> Result<()> {
    let styles = byte_styles(text, formats);
    let max_cols = options.max_cols.unwrap_or(usize::MAX);
    let tab_width = options.tab_width.max(1);

    let mut col = 0;
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for (byte_idx, ch) in text.char_indices() {
        let (display, width) = if ch == '\t' {
            let spaces = tab_width - col % tab_width;
            (" ".repeat(spaces), spaces)
        } else {
            (ch.to_string(), UnicodeWidthChar::width(ch).unwrap_or(1))
        };
        if col + width > max_cols {
            break;
        }
        col += width;

        let style = styles[byte_idx];
        if style != run_style && !run.is_empty() {
            emit_run(out, &run, run_style, table, options)?;
            run.clear();
        }
        run_style = style;
        run.push_str(&display);
    }

    if !run.is_empty() {
        emit_run(out, &run, run_style, table, options)?;
    }
    Ok(())
}

/// Style of each byte of `text`; later formats paint over earlier ones
fn byte_styles(text: &str, formats: &[FormatRange]) -> Vec<Option<Style>> {
    let mut styles = vec![None; text.len()];
    let len = text.len() as isize;

    for format in formats {
        let start = format.start.clamp(0, len) as usize;
        let end = format.start.saturating_add(format.length as isize).clamp(0, len) as usize;
        for slot in &mut styles[start..end.max(start)] {
            *slot = Some(format.style);
        }
    }
    styles
}

fn emit_run<W: Write>(
    out: &mut W,
    run: &str,
    style: Option<Style>,
    table: &StyleTable,
    options: &RenderOptions,
) -> Result<()> {
    let effective = style.map_or(table.base, |s| over_base(s, table.base));
    if !options.color || effective.is_default() {
        queue!(out, Print(run))?;
    } else {
        queue!(out, PrintStyledContent(StyledContent::new(content_style(&effective), run)))?;
    }
    Ok(())
}

/// Fill unset colors of `style` from `base`
fn over_base(style: Style, base: Style) -> Style {
    Style {
        fg: if style.fg == Color::Default { base.fg } else { style.fg },
        bg: if style.bg == Color::Default { base.bg } else { style.bg },
        ..style
    }
}

fn content_style(style: &Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = terminal_color(style.fg);
    content.background_color = terminal_color(style.bg);
    if style.bold {
        content.attributes.set(Attribute::Bold);
    }
    if style.italic {
        content.attributes.set(Attribute::Italic);
    }
    if style.underline {
        content.attributes.set(Attribute::Underlined);
    }
    content
}

fn terminal_color(color: Color) -> Option<term::Color> {
    let color = match color {
        Color::Default => return None,
        Color::Black => term::Color::Black,
        Color::Red => term::Color::DarkRed,
        Color::Green => term::Color::DarkGreen,
        Color::Yellow => term::Color::DarkYellow,
        Color::Blue => term::Color::DarkBlue,
        Color::Magenta => term::Color::DarkMagenta,
        Color::Cyan => term::Color::DarkCyan,
        Color::White => term::Color::Grey,
        Color::BrightBlack => term::Color::DarkGrey,
        Color::BrightRed => term::Color::Red,
        Color::BrightGreen => term::Color::Green,
        Color::BrightYellow => term::Color::Yellow,
        Color::BrightBlue => term::Color::Blue,
        Color::BrightMagenta => term::Color::Magenta,
        Color::BrightCyan => term::Color::Cyan,
        Color::BrightWhite => term::Color::White,
        Color::Rgb(r, g, b) => term::Color::Rgb { r, g, b },
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighter::CodeHighlighter;
    use crate::syntax::StyleTag;

    fn render(doc: &Document, options: &RenderOptions) -> String {
        let mut out = Vec::new();
        render_document(&mut out, doc, &StyleTable::default(), options).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn plain() -> RenderOptions {
        RenderOptions {
            color: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_output_matches_text() {
        let doc = Document::new("uint a;\nb");
        assert_eq!(render(&doc, &plain()), "uint a;\nb");
    }

    #[test]
    fn test_trailing_newline_is_not_doubled() {
        assert_eq!(render(&Document::new("uint a;\n"), &plain()), "uint a;\n");
        assert_eq!(render(&Document::new("a\n\n"), &plain()), "a\n\n");
        assert_eq!(render(&Document::new(""), &plain()), "");

        let numbered = RenderOptions {
            show_line_numbers: true,
            ..plain()
        };
        assert_eq!(render(&Document::new("x\ny\n"), &numbered), "1 x\n2 y\n");
    }

    #[test]
    fn test_line_numbers_and_tabs() {
        let doc = Document::new("a\tb\nc");
        let options = RenderOptions {
            show_line_numbers: true,
            tab_width: 4,
            ..plain()
        };
        assert_eq!(render(&doc, &options), "1 a   b\n2 c");
    }

    #[test]
    fn test_truncation() {
        let doc = Document::new("abcdef\n日本語");
        let options = RenderOptions {
            max_cols: Some(3),
            ..plain()
        };
        assert_eq!(render(&doc, &options), "abc\n日");
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let source = "uint a = 1;\n";
        let mut doc = Document::new(source);
        CodeHighlighter::new().highlight(source, &mut doc, &StyleTable::default(), false);

        let output = render(&doc, &RenderOptions::default());
        assert!(output.contains("\x1b["));
        assert!(output.contains("uint"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_byte_styles_clip_unclipped_ranges() {
        let style = StyleTag::Comment.default_style();
        let formats = [FormatRange {
            tag: StyleTag::Comment,
            start: -5,
            length: 10,
            style,
        }];
        let styles = byte_styles("abcdefgh", &formats);
        assert_eq!(styles.iter().filter(|s| s.is_some()).count(), 5);
        assert!(styles[4].is_some());
        assert!(styles[5].is_none());

        let past_end = [FormatRange { start: 6, length: 100, ..formats[0] }];
        let styles = byte_styles("abcdefgh", &past_end);
        assert_eq!(styles.iter().filter(|s| s.is_some()).count(), 2);

        let beyond = [FormatRange { start: 20, length: 3, ..formats[0] }];
        assert!(byte_styles("abc", &beyond).iter().all(Option::is_none));
    }

    #[test]
    fn test_later_formats_win() {
        let keyword = StyleTag::Keyword.default_style();
        let import = StyleTag::Import.default_style();
        let formats = [
            FormatRange { tag: StyleTag::Keyword, start: 0, length: 6, style: keyword },
            FormatRange { tag: StyleTag::Import, start: 0, length: 9, style: import },
        ];
        let styles = byte_styles("import X;", &formats);
        assert!(styles.iter().all(|s| *s == Some(import)));
    }

    #[test]
    fn test_over_base() {
        let base = Style::fg(Color::White).with_bg(Color::Black);
        let merged = over_base(Style::fg(Color::Red).with_bold(), base);
        assert_eq!(merged, Style::fg(Color::Red).with_bg(Color::Black).with_bold());
    }
}
