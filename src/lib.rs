//! solhl - lexical and semantic syntax highlighting for contract sources
//!
//! Ranges come from two passes over the same source: a token scan and a
//! syntax tree walk. They are merged into one ordered set and mapped onto
//! the line blocks of a document, which the renderer then paints.

pub mod config;
pub mod document;
pub mod error;
pub mod highlighter;
pub mod lang;
pub mod render;
pub mod syntax;

pub use config::Config;
pub use document::{Document, LineBlock};
pub use error::{HighlightError, Result};
pub use highlighter::CodeHighlighter;
pub use render::{render_document, RenderOptions};
