//! Markdown format implementation
//!
//! This module implements bidirectional conversion between document trees and
//! CommonMark Markdown (with the GFM table and strikethrough extensions).
//!
//! # Library Choice
//!
//! We use the `comrak` crate for tokenizing Markdown. The tokenizer sits behind
//! the [`lexer::Tokenizer`] trait, so the parser only deals in block and inline
//! tokens. Serialization is a direct string walk over the tree.
//!
//! # Element Mapping Table
//!
//! | ADF Node         | Markdown Equivalent          | Export Notes                         | Import Notes                        |
//! |------------------|------------------------------|--------------------------------------|-------------------------------------|
//! | paragraph        | Paragraph                    | Direct mapping                       | Direct mapping                      |
//! | heading          | `#`..`######`                | Level clamped to 1-6                 | Direct mapping                      |
//! | bulletList       | `- item`                     | Indent per nesting level             | Direct mapping                      |
//! | orderedList      | `1. item`                    | Renumbered from 1                    | Start number dropped                |
//! | codeBlock        | Fenced code block            | Language glued to the fence          | First word of the info string       |
//! | blockquote       | `> quote`                    | Every line prefixed                  | Direct mapping                      |
//! | rule             | `---`                        | Direct mapping                       | Direct mapping                      |
//! | table            | GFM table                    | Rows padded, separator after headers | Header row → `tableHeader` cells    |
//! | panel            | `> **TYPE:** body`           | Lossy                                | Imports as a blockquote             |
//! | expand           | `<details><summary>`         | Raw HTML passthrough                 | Dropped (raw HTML block)            |
//! | media            | Placeholder text             | Lossy                                | Not produced                        |
//! | mention / emoji  | Display text                 | Lossy                                | Not produced                        |
//! | inlineCard       | `[url](url)`                 | Lossy                                | Imports as a link mark              |
//! | Marks:           |                              |                                      |                                     |
//! |   strong / em    | `**x**` / `*x*`              | Edge whitespace moved outside        | Appended to every nested run        |
//! |   strike         | `~~x~~`                      | Direct                               | Direct                              |
//! |   code           | `` `x` ``                    | Always innermost                     | Never inherits other marks          |
//! |   link           | `[x](href)`                  | Always outermost                     | Appended to every nested run        |
//! |   underline      | `<u>x</u>`                   | Raw HTML                             | Not produced                        |
//! |   subsup         | `<sup>x</sup>`/`<sub>x</sub>`| Raw HTML                             | `^x^` → sup                         |
//! |   colours        | Plain text                   | Lossy                                | Not produced                        |
//!
//! # Lossy Conversions
//!
//! Anything without a Markdown equivalent degrades on export and does not come
//! back on import: panels, expands, media, mentions, emoji, inline cards,
//! underline and colour marks.

pub mod lexer;
pub mod parser;
pub mod serializer;

pub use serializer::{MarkdownOptions, DEFAULT_MEDIA_PLACEHOLDER};

use crate::adf::Node;
use crate::error::ConvertError;
use crate::format::Format;
use std::collections::HashMap;

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    fn options_with(
        &self,
        extra: &HashMap<String, String>,
    ) -> Result<MarkdownOptions, ConvertError> {
        let mut options = self.options.clone();
        for (key, value) in extra {
            match key.as_str() {
                "indent-width" => {
                    options.indent_width = value.parse().map_err(|_| {
                        ConvertError::InvalidInput(format!(
                            "Option '{key}' expects a number, got '{value}'"
                        ))
                    })?;
                }
                "media-placeholder" => options.media_placeholder = value.clone(),
                other => {
                    return Err(ConvertError::NotSupported(format!(
                        "Format 'markdown' does not support option '{other}'"
                    )))
                }
            }
        }
        Ok(options)
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, ConvertError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        serializer::serialize_to_markdown_with_options(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let options = self.options_with(options)?;
        serializer::serialize_to_markdown_with_options(doc, &options)
    }
}
