//! HTML format implementation
//!
//! This module renders document trees to HTML5. Rendering is one-way: HTML is
//! a display target, not a source.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for building and
//! serializing the output: the renderer builds an `RcDom` element tree and
//! html5ever serializes it, so text and attribute escaping is never done by hand.
//!
//! # Element Mapping Table
//!
//! | ADF Node         | HTML Equivalent                                               |
//! |------------------|---------------------------------------------------------------|
//! | doc              | `<div class="adf-document">`                                  |
//! | paragraph        | `<p>`                                                         |
//! | heading          | `<h1>`..`<h6>` (level clamped to 1-6)                         |
//! | bulletList       | `<ul>` / `<li>`                                               |
//! | orderedList      | `<ol>` / `<li>`                                               |
//! | codeBlock        | `<pre class="adf-code-block"><code class="language-x">`       |
//! | blockquote       | `<blockquote>`                                                |
//! | rule / hardBreak | `<hr>` / `<br>`                                               |
//! | table            | `<table>`, `<thead>` when the first row has header cells      |
//! | panel            | `<div class="adf-panel adf-panel-{style}">` + title line      |
//! | expand           | `<details class="adf-expand" title="…">` + `<summary>`        |
//! | mediaSingle      | `<figure class="adf-media-single">`                           |
//! | media            | `<img>` when resolved, placeholder `<span>` otherwise         |
//! | mention          | `<span class="adf-mention">`                                  |
//! | emoji            | `<span class="adf-emoji" title="short name">`                 |
//! | inlineCard       | `<a class="adf-inline-card">` with shortened link text        |
//!
//! Marks become nested `strong`, `em`, `s`, `code`, `u`, `a`, `sup`/`sub`
//! elements; colour marks become a `<span style="…">`; unknown marks are ignored.
//!
//! # Output Format
//!
//! By default the output is the bare `<div class="adf-document">` fragment.
//! With `standalone` set, it is wrapped in a complete HTML5 document with the
//! embedded `css/baseline.css` stylesheet and any custom CSS appended.

mod serializer;

pub use serializer::{
    get_default_css, panel_style, render_to_html, render_to_html_default, HtmlOptions, MediaMap,
    RenderOutput, DEFAULT_INLINE_CARD_MAX_LENGTH, KNOWN_PANEL_TYPES,
};

use crate::adf::Node;
use crate::error::ConvertError;
use crate::format::Format;
use std::collections::HashMap;

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
    media: MediaMap,
}

impl HtmlFormat {
    /// Create a new HTML format with the given options
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            media: MediaMap::new(),
        }
    }

    /// Resolve media ids through `media` when rendering
    pub fn with_media(mut self, media: MediaMap) -> Self {
        self.media = media;
        self
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Apply string-keyed options on top of the configured ones
    pub fn options_with(
        &self,
        extra: &HashMap<String, String>,
    ) -> Result<HtmlOptions, ConvertError> {
        let mut options = self.options.clone();
        for (key, value) in extra {
            match key.as_str() {
                "standalone" => options.standalone = parse_flag(key, value)?,
                "title" => options.title = Some(value.clone()),
                "css" => options.custom_css = Some(value.clone()),
                "inline-card-max-length" => {
                    options.inline_card_max_length = value.parse().map_err(|_| {
                        ConvertError::InvalidInput(format!(
                            "Option '{key}' expects a number, got '{value}'"
                        ))
                    })?;
                }
                "media-placeholder" => options.media_placeholder = value.clone(),
                other => {
                    return Err(ConvertError::NotSupported(format!(
                        "Format 'html' does not support option '{other}'"
                    )))
                }
            }
        }
        Ok(options)
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 rendering with optional embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        render_to_html(doc, &self.media, &self.options).map(|output| output.html)
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let options = self.options_with(options)?;
        render_to_html(doc, &self.media, &options).map(|output| output.html)
    }
}

/// Boolean option values; a bare flag (empty value) means `true`.
pub(crate) fn parse_flag(key: &str, value: &str) -> Result<bool, ConvertError> {
    match value {
        "" | "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConvertError::InvalidInput(format!(
            "Option '{key}' expects true or false, got '{value}'"
        ))),
    }
}
