//! HTML serialization (ADF → HTML render)
//!
//! Converts a document tree to semantic HTML5.
//! Pipeline: document tree → RcDom element tree → HTML string
//!
//! Escaping is left to the html5ever serializer; this module only builds
//! elements, attributes and text nodes. Media ids are resolved through a
//! caller-supplied [`MediaMap`]; ids that are missing from it render a
//! placeholder and are reported back in [`RenderOutput::unresolved_media`].
//! Link targets and image sources with a scheme outside
//! [`is_safe_url`]/[`is_safe_media_url`] are not emitted.

use crate::adf::{
    expect_doc, Mark, Node, SubSupType, DEFAULT_EXPAND_TITLE, DEFAULT_MEDIA_PLACEHOLDER,
};
use crate::common::links::{is_safe_media_url, is_safe_url, shorten_url};
use crate::common::marks::apply_marks;
use crate::error::ConvertError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::default::Default;
use std::rc::Rc;

/// Media id → displayable resource (usually a URI).
pub type MediaMap = HashMap<String, String>;

/// Default display budget for inline-card link text.
pub const DEFAULT_INLINE_CARD_MAX_LENGTH: usize = 40;

/// Panel types with a dedicated style; anything else is styled as `info`.
pub const KNOWN_PANEL_TYPES: [&str; 6] = ["info", "note", "tip", "warning", "error", "success"];

const DEFAULT_TITLE: &str = "ADF Document";

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Wrap the fragment in a complete HTML5 page with embedded CSS
    pub standalone: bool,
    /// Page title for standalone output
    pub title: Option<String>,
    /// Optional custom CSS appended after the baseline CSS
    pub custom_css: Option<String>,
    /// Maximum number of characters shown for an inline card
    pub inline_card_max_length: usize,
    /// Text shown in place of media that cannot be resolved
    pub media_placeholder: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            standalone: false,
            title: None,
            custom_css: None,
            inline_card_max_length: DEFAULT_INLINE_CARD_MAX_LENGTH,
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn standalone() -> Self {
        Self {
            standalone: true,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Result of rendering a document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub html: String,
    /// Media ids that were not found in the media map, in document order.
    pub unresolved_media: Vec<String>,
}

/// The baseline stylesheet embedded in standalone output.
pub fn get_default_css() -> &'static str {
    include_str!("../../../css/baseline.css")
}

/// Render a document tree to HTML with default options
pub fn render_to_html_default(
    doc: &Node,
    media: &MediaMap,
) -> Result<RenderOutput, ConvertError> {
    render_to_html(doc, media, &HtmlOptions::default())
}

/// Render a document tree to HTML
pub fn render_to_html(
    doc: &Node,
    media: &MediaMap,
    options: &HtmlOptions,
) -> Result<RenderOutput, ConvertError> {
    let blocks = expect_doc(doc)?;

    let root = create_element("div", vec![("class", "adf-document")]);
    let mut renderer = Renderer {
        media,
        options,
        unresolved: Vec::new(),
    };
    for block in blocks {
        renderer.node(&root, block);
    }

    let fragment = serialize_dom(&root)?;
    let html = if options.standalone {
        let title = options.title.as_deref().unwrap_or(DEFAULT_TITLE);
        wrap_in_document(&fragment, title, options)
    } else {
        fragment
    };

    Ok(RenderOutput {
        html,
        unresolved_media: renderer.unresolved,
    })
}

struct Renderer<'a> {
    media: &'a MediaMap,
    options: &'a HtmlOptions,
    unresolved: Vec<String>,
}

impl Renderer<'_> {
    fn children(&mut self, parent: &Handle, children: &[Node]) {
        for child in children {
            self.node(parent, child);
        }
    }

    /// Append a `tag` element holding the rendered `children` to `parent`.
    fn container(
        &mut self,
        parent: &Handle,
        tag: &str,
        attrs: Vec<(&str, &str)>,
        children: &[Node],
    ) {
        let element = create_element(tag, attrs);
        self.children(&element, children);
        append(parent, element);
    }

    fn node(&mut self, parent: &Handle, node: &Node) {
        match node {
            Node::Doc { content } => self.children(parent, content),

            Node::Paragraph { content } => {
                self.container(parent, "p", vec![], content);
            }

            Node::Heading { level, content } => {
                let tag = format!("h{}", (*level).clamp(1, 6));
                self.container(parent, &tag, vec![], content);
            }

            Node::Blockquote { content } => {
                self.container(parent, "blockquote", vec![], content);
            }

            Node::BulletList { content } => self.list(parent, "ul", content),
            Node::OrderedList { content } => self.list(parent, "ol", content),

            Node::ListItem { content } => {
                self.container(parent, "li", vec![], content);
            }

            Node::CodeBlock { language, content } => {
                let pre = create_element("pre", vec![("class", "adf-code-block")]);
                let class = language.as_deref().map(|lang| format!("language-{lang}"));
                let attrs = match &class {
                    Some(class) => vec![("class", class.as_str())],
                    None => vec![],
                };
                let code = create_element("code", attrs);
                // Code text is never mark-processed.
                let text: String = content.iter().map(Node::plain_text).collect();
                append(&code, create_text(&text));
                append(&pre, code);
                append(parent, pre);
            }

            Node::Rule => append(parent, create_element("hr", vec![])),
            Node::HardBreak => append(parent, create_element("br", vec![])),

            Node::Table { content } => self.table(parent, content),

            Node::TableRow { content } => {
                let row = create_element("tr", vec![]);
                self.table_cells(&row, content);
                append(parent, row);
            }

            Node::TableHeader { content } => {
                self.container(parent, "th", vec![], content);
            }
            Node::TableCell { content } => {
                self.container(parent, "td", vec![], content);
            }

            Node::Panel {
                panel_type,
                content,
            } => {
                let style = panel_style(panel_type);
                let class = format!("adf-panel adf-panel-{style}");
                let panel = create_element(
                    "div",
                    vec![
                        ("class", class.as_str()),
                        ("data-panel-type", panel_type.as_str()),
                    ],
                );
                let title = create_element("p", vec![("class", "adf-panel-title")]);
                append(&title, create_text(panel_type));
                append(&panel, title);
                self.children(&panel, content);
                append(parent, panel);
            }

            Node::Expand { title, content } => {
                let title = title
                    .as_deref()
                    .filter(|title| !title.is_empty())
                    .unwrap_or(DEFAULT_EXPAND_TITLE);
                let details =
                    create_element("details", vec![("class", "adf-expand"), ("title", title)]);
                let summary = create_element("summary", vec![]);
                append(&summary, create_text(title));
                append(&details, summary);
                self.children(&details, content);
                append(parent, details);
            }

            Node::MediaSingle { content } => {
                let figure = create_element("figure", vec![("class", "adf-media-single")]);
                if content.is_empty() {
                    append(&figure, self.media_placeholder());
                } else {
                    self.children(&figure, content);
                }
                append(parent, figure);
            }

            Node::Media { id, alt } => {
                let element = self.media_element(id.as_deref(), alt.as_deref());
                append(parent, element);
            }

            Node::Mention { id, text } => {
                let label = if text.is_empty() {
                    format!("@{}", id.as_deref().unwrap_or("unknown"))
                } else {
                    text.clone()
                };
                let mut attrs = vec![("class", "adf-mention")];
                if let Some(id) = id {
                    attrs.push(("data-mention-id", id.as_str()));
                }
                let badge = create_element("span", attrs);
                append(&badge, create_text(&label));
                append(parent, badge);
            }

            Node::Emoji { short_name, text } => {
                let badge = create_element(
                    "span",
                    vec![("class", "adf-emoji"), ("title", short_name.as_str())],
                );
                append(&badge, create_text(text.as_deref().unwrap_or(short_name)));
                append(parent, badge);
            }

            Node::InlineCard { url } => {
                let label = shorten_url(url, self.options.inline_card_max_length);
                let mut attrs = vec![("class", "adf-inline-card")];
                if is_safe_url(url) {
                    attrs.push(("href", url.as_str()));
                } else {
                    tracing::debug!(url = %url, "dropping inline card href with unsafe scheme");
                }
                attrs.push(("title", url.as_str()));
                let card = create_element("a", attrs);
                append(&card, create_text(&label));
                append(parent, card);
            }

            Node::Text { text, marks } => {
                let rendered = apply_marks(create_text(text), marks, wrap_mark);
                append(parent, rendered);
            }

            Node::Unknown {
                kind,
                text,
                content,
                ..
            } => {
                tracing::debug!(kind = %kind, "rendering unknown node as its children");
                if let Some(text) = text {
                    append(parent, create_text(text));
                }
                self.children(parent, content);
            }
        }
    }

    fn list(&mut self, parent: &Handle, tag: &str, items: &[Node]) {
        let list = create_element(tag, vec![]);
        for item in items {
            match item {
                Node::ListItem { .. } => self.node(&list, item),
                other => {
                    let li = create_element("li", vec![]);
                    self.node(&li, other);
                    append(&list, li);
                }
            }
        }
        append(parent, list);
    }

    fn table(&mut self, parent: &Handle, rows: &[Node]) {
        let table = create_element("table", vec![("class", "adf-table")]);

        let has_header = matches!(
            rows.first(),
            Some(Node::TableRow { content })
                if content.iter().any(|cell| matches!(cell, Node::TableHeader { .. }))
        );

        let body_rows = if has_header {
            let thead = create_element("thead", vec![]);
            self.children(&thead, &rows[..1]);
            append(&table, thead);
            &rows[1..]
        } else {
            rows
        };

        if !body_rows.is_empty() {
            let tbody = create_element("tbody", vec![]);
            self.children(&tbody, body_rows);
            append(&table, tbody);
        }

        append(parent, table);
    }

    fn table_cells(&mut self, row: &Handle, cells: &[Node]) {
        for cell in cells {
            match cell {
                Node::TableHeader { .. } | Node::TableCell { .. } => self.node(row, cell),
                other => {
                    let td = create_element("td", vec![]);
                    self.node(&td, other);
                    append(row, td);
                }
            }
        }
    }

    fn media_element(&mut self, id: Option<&str>, alt: Option<&str>) -> Handle {
        let Some(id) = id else {
            return self.media_placeholder();
        };

        let media = self.media;
        match media.get(id) {
            Some(src) if !is_safe_media_url(src) => {
                tracing::debug!(media_id = %id, "media source has an unsafe scheme");
                self.media_placeholder()
            }
            Some(src) => create_element(
                "img",
                vec![
                    ("class", "adf-media"),
                    ("src", src.as_str()),
                    ("alt", alt.unwrap_or("")),
                ],
            ),
            None => {
                tracing::debug!(media_id = %id, "media id not in media map");
                if !self.unresolved.iter().any(|seen| seen == id) {
                    self.unresolved.push(id.to_string());
                }
                self.media_placeholder()
            }
        }
    }

    fn media_placeholder(&self) -> Handle {
        let span = create_element("span", vec![("class", "adf-media-placeholder")]);
        append(&span, create_text(&self.options.media_placeholder));
        span
    }
}

/// CSS style suffix for a panel type.
pub fn panel_style(panel_type: &str) -> &str {
    if KNOWN_PANEL_TYPES.contains(&panel_type) {
        panel_type
    } else {
        "info"
    }
}

/// Wrap `content` in the element for `mark`. Unknown marks leave it untouched.
fn wrap_mark(content: Handle, mark: &Mark) -> Handle {
    let element = match mark {
        Mark::Strong => create_element("strong", vec![]),
        Mark::Em => create_element("em", vec![]),
        Mark::Strike => create_element("s", vec![]),
        Mark::Code => create_element("code", vec![]),
        Mark::Underline => create_element("u", vec![]),
        Mark::Link { href } if is_safe_url(href) => {
            create_element("a", vec![("href", href.as_str())])
        }
        Mark::Link { href } => {
            tracing::debug!(href = %href, "dropping link with unsafe scheme");
            return content;
        }
        Mark::SubSup(SubSupType::Sup) => create_element("sup", vec![]),
        Mark::SubSup(SubSupType::Sub) => create_element("sub", vec![]),
        Mark::TextColor { color } => {
            let style = format!("color: {color}");
            create_element("span", vec![("style", style.as_str())])
        }
        Mark::BackgroundColor { color } => {
            let style = format!("background-color: {color}");
            create_element("span", vec![("style", style.as_str())])
        }
        Mark::Unknown { kind, .. } => {
            tracing::debug!(kind = %kind, "ignoring unknown mark");
            return content;
        }
    };
    append(&element, content);
    element
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize an element and its subtree to an HTML string
fn serialize_dom(root: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(root.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        ConvertError::SerializationError(format!("HTML serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| ConvertError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap the fragment in a complete HTML document with embedded CSS
fn wrap_in_document(fragment: &str, title: &str, options: &HtmlOptions) -> String {
    let baseline_css = get_default_css();
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="adf-babel">
  <title>{escaped_title}</title>
  <style>
{baseline_css}
{custom_css}
  </style>
</head>
<body>
{fragment}
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
