//! Core data structures for the document tree.
//!
//! One variant per node kind, so every converter dispatches with an exhaustive
//! `match`. Kinds this crate does not know survive as [`Node::Unknown`] and are
//! degraded by the converters rather than rejected.

use serde::{Deserialize, Serialize};

use super::wire::{RawMark, RawNode};

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum Node {
    Doc {
        content: Vec<Node>,
    },
    Paragraph {
        content: Vec<Node>,
    },
    Blockquote {
        content: Vec<Node>,
    },
    BulletList {
        content: Vec<Node>,
    },
    OrderedList {
        content: Vec<Node>,
    },
    ListItem {
        content: Vec<Node>,
    },
    Table {
        content: Vec<Node>,
    },
    TableRow {
        content: Vec<Node>,
    },
    TableHeader {
        content: Vec<Node>,
    },
    TableCell {
        content: Vec<Node>,
    },
    Panel {
        panel_type: String,
        content: Vec<Node>,
    },
    Expand {
        title: Option<String>,
        content: Vec<Node>,
    },
    Heading {
        level: u8,
        content: Vec<Node>,
    },
    /// Holds at most one unmarked text node.
    CodeBlock {
        language: Option<String>,
        content: Vec<Node>,
    },
    Mention {
        id: Option<String>,
        text: String,
    },
    Emoji {
        short_name: String,
        text: Option<String>,
    },
    InlineCard {
        url: String,
    },
    Media {
        id: Option<String>,
        alt: Option<String>,
    },
    /// Wraps the `media` node(s) it displays.
    MediaSingle {
        content: Vec<Node>,
    },
    Rule,
    HardBreak,
    Text {
        text: String,
        marks: Vec<Mark>,
    },
    Unknown {
        kind: String,
        attrs: Option<serde_json::Value>,
        text: Option<String>,
        content: Vec<Node>,
    },
}

/// An inline annotation attached to a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMark", into = "RawMark")]
pub enum Mark {
    Strong,
    Em,
    Strike,
    Code,
    Underline,
    Link { href: String },
    SubSup(SubSupType),
    TextColor { color: String },
    BackgroundColor { color: String },
    Unknown { kind: String, attrs: Option<serde_json::Value> },
}

/// Which way a `subsup` mark shifts the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubSupType {
    Sub,
    Sup,
}

impl Node {
    pub fn doc(content: Vec<Node>) -> Self {
        Node::Doc { content }
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Node::Heading { level, content }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn code_block(language: Option<String>, code: impl Into<String>) -> Self {
        let code = code.into();
        let content = if code.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(code)]
        };
        Node::CodeBlock { language, content }
    }

    /// The wire discriminator of this node (`"bulletList"`, `"text"`, ...).
    pub fn kind(&self) -> &str {
        match self {
            Node::Doc { .. } => "doc",
            Node::Paragraph { .. } => "paragraph",
            Node::Blockquote { .. } => "blockquote",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::Table { .. } => "table",
            Node::TableRow { .. } => "tableRow",
            Node::TableHeader { .. } => "tableHeader",
            Node::TableCell { .. } => "tableCell",
            Node::Panel { .. } => "panel",
            Node::Expand { .. } => "expand",
            Node::Heading { .. } => "heading",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Mention { .. } => "mention",
            Node::Emoji { .. } => "emoji",
            Node::InlineCard { .. } => "inlineCard",
            Node::Media { .. } => "media",
            Node::MediaSingle { .. } => "mediaSingle",
            Node::Rule => "rule",
            Node::HardBreak => "hardBreak",
            Node::Text { .. } => "text",
            Node::Unknown { kind, .. } => kind.as_str(),
        }
    }

    /// Child nodes in document order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Blockquote { content }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content }
            | Node::Table { content }
            | Node::TableRow { content }
            | Node::TableHeader { content }
            | Node::TableCell { content }
            | Node::Panel { content, .. }
            | Node::Expand { content, .. }
            | Node::Heading { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::MediaSingle { content }
            | Node::Unknown { content, .. } => content,
            Node::Mention { .. }
            | Node::Emoji { .. }
            | Node::InlineCard { .. }
            | Node::Media { .. }
            | Node::Rule
            | Node::HardBreak
            | Node::Text { .. } => &[],
        }
    }

    /// Whether the node lives inside paragraphs/headings rather than at block level.
    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text { .. }
            | Node::HardBreak
            | Node::Mention { .. }
            | Node::Emoji { .. }
            | Node::InlineCard { .. } => true,
            Node::Unknown { text, .. } => text.is_some(),
            _ => false,
        }
    }

    /// Concatenated text payload of this node and its descendants, marks ignored.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_plain_text(self, &mut out);
        out
    }
}

fn collect_plain_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Mention { text, .. } => out.push_str(text),
        Node::Emoji {
            short_name, text, ..
        } => out.push_str(text.as_deref().unwrap_or(short_name)),
        Node::InlineCard { url } => out.push_str(url),
        Node::HardBreak => out.push('\n'),
        Node::Unknown {
            text: Some(text), ..
        } => out.push_str(text),
        _ => {}
    }
    for child in node.children() {
        collect_plain_text(child, out);
    }
}

impl Mark {
    /// The wire discriminator of this mark (`"strong"`, `"link"`, ...).
    pub fn kind(&self) -> &str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Underline => "underline",
            Mark::Link { .. } => "link",
            Mark::SubSup(_) => "subsup",
            Mark::TextColor { .. } => "textColor",
            Mark::BackgroundColor { .. } => "backgroundColor",
            Mark::Unknown { kind, .. } => kind.as_str(),
        }
    }

    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link { href: href.into() }
    }
}
