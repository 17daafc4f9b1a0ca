//! JSON wire shape of the document tree.
//!
//! Every node travels as `{type, attrs?, content?, text?, marks?}`. Decoding
//! goes through these loose structs first so that unknown kinds and missing
//! attributes are defaulted instead of failing the whole document.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::nodes::{Mark, Node, SubSupType};

/// Panel type assumed when a panel carries no `panelType` attribute.
pub const DEFAULT_PANEL_TYPE: &str = "info";

/// Version stamped on every serialized `doc` node.
pub const DOC_VERSION: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marks: Option<Vec<Mark>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMark {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Value>,
}

fn attr_str(attrs: Option<&Value>, key: &str) -> Option<String> {
    attrs
        .and_then(|a| a.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn attr_level(attrs: Option<&Value>) -> Option<u8> {
    attrs
        .and_then(|a| a.get("level"))
        .and_then(Value::as_u64)
        .map(|level| level.min(u64::from(u8::MAX)) as u8)
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let RawNode {
            kind,
            attrs: raw_attrs,
            content,
            text,
            marks,
        } = raw;
        let attrs = raw_attrs.as_ref();
        let content = content.unwrap_or_default();

        match kind.as_str() {
            "doc" => Node::Doc { content },
            "paragraph" => Node::Paragraph { content },
            "blockquote" => Node::Blockquote { content },
            "bulletList" => Node::BulletList { content },
            "orderedList" => Node::OrderedList { content },
            "listItem" => Node::ListItem { content },
            "table" => Node::Table { content },
            "tableRow" => Node::TableRow { content },
            "tableHeader" => Node::TableHeader { content },
            "tableCell" => Node::TableCell { content },
            "panel" => Node::Panel {
                panel_type: attr_str(attrs, "panelType")
                    .unwrap_or_else(|| DEFAULT_PANEL_TYPE.to_string()),
                content,
            },
            "expand" | "nestedExpand" => Node::Expand {
                title: attr_str(attrs, "title"),
                content,
            },
            "heading" => Node::Heading {
                level: attr_level(attrs).unwrap_or(1),
                content,
            },
            "codeBlock" => {
                // Marks and non-text children are flattened away.
                let code: String = content.iter().map(Node::plain_text).collect();
                let language = attr_str(attrs, "language").filter(|l| !l.is_empty());
                Node::code_block(language, code)
            }
            "mention" => Node::Mention {
                id: attr_str(attrs, "id"),
                text: attr_str(attrs, "text").unwrap_or_default(),
            },
            "emoji" => Node::Emoji {
                short_name: attr_str(attrs, "shortName").unwrap_or_default(),
                text: attr_str(attrs, "text"),
            },
            "inlineCard" => Node::InlineCard {
                url: attr_str(attrs, "url").unwrap_or_default(),
            },
            "media" => Node::Media {
                id: attr_str(attrs, "id"),
                alt: attr_str(attrs, "alt"),
            },
            "mediaSingle" => Node::MediaSingle { content },
            "rule" => Node::Rule,
            "hardBreak" => Node::HardBreak,
            "text" => Node::Text {
                text: text.unwrap_or_default(),
                marks: marks.unwrap_or_default(),
            },
            _ => Node::Unknown {
                kind: kind.clone(),
                attrs: raw_attrs.clone(),
                text,
                content,
            },
        }
    }
}

impl RawNode {
    fn container(kind: &str, attrs: Option<Value>, content: Vec<Node>) -> Self {
        RawNode {
            kind: kind.to_string(),
            attrs,
            content: Some(content),
            text: None,
            marks: None,
        }
    }

    fn leaf(kind: &str, attrs: Option<Value>) -> Self {
        RawNode {
            kind: kind.to_string(),
            attrs,
            content: None,
            text: None,
            marks: None,
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let kind = node.kind().to_string();
        match node {
            Node::Doc { content } => {
                RawNode::container(&kind, Some(json!({ "version": DOC_VERSION })), content)
            }
            Node::Paragraph { content }
            | Node::Blockquote { content }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content }
            | Node::Table { content }
            | Node::TableRow { content }
            | Node::TableHeader { content }
            | Node::TableCell { content }
            | Node::MediaSingle { content } => RawNode::container(&kind, None, content),
            Node::Panel {
                panel_type,
                content,
            } => RawNode::container(&kind, Some(json!({ "panelType": panel_type })), content),
            Node::Expand { title, content } => {
                let attrs = title.map(|title| json!({ "title": title }));
                RawNode::container(&kind, attrs, content)
            }
            Node::Heading { level, content } => {
                RawNode::container(&kind, Some(json!({ "level": level })), content)
            }
            Node::CodeBlock { language, content } => {
                let attrs = language.map(|language| json!({ "language": language }));
                RawNode::container(&kind, attrs, content)
            }
            Node::Mention { id, text } => {
                let mut attrs = json!({ "text": text });
                if let Some(id) = id {
                    attrs["id"] = Value::String(id);
                }
                RawNode::leaf(&kind, Some(attrs))
            }
            Node::Emoji { short_name, text } => {
                let mut attrs = json!({ "shortName": short_name });
                if let Some(text) = text {
                    attrs["text"] = Value::String(text);
                }
                RawNode::leaf(&kind, Some(attrs))
            }
            Node::InlineCard { url } => RawNode::leaf(&kind, Some(json!({ "url": url }))),
            Node::Media { id, alt } => {
                let mut attrs = json!({ "type": "file" });
                if let Some(id) = id {
                    attrs["id"] = Value::String(id);
                }
                if let Some(alt) = alt {
                    attrs["alt"] = Value::String(alt);
                }
                RawNode::leaf(&kind, Some(attrs))
            }
            Node::Rule | Node::HardBreak => RawNode::leaf(&kind, None),
            Node::Text { text, marks } => RawNode {
                kind,
                attrs: None,
                content: None,
                text: Some(text),
                marks: if marks.is_empty() { None } else { Some(marks) },
            },
            Node::Unknown {
                attrs,
                text,
                content,
                ..
            } => RawNode {
                kind,
                attrs,
                content: if content.is_empty() {
                    None
                } else {
                    Some(content)
                },
                text,
                marks: None,
            },
        }
    }
}

impl From<RawMark> for Mark {
    fn from(raw: RawMark) -> Self {
        let attrs = raw.attrs.as_ref();
        match raw.kind.as_str() {
            "strong" => Mark::Strong,
            "em" => Mark::Em,
            "strike" => Mark::Strike,
            "code" => Mark::Code,
            "underline" => Mark::Underline,
            "link" => Mark::Link {
                href: attr_str(attrs, "href").unwrap_or_default(),
            },
            "subsup" => match attr_str(attrs, "type").as_deref() {
                Some("sub") => Mark::SubSup(SubSupType::Sub),
                _ => Mark::SubSup(SubSupType::Sup),
            },
            "textColor" => Mark::TextColor {
                color: attr_str(attrs, "color").unwrap_or_default(),
            },
            "backgroundColor" => Mark::BackgroundColor {
                color: attr_str(attrs, "color").unwrap_or_default(),
            },
            _ => Mark::Unknown {
                kind: raw.kind.clone(),
                attrs: raw.attrs.clone(),
            },
        }
    }
}

impl From<Mark> for RawMark {
    fn from(mark: Mark) -> Self {
        let kind = mark.kind().to_string();
        let attrs = match mark {
            Mark::Strong | Mark::Em | Mark::Strike | Mark::Code | Mark::Underline => None,
            Mark::Link { href } => Some(json!({ "href": href })),
            Mark::SubSup(SubSupType::Sub) => Some(json!({ "type": "sub" })),
            Mark::SubSup(SubSupType::Sup) => Some(json!({ "type": "sup" })),
            Mark::TextColor { color } | Mark::BackgroundColor { color } => {
                Some(json!({ "color": color }))
            }
            Mark::Unknown { attrs, .. } => attrs,
        };
        RawMark { kind, attrs }
    }
}
