//! Markdown serialization (ADF → Markdown export)
//!
//! A recursive walk over the tree, dispatching on node kind. Blocks at the same
//! level are separated by a blank line; list depth is threaded through the
//! recursion to compute indentation. Marks are applied with the shared
//! [`apply_marks`] fold.
//!
//! Everything without a Markdown equivalent degrades: panels become
//! blockquotes with a bold label, expands become raw `<details>` HTML, media
//! becomes a placeholder, mentions/emoji become plain text, and unknown nodes
//! contribute their children's output.

use crate::adf::{expect_doc, Mark, Node, SubSupType, DEFAULT_EXPAND_TITLE};
use crate::common::marks::apply_marks;
use crate::error::ConvertError;

pub use crate::adf::DEFAULT_MEDIA_PLACEHOLDER;

/// Options for Markdown serialization
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownOptions {
    /// Spaces of indentation added per list nesting level.
    pub indent_width: usize,
    /// Text emitted in place of media nodes.
    pub media_placeholder: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            media_placeholder: DEFAULT_MEDIA_PLACEHOLDER.to_string(),
        }
    }
}

/// Serialize a document tree to Markdown with default options
pub fn serialize_to_markdown(doc: &Node) -> Result<String, ConvertError> {
    serialize_to_markdown_with_options(doc, &MarkdownOptions::default())
}

/// Serialize a document tree to Markdown
///
/// The root must be a `doc` node; anything else is rejected with
/// [`ConvertError::InvalidRoot`]. Below the root the walk never fails.
pub fn serialize_to_markdown_with_options(
    doc: &Node,
    options: &MarkdownOptions,
) -> Result<String, ConvertError> {
    let blocks = expect_doc(doc)?;
    let writer = MarkdownWriter { options };
    Ok(writer.blocks(blocks, 0))
}

struct MarkdownWriter<'o> {
    options: &'o MarkdownOptions,
}

impl MarkdownWriter<'_> {
    fn blocks(&self, nodes: &[Node], depth: usize) -> String {
        nodes
            .iter()
            .map(|node| self.block(node, depth))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn block(&self, node: &Node, depth: usize) -> String {
        match node {
            Node::Doc { content } => self.blocks(content, depth),

            Node::Paragraph { content } => self.inlines(content),

            Node::Heading { level, content } => {
                let hashes = "#".repeat(usize::from((*level).clamp(1, 6)));
                format!("{hashes} {}", self.inlines(content))
            }

            Node::BulletList { content } => self.list(content, false, depth),
            Node::OrderedList { content } => self.list(content, true, depth),

            Node::CodeBlock { language, content } => {
                let code: String = content.iter().map(Node::plain_text).collect();
                let fence = code_fence(&code);
                let language = language.as_deref().unwrap_or("");
                format!("{fence}{language}\n{code}\n{fence}")
            }

            Node::Blockquote { content } => prefix_lines(&self.blocks(content, depth), "> "),

            Node::Rule => "---".to_string(),

            // At block level a hard break only separates its neighbours.
            Node::HardBreak => String::new(),

            Node::Table { content } => self.table(content),

            Node::Panel {
                panel_type,
                content,
            } => {
                let label = panel_type.to_uppercase();
                let body = self.blocks(content, depth);
                let line = if body.is_empty() {
                    format!("**{label}:**")
                } else {
                    format!("**{label}:** {body}")
                };
                prefix_lines(&line, "> ")
            }

            Node::Expand { title, content } => {
                let title = title
                    .as_deref()
                    .filter(|title| !title.is_empty())
                    .unwrap_or(DEFAULT_EXPAND_TITLE);
                format!(
                    "<details>\n<summary>{}</summary>\n\n{}\n\n</details>",
                    html_escape(title),
                    self.blocks(content, depth)
                )
            }

            Node::Media { .. } | Node::MediaSingle { .. } => {
                self.options.media_placeholder.clone()
            }

            Node::Text { .. }
            | Node::Mention { .. }
            | Node::Emoji { .. }
            | Node::InlineCard { .. } => self.inline(node),

            Node::ListItem { content }
            | Node::TableRow { content }
            | Node::TableHeader { content }
            | Node::TableCell { content } => self.fallback(None, content, depth),

            Node::Unknown {
                kind,
                text,
                content,
                ..
            } => {
                tracing::debug!(kind = %kind, "degrading unknown node to its children");
                self.fallback(text.as_deref(), content, depth)
            }
        }
    }

    /// Output for nodes with no rule of their own: their text plus their children.
    fn fallback(&self, text: Option<&str>, content: &[Node], depth: usize) -> String {
        let text = text.unwrap_or("");
        if content.iter().all(Node::is_inline) {
            format!("{text}{}", self.inlines(content))
        } else if text.is_empty() {
            self.blocks(content, depth)
        } else {
            format!("{text}\n\n{}", self.blocks(content, depth))
        }
    }

    fn inlines(&self, nodes: &[Node]) -> String {
        nodes.iter().map(|node| self.inline(node)).collect()
    }

    fn inline(&self, node: &Node) -> String {
        match node {
            Node::Text { text, marks } => apply_marks(text.clone(), marks, wrap_mark),
            Node::HardBreak => "\n".to_string(),
            Node::Mention { id, text } => {
                if text.is_empty() {
                    format!("@{}", id.as_deref().unwrap_or("unknown"))
                } else {
                    text.clone()
                }
            }
            Node::Emoji { short_name, text } => {
                text.clone().unwrap_or_else(|| short_name.clone())
            }
            Node::InlineCard { url } => {
                if url.is_empty() {
                    String::new()
                } else {
                    format!("[{url}]({url})")
                }
            }
            Node::Unknown {
                kind,
                text,
                content,
                ..
            } if node.is_inline() => {
                tracing::debug!(kind = %kind, "degrading unknown inline node to its text");
                format!("{}{}", text.as_deref().unwrap_or(""), self.inlines(content))
            }
            block => self.block(block, 0),
        }
    }

    fn list(&self, items: &[Node], ordered: bool, depth: usize) -> String {
        let indent = " ".repeat(self.options.indent_width * depth);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let marker = if ordered {
                    format!("{}.", index + 1)
                } else {
                    "-".to_string()
                };
                let children = match item {
                    Node::ListItem { content } => content.as_slice(),
                    other => std::slice::from_ref(other),
                };
                self.list_item(children, &indent, &marker, depth)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn list_item(&self, children: &[Node], indent: &str, marker: &str, depth: usize) -> String {
        let continuation = format!("{indent}{}", " ".repeat(self.options.indent_width));
        let mut lines: Vec<String> = Vec::new();
        let mut has_marker = false;

        for child in children {
            let rendered = match child {
                Node::BulletList { content } | Node::OrderedList { content } => {
                    if !has_marker {
                        lines.push(format!("{indent}{marker}"));
                        has_marker = true;
                    }
                    let ordered = matches!(child, Node::OrderedList { .. });
                    lines.push(self.list(content, ordered, depth + 1));
                    continue;
                }
                Node::Paragraph { content } => self.inlines(content),
                // The continuation prefix already carries this item's indent.
                other => self.block(other, 0),
            };

            if has_marker {
                lines.push(prefix_nonempty_lines(&rendered, &continuation));
            } else {
                let body = prefix_continuation_lines(&rendered, &continuation);
                lines.push(format!("{indent}{marker} {body}").trim_end().to_string());
                has_marker = true;
            }
        }

        if !has_marker {
            lines.push(format!("{indent}{marker}"));
        }

        lines.join("\n")
    }

    fn table(&self, children: &[Node]) -> String {
        let rows: Vec<&[Node]> = children
            .iter()
            .filter_map(|child| match child {
                Node::TableRow { content } => Some(content.as_slice()),
                _ => None,
            })
            .collect();

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| self.table_cell(cell)).collect())
            .collect();

        let width = cells.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return String::new();
        }

        let has_header = rows
            .first()
            .is_some_and(|row| row.iter().any(|cell| matches!(cell, Node::TableHeader { .. })));

        let mut lines = Vec::with_capacity(cells.len() + 1);
        for (index, mut row) in cells.into_iter().enumerate() {
            row.resize(width, String::new());
            lines.push(format!("| {} |", row.join(" | ")));
            if index == 0 && has_header {
                lines.push(format!("| {} |", vec!["---"; width].join(" | ")));
            }
        }
        lines.join("\n")
    }

    fn table_cell(&self, cell: &Node) -> String {
        let parts: Vec<String> = match cell {
            Node::TableHeader { content } | Node::TableCell { content } => content
                .iter()
                .map(|child| match child {
                    Node::Paragraph { content } => self.inlines(content),
                    other => self.block(other, 0),
                })
                .collect(),
            other => vec![self.block(other, 0)],
        };
        parts
            .join(" ")
            .replace('\n', " ")
            .replace('|', "\\|")
    }
}

/// Wrap marked text in its Markdown (or inline HTML) syntax.
fn wrap_mark(content: String, mark: &Mark) -> String {
    match mark {
        Mark::Strong => wrap_delimited(content, "**"),
        Mark::Em => wrap_delimited(content, "*"),
        Mark::Strike => wrap_delimited(content, "~~"),
        Mark::Code => code_span(&content),
        Mark::Link { href } => format!("[{content}]({href})"),
        Mark::Underline => format!("<u>{content}</u>"),
        Mark::SubSup(SubSupType::Sup) => format!("<sup>{content}</sup>"),
        Mark::SubSup(SubSupType::Sub) => format!("<sub>{content}</sub>"),
        Mark::TextColor { .. } | Mark::BackgroundColor { .. } => content,
        Mark::Unknown { kind, .. } => {
            tracing::debug!(kind = %kind, "ignoring unknown mark");
            content
        }
    }
}

/// Emphasis delimiters must hug non-whitespace, so edge whitespace moves outside.
fn wrap_delimited(content: String, delimiter: &str) -> String {
    let core = content.trim();
    if core.is_empty() {
        return content;
    }
    let start = content.len() - content.trim_start().len();
    let end = start + core.len();
    format!(
        "{}{delimiter}{core}{delimiter}{}",
        &content[..start],
        &content[end..]
    )
}

fn code_span(code: &str) -> String {
    if code.contains('`') {
        format!("`` {code} ``")
    } else {
        format!("`{code}`")
    }
}

/// Shortest backtick fence that does not occur in the code itself.
fn code_fence(code: &str) -> String {
    let mut fence = "```".to_string();
    while code.contains(&fence) {
        fence.push('`');
    }
    fence
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    if text.is_empty() {
        return prefix.trim_end().to_string();
    }
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn prefix_nonempty_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent every line but the first, which follows the list marker.
fn prefix_continuation_lines(text: &str, prefix: &str) -> String {
    let mut lines = text.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };
    let mut out = first.to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
