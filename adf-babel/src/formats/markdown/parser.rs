//! Markdown parsing (Markdown → ADF import)
//!
//! Pipeline: Markdown string → block/inline tokens ([`Tokenizer`]) → document tree.
//!
//! This module only shapes the tree. Inline formatting tokens are flattened
//! into text runs: every formatting token converts its own inner stream and
//! then appends its mark to each resulting run, so `**a *b* c**` yields
//! `a ` (strong), `b` (em + strong) and ` c` (strong).
//!
//! Parsing is total: every string yields a `doc`, unsupported constructs are
//! dropped, and an input with no usable blocks becomes one empty paragraph.

use super::lexer::{BlockToken, ComrakTokenizer, InlineToken, ListItemToken, Tokenizer};
use crate::adf::{Mark, Node, SubSupType};

/// Parse Markdown into a document tree using the default tokenizer.
pub fn parse_from_markdown(source: &str) -> Node {
    parse_with(&ComrakTokenizer, source)
}

/// Parse Markdown into a document tree using the given tokenizer.
pub fn parse_with<T: Tokenizer + ?Sized>(tokenizer: &T, source: &str) -> Node {
    parse_tokens(tokenizer.tokenize(source))
}

/// Build a document tree from an already tokenized Markdown source.
pub fn parse_tokens(tokens: Vec<BlockToken>) -> Node {
    let mut content = convert_blocks(tokens);
    if content.is_empty() {
        content.push(Node::paragraph(Vec::new()));
    }
    Node::doc(content)
}

fn convert_blocks(tokens: Vec<BlockToken>) -> Vec<Node> {
    tokens.into_iter().filter_map(convert_block).collect()
}

fn convert_block(token: BlockToken) -> Option<Node> {
    match token {
        // Bare text runs (tight list items) are promoted to paragraphs.
        BlockToken::Paragraph { inlines } | BlockToken::Text { inlines } => {
            Some(Node::paragraph(convert_inlines(inlines)))
        }

        BlockToken::Heading { depth, inlines } => {
            Some(Node::heading(depth.clamp(1, 6), convert_inlines(inlines)))
        }

        BlockToken::List { ordered, items } => {
            let content = items.into_iter().map(convert_list_item).collect();
            if ordered {
                Some(Node::OrderedList { content })
            } else {
                Some(Node::BulletList { content })
            }
        }

        BlockToken::Code { lang, text } => {
            let language = lang.filter(|lang| !lang.is_empty());
            Some(Node::code_block(language, text))
        }

        BlockToken::Blockquote { tokens } => Some(Node::Blockquote {
            content: convert_blocks(tokens),
        }),

        BlockToken::Table { header, rows } => Some(convert_table(header, rows)),

        BlockToken::Rule => Some(Node::Rule),

        BlockToken::Html { raw } => {
            tracing::debug!(len = raw.len(), "dropping raw html block");
            None
        }

        BlockToken::Space => None,
    }
}

fn convert_list_item(item: ListItemToken) -> Node {
    // Nested list tokens come back through convert_block as list nodes.
    let mut content = convert_blocks(item.tokens);

    if content.is_empty() {
        let raw = item.raw.trim();
        let inlines = if raw.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(raw)]
        };
        content.push(Node::paragraph(inlines));
    }

    Node::ListItem { content }
}

fn convert_table(header: Vec<Vec<InlineToken>>, rows: Vec<Vec<Vec<InlineToken>>>) -> Node {
    let mut content = Vec::with_capacity(rows.len() + 1);

    if !header.is_empty() {
        let cells = header
            .into_iter()
            .map(|inlines| Node::TableHeader {
                content: vec![Node::paragraph(convert_inlines(inlines))],
            })
            .collect();
        content.push(Node::TableRow { content: cells });
    }

    for row in rows {
        let cells = row
            .into_iter()
            .map(|inlines| Node::TableCell {
                content: vec![Node::paragraph(convert_inlines(inlines))],
            })
            .collect();
        content.push(Node::TableRow { content: cells });
    }

    Node::Table { content }
}

fn convert_inlines(tokens: Vec<InlineToken>) -> Vec<Node> {
    let nodes = tokens.into_iter().flat_map(convert_inline).collect();
    merge_adjacent_text(nodes)
}

fn convert_inline(token: InlineToken) -> Vec<Node> {
    match token {
        InlineToken::Text(text) | InlineToken::Escape(text) => text_run(text),

        InlineToken::Strong(inner) => with_mark(convert_inlines(inner), Mark::Strong),
        InlineToken::Em(inner) => with_mark(convert_inlines(inner), Mark::Em),
        InlineToken::Del(inner) => with_mark(convert_inlines(inner), Mark::Strike),
        InlineToken::Sup(inner) => {
            with_mark(convert_inlines(inner), Mark::SubSup(SubSupType::Sup))
        }

        InlineToken::Codespan(code) => vec![Node::marked_text(code, vec![Mark::Code])],

        InlineToken::Link { href, text, tokens } => {
            let inner = convert_inlines(tokens);
            if inner.is_empty() {
                let label = if text.is_empty() { href.clone() } else { text };
                if label.is_empty() {
                    return Vec::new();
                }
                vec![Node::marked_text(label, vec![Mark::link(href)])]
            } else {
                with_mark(inner, Mark::link(href))
            }
        }

        InlineToken::LineBreak => vec![Node::HardBreak],

        InlineToken::Other { raw } => match raw {
            Some(raw) => text_run(raw),
            None => {
                tracing::trace!("dropping inline token without text");
                Vec::new()
            }
        },
    }
}

fn text_run(text: String) -> Vec<Node> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::text(text)]
    }
}

/// Append `mark` to every text run in `nodes`. Code runs keep only their `code` mark.
fn with_mark(nodes: Vec<Node>, mark: Mark) -> Vec<Node> {
    nodes
        .into_iter()
        .map(|node| match node {
            Node::Text { text, mut marks } => {
                if !marks.contains(&Mark::Code) && !marks.contains(&mark) {
                    marks.push(mark.clone());
                }
                Node::Text { text, marks }
            }
            other => other,
        })
        .collect()
}

/// Join neighbouring text runs that carry the same marks.
fn merge_adjacent_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (
            Some(Node::Text {
                text: prev_text,
                marks: prev_marks,
            }),
            Node::Text { text, marks },
        ) = (merged.last_mut(), &node)
        {
            if *prev_marks == *marks {
                prev_text.push_str(text);
                continue;
            }
        }
        merged.push(node);
    }
    merged
}
