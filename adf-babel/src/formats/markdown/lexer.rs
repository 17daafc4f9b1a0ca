//! Markdown tokenization
//!
//! The parser never looks at Markdown syntax itself. A [`Tokenizer`] turns the
//! source into a flat sequence of block tokens, each carrying its inline token
//! stream, and the parser only shapes the tree on top of that stream. Any
//! conformant Markdown lexer can sit behind the trait; [`ComrakTokenizer`] is
//! the default and walks a `comrak` AST.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Block-level token.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockToken {
    Paragraph {
        inlines: Vec<InlineToken>,
    },
    /// Bare text run, as produced inside tight list items.
    Text {
        inlines: Vec<InlineToken>,
    },
    Heading {
        depth: u8,
        inlines: Vec<InlineToken>,
    },
    List {
        ordered: bool,
        items: Vec<ListItemToken>,
    },
    Code {
        lang: Option<String>,
        text: String,
    },
    Blockquote {
        tokens: Vec<BlockToken>,
    },
    Table {
        header: Vec<Vec<InlineToken>>,
        rows: Vec<Vec<Vec<InlineToken>>>,
    },
    Rule,
    Html {
        raw: String,
    },
    Space,
}

/// One item of a list token.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItemToken {
    /// Plain text of the whole item, used when its tokens yield nothing.
    pub raw: String,
    pub tokens: Vec<BlockToken>,
}

/// Inline-level token.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineToken {
    Text(String),
    Strong(Vec<InlineToken>),
    Em(Vec<InlineToken>),
    Del(Vec<InlineToken>),
    Sup(Vec<InlineToken>),
    Codespan(String),
    Link {
        href: String,
        text: String,
        tokens: Vec<InlineToken>,
    },
    LineBreak,
    Escape(String),
    /// Anything else the lexer recognised, with its raw text when it has one.
    Other {
        raw: Option<String>,
    },
}

/// Splits Markdown source into block tokens.
pub trait Tokenizer {
    fn tokenize(&self, source: &str) -> Vec<BlockToken>;
}

/// [`Tokenizer`] backed by comrak (CommonMark + GFM tables/strikethrough/autolinks).
#[derive(Debug, Default, Clone, Copy)]
pub struct ComrakTokenizer;

impl Tokenizer for ComrakTokenizer {
    fn tokenize(&self, source: &str) -> Vec<BlockToken> {
        let arena = Arena::new();
        let options = default_comrak_options();
        let root = parse_document(&arena, source, &options);
        block_tokens(root, false)
    }
}

pub(crate) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
    options
}

fn block_tokens<'a>(node: &'a AstNode<'a>, tight: bool) -> Vec<BlockToken> {
    node.children()
        .filter_map(|child| block_token(child, tight))
        .collect()
}

fn block_token<'a>(node: &'a AstNode<'a>, tight: bool) -> Option<BlockToken> {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Paragraph => {
            let inlines = inline_tokens(node);
            if tight {
                Some(BlockToken::Text { inlines })
            } else {
                Some(BlockToken::Paragraph { inlines })
            }
        }

        NodeValue::Heading(heading) => Some(BlockToken::Heading {
            depth: heading.level,
            inlines: inline_tokens(node),
        }),

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let items = node
                .children()
                .map(|item| ListItemToken {
                    raw: collect_text_from_children(item),
                    tokens: block_tokens(item, list.tight),
                })
                .collect();
            Some(BlockToken::List { ordered, items })
        }

        NodeValue::CodeBlock(code_block) => {
            let lang = code_block
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            let text = code_block
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code_block.literal)
                .to_string();
            Some(BlockToken::Code { lang, text })
        }

        NodeValue::BlockQuote => Some(BlockToken::Blockquote {
            tokens: block_tokens(node, false),
        }),

        NodeValue::Table(_) => {
            let mut header = Vec::new();
            let mut rows = Vec::new();
            for row in node.children() {
                let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                let cells: Vec<Vec<InlineToken>> = row.children().map(inline_tokens).collect();
                if is_header && header.is_empty() {
                    header = cells;
                } else {
                    rows.push(cells);
                }
            }
            Some(BlockToken::Table { header, rows })
        }

        NodeValue::ThematicBreak => Some(BlockToken::Rule),

        NodeValue::HtmlBlock(html) => Some(BlockToken::Html {
            raw: html.literal.clone(),
        }),

        _ => {
            tracing::trace!("dropping unsupported markdown block");
            None
        }
    }
}

fn inline_tokens<'a>(node: &'a AstNode<'a>) -> Vec<InlineToken> {
    node.children().map(inline_token).collect()
}

fn inline_token<'a>(node: &'a AstNode<'a>) -> InlineToken {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => InlineToken::Text(text.clone()),
        NodeValue::Strong => InlineToken::Strong(inline_tokens(node)),
        NodeValue::Emph => InlineToken::Em(inline_tokens(node)),
        NodeValue::Strikethrough => InlineToken::Del(inline_tokens(node)),
        NodeValue::Superscript => InlineToken::Sup(inline_tokens(node)),
        NodeValue::Code(code) => InlineToken::Codespan(code.literal.clone()),
        NodeValue::Link(link) => InlineToken::Link {
            href: link.url.clone(),
            text: collect_text_from_children(node),
            tokens: inline_tokens(node),
        },
        NodeValue::LineBreak => InlineToken::LineBreak,
        NodeValue::SoftBreak => InlineToken::Text("\n".to_string()),
        NodeValue::HtmlInline(html) => InlineToken::Other {
            raw: Some(html.clone()),
        },
        _ => {
            let raw = collect_text_from_children(node);
            InlineToken::Other {
                raw: if raw.is_empty() { None } else { Some(raw) },
            }
        }
    }
}

/// Collect text content from a node
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}

fn collect_text_from_children<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.children() {
        collect_text_content(child, &mut text);
    }
    text.trim().to_string()
}
