//! Conversion between ADF document trees, Markdown and HTML
//!
//!     This crate converts rich-text documents between three representations: the ADF document
//!     tree (a JSON node graph of block and inline nodes with stacked inline marks), Markdown
//!     text, and rendered HTML.
//!
//!     TLDR: For format authors:
//!         - The tree (./adf) is the hub. Every format parses into it and/or serializes from it;
//!           formats never call each other.
//!         - Markdown tokenizing is delegated to comrak behind the Tokenizer trait, HTML output is
//!           built as an rcdom tree and serialized by html5ever. We shape trees, we don't lex.
//!         - Mark nesting is shared (./common/marks.rs): both serializers fold marks with the same
//!           combinator and only supply their own wrap.
//!
//! Architecture
//!
//!     This is a pure lib: it powers adf-cli but is shell agnostic, no code here prints, reads
//!     env vars or touches the filesystem. Logging goes through `tracing`; installing a
//!     subscriber is the caller's business.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── adf                     # The document tree and its JSON wire form
//!     ├── common                  # Mark combinator, URL display helpers
//!     ├── formats
//!     │   ├── adf                 # JSON in/out
//!     │   ├── markdown            # lexer.rs, parser.rs, serializer.rs
//!     │   └── html                # serializer.rs (render only)
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Failure Semantics
//!
//!     All converters are total over well-formed trees: unknown node kinds render their children,
//!     unknown marks are ignored, missing attributes are defaulted and missing media renders a
//!     placeholder. Only a structurally invalid input (a root that is not `doc`, or text that is
//!     not a JSON node) is an error. Markdown parsing never fails.
//!
pub mod adf;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use adf::{
    parse_tree_json, tree_to_json, Mark, Node, SubSupType, DEFAULT_EXPAND_TITLE,
    DEFAULT_MEDIA_PLACEHOLDER,
};
pub use error::ConvertError;
pub use format::Format;
pub use formats::html::{HtmlOptions, MediaMap, RenderOutput};
pub use formats::markdown::MarkdownOptions;
pub use registry::FormatRegistry;

/// Parse Markdown into a document tree.
///
/// Never fails: unsupported constructs are dropped and an empty input yields a
/// `doc` holding one empty paragraph.
pub fn markdown_to_tree(markdown: &str) -> Node {
    formats::markdown::parser::parse_from_markdown(markdown)
}

/// Serialize a `doc` tree to Markdown.
pub fn tree_to_markdown(tree: &Node) -> Result<String, ConvertError> {
    formats::markdown::serializer::serialize_to_markdown(tree)
}

/// Render a `doc` tree to an HTML fragment, resolving media ids through `media`.
pub fn tree_to_render(tree: &Node, media: &MediaMap) -> Result<RenderOutput, ConvertError> {
    formats::html::render_to_html_default(tree, media)
}
