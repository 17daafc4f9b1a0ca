//! The ADF document tree shared by every converter.
//!
//! The tree is plain data: converters read it and build fresh output, nothing
//! is mutated in place. The JSON wire form (`{"type": "doc", "attrs":
//! {"version": 1}, "content": [...]}`) is handled by serde through the loose
//! structs in `wire`.

pub mod nodes;
mod wire;

pub use nodes::{Mark, Node, SubSupType};
pub use wire::{DEFAULT_PANEL_TYPE, DOC_VERSION};

use crate::error::ConvertError;

/// Text that stands in for media nodes in the Markdown and HTML outputs.
pub const DEFAULT_MEDIA_PLACEHOLDER: &str = "[Media]";

/// Summary line for expands without a title.
pub const DEFAULT_EXPAND_TITLE: &str = "Details";

/// Decode a document tree from its JSON wire form.
///
/// Unknown node/mark kinds and missing attributes are tolerated; input that is
/// not a JSON node object at all is an [`ConvertError::InvalidInput`].
pub fn parse_tree_json(source: &str) -> Result<Node, ConvertError> {
    Ok(serde_json::from_str(source)?)
}

/// Encode a document tree as pretty-printed JSON.
pub fn tree_to_json(node: &Node) -> Result<String, ConvertError> {
    serde_json::to_string_pretty(node)
        .map_err(|e| ConvertError::SerializationError(format!("JSON encoding failed: {e}")))
}

/// Reject anything but a `doc` root before a tree-consuming conversion.
pub(crate) fn expect_doc(node: &Node) -> Result<&[Node], ConvertError> {
    match node {
        Node::Doc { content } => Ok(content),
        other => Err(ConvertError::InvalidRoot {
            found: other.kind().to_string(),
        }),
    }
}
