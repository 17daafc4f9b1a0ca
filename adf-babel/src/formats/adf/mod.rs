//! ADF JSON format implementation
//!
//! The document tree's own wire form. Parsing rejects input that is not a
//! JSON node object; serialization emits pretty-printed JSON.

use crate::adf::{parse_tree_json, tree_to_json, Node};
use crate::error::ConvertError;
use crate::format::Format;

/// Format implementation for ADF JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct AdfFormat;

impl Format for AdfFormat {
    fn name(&self) -> &str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format (JSON document tree)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "adf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, ConvertError> {
        parse_tree_json(source)
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        tree_to_json(doc)
    }
}
