//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur while converting documents
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// A tree-consuming converter was handed something other than a `doc` node
    #[error("Invalid input: expected a 'doc' root node, found '{found}'")]
    InvalidRoot { found: String },
    /// The input is not a document tree at all (e.g. malformed JSON)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::InvalidInput(err.to_string())
    }
}
