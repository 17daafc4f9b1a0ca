//! Name-keyed lookup of the converters (`adf`, `markdown`, `html`).
//!
//! The CLI resolves `--from`/`--to` here and falls back to the input file's
//! extension when `--from` is omitted.

use crate::adf::Node;
use crate::error::ConvertError;
use crate::format::Format;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Converters keyed by [`Format::name`].
///
/// ```
/// use adf_babel::FormatRegistry;
///
/// let registry = FormatRegistry::default();
/// let tree = registry.parse("# Title", "markdown").unwrap();
/// let json = registry.serialize(&tree, "adf").unwrap();
/// assert!(json.contains("\"heading\""));
/// ```
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Add `format` under its name, dropping any earlier one with that name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let name = format.name().to_string();
        if self.formats.insert(name.clone(), Box::new(format)).is_some() {
            tracing::debug!(format = %name, "replaced registered format");
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, ConvertError> {
        self.formats
            .get(name)
            .map(|format| format.as_ref())
            .ok_or_else(|| ConvertError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in alphabetical order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Name of the first format claiming `filename`'s extension.
    ///
    /// Extensions compare case-insensitively, so `NOTES.MD` is Markdown.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension()?.to_str()?;
        self.formats
            .values()
            .find(|format| {
                format
                    .file_extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(extension))
            })
            .map(|format| format.name().to_string())
    }

    /// Read `source` into a document tree with the `format` converter.
    pub fn parse(&self, source: &str, format: &str) -> Result<Node, ConvertError> {
        let converter = self.get(format)?;
        if !converter.supports_parsing() {
            return Err(unsupported(format, "parsing"));
        }
        converter.parse(source)
    }

    pub fn serialize(&self, doc: &Node, format: &str) -> Result<String, ConvertError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Write `doc` with the `format` converter. `options` are the `--extra-*`
    /// flags from the command line.
    pub fn serialize_with_options(
        &self,
        doc: &Node,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let converter = self.get(format)?;
        if !converter.supports_serialization() {
            return Err(unsupported(format, "serialization"));
        }
        converter.serialize_with_options(doc, options)
    }

    /// The three built-in converters with default options.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::adf::AdfFormat);
        registry.register(crate::formats::markdown::MarkdownFormat::default());
        registry.register(crate::formats::html::HtmlFormat::default());
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn unsupported(format: &str, operation: &str) -> ConvertError {
    ConvertError::NotSupported(format!("Format '{format}' does not support {operation}"))
}
