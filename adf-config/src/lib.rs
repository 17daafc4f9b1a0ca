//! Shared configuration loader for the adf toolchain.
//!
//! `defaults/adf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AdfConfig`].

use adf_babel::formats::html::HtmlOptions;
use adf_babel::formats::markdown::MarkdownOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/adf.default.toml");

/// Top-level configuration consumed by adf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub markdown: MarkdownConfig,
    pub html: HtmlConfig,
}

/// Mirrors [`MarkdownOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub indent_width: usize,
    pub media_placeholder: String,
}

impl From<MarkdownConfig> for MarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        MarkdownOptions {
            indent_width: config.indent_width,
            media_placeholder: config.media_placeholder,
        }
    }
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            indent_width: config.indent_width,
            media_placeholder: config.media_placeholder.clone(),
        }
    }
}

/// Mirrors [`HtmlOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub standalone: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub custom_css: Option<String>,
    pub inline_card_max_length: usize,
    pub media_placeholder: String,
}

impl From<HtmlConfig> for HtmlOptions {
    fn from(config: HtmlConfig) -> Self {
        HtmlOptions {
            standalone: config.standalone,
            title: config.title,
            custom_css: config.custom_css,
            inline_card_max_length: config.inline_card_max_length,
            media_placeholder: config.media_placeholder,
        }
    }
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions::from(config.clone())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AdfConfig, ConfigError> {
    Loader::new().build()
}
