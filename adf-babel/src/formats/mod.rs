//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document tree and its text representations.

pub mod adf;
pub mod html;
pub mod markdown;

pub use adf::AdfFormat;
pub use html::{get_default_css, HtmlFormat, HtmlOptions, MediaMap, RenderOutput};
pub use markdown::{MarkdownFormat, MarkdownOptions};
