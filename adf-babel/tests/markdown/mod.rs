//! Markdown format tests
//!
//! Tests for tree → Markdown export, Markdown → tree import and the round trip between them.

mod export;
mod properties;
mod table;
