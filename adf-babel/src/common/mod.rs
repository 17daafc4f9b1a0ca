//! Conversion helpers shared by several formats.

pub mod links;
pub mod marks;
