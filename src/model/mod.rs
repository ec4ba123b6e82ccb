//! Attribute model: the component tree the sync layer reads and writes,
//! its attribute vocabulary, and the TOML document format

pub mod attrs;
pub mod document;
pub mod tree;

pub use attrs::Namespace;
pub use document::{Document, DocumentError};
pub use tree::{Component, ComponentId, ComponentTree, Geometry};
