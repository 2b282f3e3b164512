//! XML utilities: escaping and the lightweight element tree.

pub mod escape;
pub mod tree;

pub use escape::{escape_attribute, escape_content, unescape_attribute, unescape_content};
pub use tree::{XmlAttribute, XmlElement, parse_document};
