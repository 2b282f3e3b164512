//! Common types and utilities shared across the compile, validate, and
//! extract subsystems.
//!
//! This module provides the unified error type, XML escaping in both
//! attribute and content modes, LMS identifier generation, and the
//! lightweight element tree the validators and extractor parse into.

// Submodule declarations
pub mod error;
pub mod id;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use id::{generate_id, generate_response_id};
pub use xml::{escape_attribute, escape_content, unescape_attribute, unescape_content};
