//! Unified error types for the imscc library.

mod conversions;
mod types;

pub use types::{Error, Result};
