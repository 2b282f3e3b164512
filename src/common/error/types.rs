//! Unified error type for the imscc library.
//!
//! Compilers reject invalid input with a specific error before emitting any
//! XML; the extractor raises only for unrecoverable archive or manifest
//! problems. Content defects found by validators are not errors at all, they
//! are accumulated in a `ValidationResult`.
use thiserror::Error;

/// Main error type for imscc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Compiler precondition violated
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Quiz question violates its structural rule
    #[error("Invalid question {ident}: {reason}")]
    InvalidQuestion { ident: String, reason: String },

    /// Manifest failed one or more pre-emission checks.
    /// Every violation is listed, one per line.
    #[error("Manifest pre-emission checks failed:\n{0}")]
    ManifestInvalid(String),

    /// File is not a readable ZIP archive
    #[error("Invalid package archive: {0}")]
    InvalidArchive(String),

    /// No imsmanifest.xml found in the package
    #[error("Manifest not found: {0}")]
    ManifestNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for imscc operations.
pub type Result<T> = std::result::Result<T, Error>;
