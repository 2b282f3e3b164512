//! Imscc - A Rust library for authoring, validating, and extracting
//! IMS Common Cartridge (IMSCC) course packages
//!
//! This library covers the three sides of the Common Cartridge lifecycle:
//!
//! - **Compilers**: emit assignment, discussion-topic, QTI 1.2 quiz, and
//!   manifest documents from caller-built model objects
//! - **Validators**: run namespace, root-element, required-element,
//!   reference-integrity, and QTI structure checks over arbitrary XML and
//!   return a complete severity-graded issue list
//! - **Extractor**: ingest an `.imscc` archive of unknown origin, infer the
//!   source LMS and cartridge version, and report per-resource remediation
//!   needs
//!
//! # Example - Compiling a discussion topic
//!
//! ```
//! use imscc::compile::discussion::{DiscussionCompiler, DiscussionOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let compiler = DiscussionCompiler::new();
//! let xml = compiler.compile(
//!     "Week 1 Discussion",
//!     "<p>Introduce yourself.</p>",
//!     &DiscussionOptions::default(),
//! )?;
//! assert!(xml.contains("<topic"));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Validating a manifest
//!
//! ```
//! use imscc::validate::{ContentType, ValidationOptions, Validator};
//!
//! let validator = Validator::new();
//! let result = validator.validate(
//!     "<manifest identifier=\"m1\"/>",
//!     ContentType::Manifest,
//!     &ValidationOptions::default(),
//! );
//! // A bare manifest parses but is far from compliant.
//! assert!(!result.issues.is_empty());
//! ```
//!
//! # Example - Extracting a package
//!
//! ```no_run
//! use imscc::extract::{ExtractOptions, PackageExtractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = PackageExtractor::new();
//! let course = extractor.extract("course.imscc", &ExtractOptions::default())?;
//! println!("{} ({:?}, confidence {:.2})",
//!     course.title, course.source_lms, course.confidence);
//! # Ok(())
//! # }
//! ```

/// Shared utilities: unified error type, XML escaping, identifier generation,
/// and the lightweight element tree used by validators and the extractor.
pub mod common;

/// Namespace URIs, resource-type vocabulary, and version tables.
pub mod consts;

/// Document model value types shared by compilers, validators, and the
/// extractor.
pub mod model;

/// Fail-fast compilers for assignment, discussion, quiz, and manifest
/// documents.
pub mod compile;

/// Accumulating validators over parsed XML.
pub mod validate;

/// Package extractor for `.imscc` archives of unknown origin.
pub mod extract;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use model::{
    Choice, ManifestDescriptor, OrganizationItem, QuizQuestion, Resource, Severity,
    ValidationIssue, ValidationResult,
};
