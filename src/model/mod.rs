//! Document model value types.
//!
//! Everything here is a plain immutable value: constructed by a caller or an
//! extraction run, handed to a compiler or validator, and never mutated in
//! place. Compilers consume `Resource`/`OrganizationItem`/`QuizQuestion`
//! inputs; validators and the extractor produce `ValidationResult` and
//! `ExtractedCourse` reports.

pub mod extracted;
pub mod issue;
pub mod question;
pub mod resource;

pub use extracted::{
    ExtractedCourse, ExtractedResource, OrganizationNode, RemediationSummary, ResourceCategory,
    SourceLms,
};
pub use issue::{Severity, ValidationIssue, ValidationResult};
pub use question::{Choice, QuestionKind, QuizQuestion};
pub use resource::{ManifestDescriptor, OrganizationItem, Resource};
