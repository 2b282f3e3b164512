//! Accumulating validators over parsed XML.
//!
//! Every validator parses first: a non-well-formed document short-circuits
//! to a single CRITICAL issue. After that nothing is fail-fast; each check
//! merges its findings into one `ValidationResult`, because diagnosing a
//! failed LMS import requires the complete defect list in one pass.

pub mod namespace;
pub mod qti;
pub mod references;
pub mod required;
pub mod root;

use crate::common::xml::parse_document;
use crate::model::{Severity, ValidationIssue, ValidationResult};

/// Declared content type of a document under validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Assignment,
    Discussion,
    Quiz,
    Manifest,
}

impl ContentType {
    /// Expected root element local name.
    pub fn expected_root(&self) -> &'static str {
        match self {
            ContentType::Assignment => "assignment",
            ContentType::Discussion => "topic",
            ContentType::Quiz => "questestinterop",
            ContentType::Manifest => "manifest",
        }
    }
}

/// Options shared by all validation passes.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Treat HIGH issues as failing in [`Validator::passes`]
    pub strict: bool,
    /// Run manifest reference-integrity checks
    pub check_references: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strict: false,
            check_references: true,
        }
    }
}

/// Facade running every applicable check for a content type.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `xml` as a document of the given content type.
    ///
    /// Never fails: content defects come back as issues. The only
    /// short-circuit is a parse failure, reported as one CRITICAL issue.
    pub fn validate(
        &self,
        xml: &str,
        content_type: ContentType,
        options: &ValidationOptions,
    ) -> ValidationResult {
        let root = match parse_document(xml) {
            Ok(root) => root,
            Err(e) => {
                return ValidationResult::from_issue(
                    ValidationIssue::new(
                        Severity::Critical,
                        "XML_NOT_WELL_FORMED",
                        format!("Document is not well-formed XML: {e}"),
                    )
                    .with_suggestion("Fix the XML syntax before any other check can run"),
                );
            },
        };

        let mut result = namespace::check(&root, content_type)
            .merge(root::check(&root, content_type))
            .merge(required::check(&root, content_type));

        match content_type {
            ContentType::Manifest if options.check_references => {
                result = result.merge(references::check(&root));
            },
            ContentType::Quiz => {
                result = result.merge(qti::check(&root));
            },
            _ => {},
        }
        result
    }

    /// Whether `result` passes under the chosen policy: zero CRITICAL, and
    /// under `strict` also zero HIGH.
    pub fn passes(&self, result: &ValidationResult, options: &ValidationOptions) -> bool {
        if options.strict {
            result.is_strictly_compliant()
        } else {
            result.is_compliant()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{
        AssignmentCompiler, AssignmentOptions, DiscussionCompiler, DiscussionOptions,
        ManifestCompiler, ManifestOptions, QuizCompiler, QuizOptions,
    };
    use crate::model::{Choice, ManifestDescriptor, QuestionKind, QuizQuestion, Resource};

    #[test]
    fn test_malformed_xml_is_single_critical() {
        let result = Validator::new().validate(
            "<topic><unclosed></topic>",
            ContentType::Discussion,
            &ValidationOptions::default(),
        );
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, "XML_NOT_WELL_FORMED");
        assert_eq!(result.issues[0].severity, Severity::Critical);
    }

    #[test]
    fn test_fresh_assignment_is_clean() {
        let xml = AssignmentCompiler::new()
            .compile("HW 1", "<p>Body.</p>", &AssignmentOptions::default())
            .unwrap();
        let result = Validator::new().validate(
            &xml,
            ContentType::Assignment,
            &ValidationOptions::default(),
        );
        assert_eq!(result.count(Severity::Critical), 0, "{:?}", result.issues);
        assert_eq!(result.count(Severity::High), 0, "{:?}", result.issues);
    }

    #[test]
    fn test_fresh_discussion_is_clean() {
        let xml = DiscussionCompiler::new()
            .compile("Week 1", "<p>Hi.</p>", &DiscussionOptions::default())
            .unwrap();
        let result = Validator::new().validate(
            &xml,
            ContentType::Discussion,
            &ValidationOptions::default(),
        );
        assert_eq!(result.count(Severity::Critical), 0, "{:?}", result.issues);
        assert_eq!(result.count(Severity::High), 0, "{:?}", result.issues);
    }

    #[test]
    fn test_fresh_quiz_is_clean() {
        let questions = vec![
            QuizQuestion::new("Pick one.", 1.0, QuestionKind::MultipleChoice {
                choices: vec![Choice::new("A", true), Choice::new("B", false)],
            }),
            QuizQuestion::new("Name it.", 1.0, QuestionKind::FillInBlank {
                answers: vec!["Paris".to_string(), "paris".to_string()],
                case_sensitive: false,
            }),
            QuizQuestion::new("Discuss.", 5.0, QuestionKind::Essay {
                solution: Some("Model.".to_string()),
            }),
        ];
        let xml = QuizCompiler::new()
            .compile("Quiz 1", &questions, &QuizOptions::default())
            .unwrap();
        let result =
            Validator::new().validate(&xml, ContentType::Quiz, &ValidationOptions::default());
        assert_eq!(result.count(Severity::Critical), 0, "{:?}", result.issues);
        assert_eq!(result.count(Severity::High), 0, "{:?}", result.issues);
    }

    #[test]
    fn test_fresh_manifest_is_clean() {
        use crate::consts::{ImsccVersion, resource_type};
        let descriptor = ManifestDescriptor::new("im1", "Course", vec![
            Resource::new("r1", resource_type::WEBCONTENT, "a.html").with_title("A"),
            Resource::new("r2", resource_type::DISCUSSION, "d.xml")
                .with_title("D")
                .with_dependency("r1"),
            Resource::new("r3", ImsccVersion::V1_3.quiz_resource_type(), "q.xml")
                .with_title("Q"),
        ]);
        let xml = ManifestCompiler::new()
            .compile(&descriptor, &ManifestOptions::default())
            .unwrap();
        let result =
            Validator::new().validate(&xml, ContentType::Manifest, &ValidationOptions::default());
        assert_eq!(result.count(Severity::Critical), 0, "{:?}", result.issues);
        assert_eq!(result.count(Severity::High), 0, "{:?}", result.issues);
    }

    #[test]
    fn test_strict_policy() {
        let validator = Validator::new();
        let mut result = ValidationResult::ok();
        result.push(ValidationIssue::new(Severity::High, "X", "x"));
        assert!(validator.passes(&result, &ValidationOptions::default()));
        assert!(!validator.passes(&result, &ValidationOptions {
            strict: true,
            ..ValidationOptions::default()
        }));
    }
}
