//! Root element check.
//!
//! The root local name must exactly equal the tag expected for the declared
//! content type. The classic mistake is `discussion` instead of `topic`;
//! that one gets its own suggestion.

use super::ContentType;
use crate::common::xml::XmlElement;
use crate::model::{Severity, ValidationIssue, ValidationResult};

/// Check the root element's local name against the content type.
pub fn check(root: &XmlElement, content_type: ContentType) -> ValidationResult {
    let expected = content_type.expected_root();
    if root.local == expected {
        return ValidationResult::ok();
    }

    let mut issue = ValidationIssue::new(
        Severity::Critical,
        "ROOT_MISMATCH",
        format!("Expected root element <{expected}>, got <{}>", root.local),
    )
    .with_element(root.local.clone());
    if content_type == ContentType::Discussion && root.local == "discussion" {
        issue = issue.with_suggestion(
            "Discussion documents use root <topic>, never <discussion>",
        );
    }
    ValidationResult::from_issue(issue)
}
