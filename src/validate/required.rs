//! Required-element checks.
//!
//! Each document type has a fixed set of children the importing LMS reads
//! unconditionally; a missing one is HIGH. Attribute-level requirements
//! (`texttype`, `points_possible`) are quality defects rather than outright
//! breakage, so they grade MEDIUM.

use super::ContentType;
use crate::common::xml::XmlElement;
use crate::model::{Severity, ValidationIssue, ValidationResult};

fn required_children(content_type: ContentType) -> &'static [&'static str] {
    match content_type {
        ContentType::Assignment => &[
            "title",
            "instructor_text",
            "submission_formats",
            "gradable",
        ],
        ContentType::Discussion => &["title", "text"],
        ContentType::Quiz => &["assessment"],
        ContentType::Manifest => &["metadata", "organizations", "resources"],
    }
}

/// Check that every required child of the root is present.
pub fn check(root: &XmlElement, content_type: ContentType) -> ValidationResult {
    let mut result = ValidationResult::ok();

    // Root mismatch is reported separately; requiring children of the wrong
    // root would only produce noise on top of it.
    if root.local != content_type.expected_root() {
        return result;
    }

    for child in required_children(content_type) {
        if root.find_child(child).is_none() {
            result.push(
                ValidationIssue::new(
                    Severity::High,
                    "MISSING_ELEMENT",
                    format!("Required element <{child}> is missing"),
                )
                .with_element(format!("{}/{child}", root.local)),
            );
        }
    }

    // Attribute requirements on elements that are present
    match content_type {
        ContentType::Assignment => {
            check_attr(&mut result, root, "instructor_text", "texttype");
            check_attr(&mut result, root, "gradable", "points_possible");
        },
        ContentType::Discussion => {
            check_attr(&mut result, root, "text", "texttype");
        },
        ContentType::Quiz => {
            if let Some(assessment) = root.find_child("assessment") {
                for attr in ["ident", "title"] {
                    if assessment.attr(attr).is_none() {
                        result.push(
                            ValidationIssue::new(
                                Severity::Medium,
                                "MISSING_ATTRIBUTE",
                                format!("<assessment> is missing the {attr} attribute"),
                            )
                            .with_element("assessment".to_string()),
                        );
                    }
                }
            }
        },
        ContentType::Manifest => {
            if root.attr("identifier").is_none() {
                result.push(
                    ValidationIssue::new(
                        Severity::Medium,
                        "MISSING_ATTRIBUTE",
                        "<manifest> is missing the identifier attribute",
                    )
                    .with_element("manifest".to_string()),
                );
            }
        },
    }

    result
}

fn check_attr(result: &mut ValidationResult, root: &XmlElement, child: &str, attr: &str) {
    if let Some(element) = root.find_child(child) {
        if element.attr(attr).is_none() {
            result.push(
                ValidationIssue::new(
                    Severity::Medium,
                    "MISSING_ATTRIBUTE",
                    format!("<{child}> is missing the {attr} attribute"),
                )
                .with_element(child.to_string()),
            );
        }
    }
}
