//! Namespace checks.
//!
//! The document's default namespace must equal the namespace expected for
//! its declared content type. A known-deprecated namespace is CRITICAL even
//! though it parses fine: the importing LMS silently drops the document.
//! Any tree prefix never declared on the root is HIGH.

use super::ContentType;
use crate::consts::{
    ASSIGNMENT_NS, DISCUSSION_NS, DISCUSSION_NS_DEPRECATED, MANIFEST_NAMESPACES, QTI_NS,
    QTI_NS_DEPRECATED,
};
use crate::common::xml::XmlElement;
use crate::model::{Severity, ValidationIssue, ValidationResult};
use std::collections::BTreeSet;

fn expected_namespaces(content_type: ContentType) -> &'static [&'static str] {
    match content_type {
        ContentType::Assignment => &[ASSIGNMENT_NS],
        ContentType::Discussion => &[DISCUSSION_NS],
        ContentType::Quiz => &[QTI_NS],
        ContentType::Manifest => MANIFEST_NAMESPACES,
    }
}

fn deprecated_namespaces(content_type: ContentType) -> &'static [&'static str] {
    match content_type {
        ContentType::Discussion => DISCUSSION_NS_DEPRECATED,
        ContentType::Quiz => QTI_NS_DEPRECATED,
        _ => &[],
    }
}

/// Check the default namespace and prefix declarations of `root`.
pub fn check(root: &XmlElement, content_type: ContentType) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let expected = expected_namespaces(content_type);

    match root.default_namespace() {
        None => {
            result.push(
                ValidationIssue::new(
                    Severity::Critical,
                    "NS_MISSING",
                    "Document declares no default namespace",
                )
                .with_element(root.local.clone())
                .with_suggestion(format!("Declare xmlns=\"{}\"", expected[0])),
            );
        },
        Some(ns) if deprecated_namespaces(content_type).contains(&ns) => {
            result.push(
                ValidationIssue::new(
                    Severity::Critical,
                    "NS_DEPRECATED",
                    format!("Namespace {ns} is deprecated and breaks import"),
                )
                .with_element(root.local.clone())
                .with_suggestion(format!("Migrate to {}", expected[0])),
            );
        },
        Some(ns) if !expected.contains(&ns) => {
            result.push(
                ValidationIssue::new(
                    Severity::Critical,
                    "NS_MISMATCH",
                    format!("Expected namespace {}, got {ns}", expected[0]),
                )
                .with_element(root.local.clone()),
            );
        },
        Some(_) => {},
    }

    // Prefixes used anywhere in the tree must be declared on the root.
    // `xml` is implicitly declared by the XML spec itself.
    let declared = root.declared_prefixes();
    let mut used: BTreeSet<&str> = BTreeSet::new();
    root.walk(&mut |element| {
        if let Some(prefix) = &element.prefix {
            used.insert(prefix);
        }
        for attribute in &element.attributes {
            if let Some((prefix, _)) = attribute.name.split_once(':') {
                if prefix != "xmlns" {
                    used.insert(prefix);
                }
            }
        }
    });
    for prefix in used {
        if prefix != "xml" && !declared.contains(prefix) {
            result.push(
                ValidationIssue::new(
                    Severity::High,
                    "NS_UNDECLARED_PREFIX",
                    format!("Prefix '{prefix}' is used but never declared on the root element"),
                )
                .with_suggestion(format!("Add an xmlns:{prefix} declaration to the root")),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse_document;

    #[test]
    fn test_missing_default_namespace() {
        let root = parse_document("<topic/>").unwrap();
        let result = check(&root, ContentType::Discussion);
        assert_eq!(result.issues[0].code, "NS_MISSING");
        assert_eq!(result.issues[0].severity, Severity::Critical);
    }

    #[test]
    fn test_deprecated_namespace_is_critical() {
        let xml = format!("<topic xmlns=\"{}\"/>", DISCUSSION_NS_DEPRECATED[0]);
        let root = parse_document(&xml).unwrap();
        let result = check(&root, ContentType::Discussion);
        assert_eq!(result.issues[0].code, "NS_DEPRECATED");
        assert_eq!(result.issues[0].severity, Severity::Critical);
    }

    #[test]
    fn test_mismatched_namespace() {
        let root = parse_document("<topic xmlns=\"urn:wrong\"/>").unwrap();
        let result = check(&root, ContentType::Discussion);
        assert_eq!(result.issues[0].code, "NS_MISMATCH");
    }

    #[test]
    fn test_any_manifest_version_accepted() {
        for ns in MANIFEST_NAMESPACES {
            let xml = format!("<manifest xmlns=\"{ns}\"/>");
            let root = parse_document(&xml).unwrap();
            assert!(check(&root, ContentType::Manifest).issues.is_empty());
        }
    }

    #[test]
    fn test_undeclared_prefix_is_high() {
        let xml = format!("<topic xmlns=\"{DISCUSSION_NS}\"><lom:title xmlns:x=\"urn:x\"/></topic>");
        let root = parse_document(&xml).unwrap();
        let result = check(&root, ContentType::Discussion);
        let issue = result
            .issues
            .iter()
            .find(|i| i.code == "NS_UNDECLARED_PREFIX")
            .unwrap();
        assert_eq!(issue.severity, Severity::High);
        assert!(issue.message.contains("'lom'"));
    }

    #[test]
    fn test_prefix_declared_on_root_is_fine() {
        let xml = format!(
            "<topic xmlns=\"{DISCUSSION_NS}\" xmlns:lom=\"urn:lom\"><lom:title/></topic>"
        );
        let root = parse_document(&xml).unwrap();
        assert!(check(&root, ContentType::Discussion).issues.is_empty());
    }
}
