//! Manifest reference-integrity checks.
//!
//! Every `identifierref` in the organization tree must name a defined
//! resource; duplicate resource identifiers are each reported; resource
//! types that require content must carry a non-empty `href`.

use crate::common::xml::XmlElement;
use crate::consts::type_requires_content;
use crate::model::{Severity, ValidationIssue, ValidationResult};
use std::collections::HashSet;

/// Check reference integrity of a parsed manifest.
pub fn check(root: &XmlElement) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let mut resource_ids: HashSet<&str> = HashSet::new();
    if let Some(resources) = root.find_child("resources") {
        for resource in resources.children_named("resource") {
            let Some(identifier) = resource.attr("identifier") else {
                result.push(
                    ValidationIssue::new(
                        Severity::High,
                        "MISSING_IDENTIFIER",
                        "<resource> without an identifier attribute",
                    )
                    .with_element("resource".to_string()),
                );
                continue;
            };
            if !resource_ids.insert(identifier) {
                result.push(
                    ValidationIssue::new(
                        Severity::High,
                        "DUPLICATE_IDENTIFIER",
                        format!("Duplicate resource identifier {identifier}"),
                    )
                    .with_element(identifier.to_string()),
                );
            }
            if let Some(resource_type) = resource.attr("type") {
                if type_requires_content(resource_type)
                    && resource.attr("href").is_none_or(str::is_empty)
                {
                    result.push(
                        ValidationIssue::new(
                            Severity::High,
                            "MISSING_HREF",
                            format!(
                                "Resource {identifier} has type {resource_type} but no href"
                            ),
                        )
                        .with_element(identifier.to_string()),
                    );
                }
            }
        }
    }

    if let Some(organizations) = root.find_child("organizations") {
        organizations.walk(&mut |element| {
            if element.local != "item" {
                return;
            }
            if let Some(identifierref) = element.attr("identifierref") {
                if !identifierref.is_empty() && !resource_ids.contains(identifierref) {
                    result.push(
                        ValidationIssue::new(
                            Severity::High,
                            "UNRESOLVED_REFERENCE",
                            format!(
                                "Item references resource {identifierref}, which is not defined"
                            ),
                        )
                        .with_element(identifierref.to_string()),
                    );
                }
            }
        });
    }

    result
}
