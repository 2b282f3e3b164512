//! QTI 1.2 structure checks.
//!
//! Mirrors the quiz compiler's per-kind state machine from the other side:
//! each item's `cc_profile` dictates the response rendering it must carry.
//! A true/false item with a choice count other than two is only MEDIUM,
//! since some LMS tolerate it; duplicate `ident` attributes anywhere are
//! HIGH because response processing resolves idents globally.

use crate::common::xml::XmlElement;
use crate::model::{Severity, ValidationIssue, ValidationResult};
use std::collections::HashMap;

/// Check QTI structure of a parsed `questestinterop` document.
pub fn check(root: &XmlElement) -> ValidationResult {
    let mut result = ValidationResult::ok();

    // Duplicate ident attributes anywhere in the tree
    let mut ident_counts: HashMap<&str, usize> = HashMap::new();
    root.walk(&mut |element| {
        if let Some(ident) = element.attr("ident") {
            *ident_counts.entry(ident).or_insert(0) += 1;
        }
    });
    let mut duplicates: Vec<&str> = ident_counts
        .iter()
        .filter(|&(_, &count)| count > 1)
        .map(|(&ident, _)| ident)
        .collect();
    duplicates.sort_unstable();
    for ident in duplicates {
        result.push(
            ValidationIssue::new(
                Severity::High,
                "QTI_DUPLICATE_IDENT",
                format!("ident \"{ident}\" is used more than once"),
            )
            .with_element(ident.to_string()),
        );
    }

    // Per-item structural rules
    root.walk(&mut |element| {
        if element.local == "item" {
            check_item(&mut result, element);
        }
    });

    result
}

fn item_profile(item: &XmlElement) -> Option<String> {
    let qtimetadata = item.find_path(&["itemmetadata", "qtimetadata"])?;
    for field in qtimetadata.children_named("qtimetadatafield") {
        if field.find_child("fieldlabel").map(XmlElement::text_trimmed) == Some("cc_profile") {
            return field
                .find_child("fieldentry")
                .map(|e| e.text_trimmed().to_string());
        }
    }
    None
}

fn check_item(result: &mut ValidationResult, item: &XmlElement) {
    let ident = item.attr("ident").unwrap_or("(no ident)").to_string();
    let Some(profile) = item_profile(item) else {
        result.push(
            ValidationIssue::new(
                Severity::Medium,
                "QTI_NO_PROFILE",
                format!("Item {ident} carries no cc_profile metadata"),
            )
            .with_element(ident),
        );
        return;
    };

    let presentation = item.find_child("presentation");
    let response_lid = presentation.and_then(|p| p.find_child("response_lid"));
    let response_str = presentation.and_then(|p| p.find_child("response_str"));

    let single_choice = profile.contains("multiple_choice") || profile.contains("true_false");
    let multi_choice = profile.contains("multiple_response");
    let free_text = profile.contains("fib") || profile.contains("essay");

    if single_choice || multi_choice {
        let expected_cardinality = if multi_choice { "Multiple" } else { "Single" };
        match response_lid {
            None => {
                result.push(
                    ValidationIssue::new(
                        Severity::High,
                        "QTI_RESPONSE_TYPE",
                        format!("Item {ident} ({profile}) requires a response_lid rendering"),
                    )
                    .with_element(ident.clone()),
                );
            },
            Some(lid) => {
                let cardinality = lid.attr("rcardinality").unwrap_or("Single");
                if cardinality != expected_cardinality {
                    result.push(
                        ValidationIssue::new(
                            Severity::High,
                            "QTI_CARDINALITY",
                            format!(
                                "Item {ident} ({profile}) requires rcardinality \
                                 {expected_cardinality}, got {cardinality}"
                            ),
                        )
                        .with_element(ident.clone()),
                    );
                }
                if profile.contains("true_false") {
                    let labels = lid
                        .find_child("render_choice")
                        .map(|r| r.children_named("response_label").count())
                        .unwrap_or(0);
                    if labels != 2 {
                        result.push(
                            ValidationIssue::new(
                                Severity::Medium,
                                "QTI_TF_CHOICES",
                                format!(
                                    "True/false item {ident} has {labels} choices instead of 2"
                                ),
                            )
                            .with_element(ident.clone()),
                        );
                    }
                }
            },
        }
    } else if free_text && response_str.is_none() {
        result.push(
            ValidationIssue::new(
                Severity::High,
                "QTI_RESPONSE_TYPE",
                format!("Item {ident} ({profile}) requires a response_str rendering"),
            )
            .with_element(ident.clone()),
        );
    }

    // Scored kinds need response processing; essays are manually scored
    if !profile.contains("essay") && item.find_child("resprocessing").is_none() {
        result.push(
            ValidationIssue::new(
                Severity::Medium,
                "QTI_NO_RESPROCESSING",
                format!("Item {ident} ({profile}) has no resprocessing block"),
            )
            .with_element(ident),
        );
    }
}
