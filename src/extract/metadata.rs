//! Course metadata lookup.
//!
//! Title, description, and language live in different places depending on
//! which LMS exported the package, so each field has an ordered list of
//! lookup paths and the first non-empty hit wins.

use crate::common::xml::XmlElement;

const TITLE_PATHS: &[&[&str]] = &[
    &["metadata", "lom", "general", "title", "string"],
    &["metadata", "lom", "general", "title", "langstring"],
    &["metadata", "title"],
    &["organizations", "organization", "title"],
];

const DESCRIPTION_PATHS: &[&[&str]] = &[
    &["metadata", "lom", "general", "description", "string"],
    &["metadata", "lom", "general", "description", "langstring"],
    &["metadata", "description"],
];

const LANGUAGE_PATHS: &[&[&str]] = &[
    &["metadata", "lom", "general", "language"],
    &["metadata", "language"],
];

fn first_non_empty(root: &XmlElement, paths: &[&[&str]]) -> Option<String> {
    for path in paths {
        if let Some(element) = root.find_path(path) {
            let text = element.text_trimmed();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Extract (title, description, language) from a parsed manifest.
pub(crate) fn extract(root: &XmlElement) -> (String, Option<String>, Option<String>) {
    let title = first_non_empty(root, TITLE_PATHS).unwrap_or_default();
    let description = first_non_empty(root, DESCRIPTION_PATHS);
    let language = first_non_empty(root, LANGUAGE_PATHS);
    (title, description, language)
}
