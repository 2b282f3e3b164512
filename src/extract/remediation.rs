//! Remediation-need heuristics.
//!
//! Fixed rules, deliberately coarse: PDF and office documents always need
//! conversion work, images always need an alt-text review, and HTML is
//! flagged only when a lightweight byte scan finds an `<img>` without an
//! `alt=` attribute or no heading tag at all. This is a triage signal for
//! downstream tooling, not an accessibility audit.

use crate::model::{ExtractedResource, RemediationSummary};
use memchr::memmem;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Flags found by scanning one HTML file.
#[derive(Debug, PartialEq)]
pub(crate) struct HtmlScan {
    pub img_missing_alt: bool,
    pub no_heading: bool,
}

/// Scan HTML bytes for the two heuristics.
pub(crate) fn scan_html(content: &[u8]) -> HtmlScan {
    let lower = content.to_ascii_lowercase();

    let mut img_missing_alt = false;
    for position in memmem::find_iter(&lower, b"<img") {
        let tag_end = memchr::memchr(b'>', &lower[position..])
            .map(|offset| position + offset)
            .unwrap_or(lower.len());
        if memmem::find(&lower[position..tag_end], b"alt=").is_none() {
            img_missing_alt = true;
            break;
        }
    }

    let no_heading = !(1..=6u8).any(|level| {
        let tag = [b'<', b'h', b'0' + level];
        memmem::find(&lower, &tag).is_some()
    });

    HtmlScan {
        img_missing_alt,
        no_heading,
    }
}

/// Manifest-supplied file paths are untrusted; anything absolute or with a
/// parent-directory segment must never be joined onto the scratch root.
fn is_package_relative(path: &str) -> bool {
    !path.starts_with('/')
        && !path.starts_with('\\')
        && path.as_bytes().get(1) != Some(&b':')
        && !path.split(['/', '\\']).any(|segment| segment == "..")
}

fn flag(resource: &mut ExtractedResource, counts: &mut BTreeMap<String, usize>, category: &str, reason: String) {
    resource.needs_remediation = true;
    resource.remediation_reasons.push(reason);
    *counts.entry(category.to_string()).or_insert(0) += 1;
}

/// Apply the heuristics to every resource and aggregate the summary.
///
/// `root` is the extracted package root; HTML files that cannot be read are
/// simply not scanned, never an error.
pub(crate) fn assess(
    mut resources: Vec<ExtractedResource>,
    root: &Path,
) -> (BTreeMap<String, ExtractedResource>, RemediationSummary) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let total = resources.len();
    let mut flagged = 0usize;

    for resource in &mut resources {
        let files = resource.files.clone();
        for file in &files {
            let Some(ext) = super::resources::extension(file) else {
                continue;
            };
            if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
                flag(resource, &mut counts, "document", format!("{file}: office/PDF document needs conversion"));
            } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                flag(resource, &mut counts, "image", format!("{file}: image may need alt text"));
            } else if HTML_EXTENSIONS.contains(&ext.as_str()) {
                if !is_package_relative(file) {
                    continue;
                }
                if let Ok(content) = fs::read(root.join(file)) {
                    let scan = scan_html(&content);
                    if scan.img_missing_alt {
                        flag(resource, &mut counts, "html", format!("{file}: <img> without alt attribute"));
                    }
                    if scan.no_heading {
                        flag(resource, &mut counts, "html", format!("{file}: no heading elements"));
                    }
                }
            }
        }
        if resource.needs_remediation {
            flagged += 1;
        }
    }

    let summary = RemediationSummary {
        total_resources: total,
        flagged,
        by_category: counts,
    };
    let map = resources
        .into_iter()
        .map(|r| (r.identifier.clone(), r))
        .collect();
    (map, summary)
}
