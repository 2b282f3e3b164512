//! Fail-fast document compilers.
//!
//! Every compiler checks its preconditions before emitting a single byte of
//! XML: an invalid input produces a specific error and no partial document,
//! ever. Output is deterministic for identical inputs modulo generated
//! identifiers.

pub mod assignment;
pub mod discussion;
pub mod graph;
pub mod manifest;
pub mod quiz;

pub use assignment::{AssignmentCompiler, AssignmentOptions};
pub use discussion::{DiscussionCompiler, DiscussionOptions};
pub use manifest::{ManifestCompiler, ManifestOptions};
pub use quiz::{QuizCompiler, QuizOptions};

use crate::common::error::{Error, Result};

/// Standard XML declaration emitted at the top of every document.
pub(crate) const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub(crate) const MAX_TITLE_LEN: usize = 255;
pub(crate) const MAX_BODY_LEN: usize = 1 << 20; // 1 MiB of HTML is already pathological
pub(crate) const MAX_POINTS: f64 = 1_000_000.0;

/// Format a points value as the 9-decimal fixed-point string the target LMS
/// expects in `points_possible` attributes.
///
/// ```
/// use imscc::compile::format_points;
/// assert_eq!(format_points(100.0), "100.000000000");
/// assert_eq!(format_points(2.5), "2.500000000");
/// ```
pub fn format_points(points: f64) -> String {
    format!("{points:.9}")
}

/// Reject blank or oversized titles.
pub(crate) fn check_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("title must not be blank".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::InvalidInput(format!(
            "title exceeds {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Reject blank or oversized HTML bodies.
pub(crate) fn check_body(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(Error::InvalidInput("body must not be blank".to_string()));
    }
    if body.len() > MAX_BODY_LEN {
        return Err(Error::InvalidInput(format!(
            "body exceeds {MAX_BODY_LEN} bytes"
        )));
    }
    Ok(())
}

/// Reject out-of-range points values.
pub(crate) fn check_points(points: f64) -> Result<()> {
    if !points.is_finite() || !(0.0..=MAX_POINTS).contains(&points) {
        return Err(Error::InvalidInput(format!(
            "points must be between 0 and {MAX_POINTS}, got {points}"
        )));
    }
    Ok(())
}

/// Path-traversal guard for attachment paths.
///
/// Attachments must be package-relative: absolute paths and any
/// parent-directory segment are rejected.
pub(crate) fn check_attachment_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidInput("attachment path must not be empty".to_string()));
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(Error::InvalidInput(format!(
            "attachment path must be relative: {path}"
        )));
    }
    // Windows drive prefix, e.g. C:\
    if path.as_bytes().get(1) == Some(&b':') {
        return Err(Error::InvalidInput(format!(
            "attachment path must be relative: {path}"
        )));
    }
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(Error::InvalidInput(format!(
            "attachment path must not contain parent-directory segments: {path}"
        )));
    }
    Ok(())
}
