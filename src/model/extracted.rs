//! Extraction report types.
//!
//! An `ExtractedCourse` is produced once per extraction run. Provenance
//! fields (`source_lms`, `imscc_version`, `confidence`, `evidence`) are
//! best-effort inferences and never cause extraction to fail.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Known source LMS vendors. Detection always returns a best guess; anything
/// below the scoring threshold is `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceLms {
    Canvas,
    Blackboard,
    Moodle,
    Brightspace,
    Schoology,
    Sakai,
    Generic,
}

impl fmt::Display for SourceLms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceLms::Canvas => "Canvas",
            SourceLms::Blackboard => "Blackboard",
            SourceLms::Moodle => "Moodle",
            SourceLms::Brightspace => "Brightspace",
            SourceLms::Schoology => "Schoology",
            SourceLms::Sakai => "Sakai",
            SourceLms::Generic => "Generic",
        };
        f.write_str(s)
    }
}

/// Coarse classification of a resource's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Assignment,
    Discussion,
    Quiz,
    WebContent,
    WebLink,
    Lti,
    AssociatedContent,
    Document,
    Image,
    Media,
    Unknown,
}

/// One resource as found in an extracted package.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedResource {
    /// Identifier from the manifest
    pub identifier: String,
    /// Raw type string from the manifest, possibly vendor-specific
    pub resource_type: String,
    /// Classified category
    pub category: ResourceCategory,
    /// Entry-point href, if present
    pub href: Option<String>,
    /// All file hrefs listed under this resource
    pub files: Vec<String>,
    /// Title, if the manifest or content carried one
    pub title: Option<String>,
    /// Whether remediation heuristics flagged this resource
    pub needs_remediation: bool,
    /// Why it was flagged, one reason per heuristic hit
    pub remediation_reasons: Vec<String>,
}

/// One node of the extracted organization tree.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationNode {
    /// Item identifier
    pub identifier: String,
    /// Item title, empty if absent
    pub title: String,
    /// Resource reference, if any
    pub identifierref: Option<String>,
    /// Coarse type inferred from depth: root, module, or item
    pub item_type: String,
    /// Child nodes
    pub children: Vec<OrganizationNode>,
}

/// Aggregated remediation counts over all resources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemediationSummary {
    /// Total resources inspected
    pub total_resources: usize,
    /// Resources flagged by at least one heuristic
    pub flagged: usize,
    /// Flag counts keyed by reason category
    pub by_category: BTreeMap<String, usize>,
}

/// Everything learned from one extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedCourse {
    /// Best-guess source LMS
    pub source_lms: SourceLms,
    /// Detected cartridge version string, or "unknown"
    pub imscc_version: String,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    /// Every pattern match that contributed to the LMS guess
    pub evidence: Vec<String>,
    /// Course title (first non-empty metadata lookup), empty if none found
    pub title: String,
    /// Course description, if found
    pub description: Option<String>,
    /// Course language, if found
    pub language: Option<String>,
    /// Resources keyed by identifier
    pub resources: BTreeMap<String, ExtractedResource>,
    /// Organization roots in manifest order
    pub organization: Vec<OrganizationNode>,
    /// File counts keyed by lowercase extension ("" for none)
    pub file_inventory: BTreeMap<String, usize>,
    /// Aggregated remediation flags
    pub remediation: RemediationSummary,
}
