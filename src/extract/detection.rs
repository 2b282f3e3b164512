//! Source-LMS detection.
//!
//! Data-driven scoring over a fixed vendor table: a namespace-token hit
//! contributes +0.4, a manifest-text hit +0.3, and file-name hits +0.2
//! scaled by min(count/5, 1). Detection never fails; anything scoring
//! under 0.2 is classified Generic with fixed confidence 0.5. Every
//! contributing match is kept as an evidence string.

use crate::common::xml::XmlElement;
use crate::model::SourceLms;
use smallvec::SmallVec;

/// Outcome of one detection run.
pub(crate) struct Detection {
    pub source_lms: SourceLms,
    pub confidence: f64,
    pub evidence: Vec<String>,
}

struct VendorSignature {
    vendor: SourceLms,
    /// Substrings matched against xmlns declaration values
    namespace_tokens: &'static [&'static str],
    /// Substrings matched against the lowercased manifest text
    text_patterns: &'static [&'static str],
    /// Substrings matched against lowercased file paths
    file_patterns: &'static [&'static str],
}

static VENDOR_SIGNATURES: &[VendorSignature] = &[
    VendorSignature {
        vendor: SourceLms::Canvas,
        namespace_tokens: &["canvas.instructure.com"],
        text_patterns: &["canvas_export", "instructure"],
        file_patterns: &["course_settings", "canvas_export", "assignment_groups"],
    },
    VendorSignature {
        vendor: SourceLms::Blackboard,
        namespace_tokens: &["blackboard.com"],
        text_patterns: &["blackboard", "bb-manifest"],
        file_patterns: &["res00", "csfiles", ".dat"],
    },
    VendorSignature {
        vendor: SourceLms::Moodle,
        namespace_tokens: &["moodle.org", "moodle2"],
        text_patterns: &["moodlebackup", "moodle"],
        file_patterns: &["moodle_backup", "moodle"],
    },
    VendorSignature {
        vendor: SourceLms::Brightspace,
        namespace_tokens: &["desire2learn.com"],
        text_patterns: &["desire2learn", "brightspace", "d2l_"],
        file_patterns: &["d2l"],
    },
    VendorSignature {
        vendor: SourceLms::Schoology,
        namespace_tokens: &["schoology.com"],
        text_patterns: &["schoology"],
        file_patterns: &["schoology"],
    },
    VendorSignature {
        vendor: SourceLms::Sakai,
        namespace_tokens: &["sakaiproject.org"],
        text_patterns: &["sakai"],
        file_patterns: &["sakai"],
    },
];

const NAMESPACE_WEIGHT: f64 = 0.4;
const TEXT_WEIGHT: f64 = 0.3;
const FILE_WEIGHT: f64 = 0.2;
const THRESHOLD: f64 = 0.2;
const GENERIC_CONFIDENCE: f64 = 0.5;

/// Score every known vendor and return the best guess. Never fails.
pub(crate) fn detect(manifest_text: &str, root: &XmlElement, files: &[String]) -> Detection {
    // Namespace declaration values from anywhere in the tree
    let mut namespaces: Vec<&str> = Vec::new();
    root.walk(&mut |element| {
        for attribute in &element.attributes {
            if attribute.name == "xmlns" || attribute.name.starts_with("xmlns:") {
                namespaces.push(&attribute.value);
            }
        }
    });

    let manifest_lower = manifest_text.to_lowercase();
    let files_lower: Vec<String> = files.iter().map(|f| f.to_lowercase()).collect();

    let mut best: Option<(f64, SourceLms, Vec<String>)> = None;
    for signature in VENDOR_SIGNATURES {
        let mut score = 0.0;
        let mut evidence: SmallVec<[String; 4]> = SmallVec::new();

        if let Some(token) = signature
            .namespace_tokens
            .iter()
            .find(|token| namespaces.iter().any(|ns| ns.contains(*token)))
        {
            score += NAMESPACE_WEIGHT;
            evidence.push(format!("namespace token \"{token}\""));
        }

        if let Some(pattern) = signature
            .text_patterns
            .iter()
            .find(|pattern| manifest_lower.contains(*pattern))
        {
            score += TEXT_WEIGHT;
            evidence.push(format!("manifest text pattern \"{pattern}\""));
        }

        let mut file_matches = 0usize;
        for file in &files_lower {
            if let Some(pattern) = signature
                .file_patterns
                .iter()
                .find(|pattern| file.contains(*pattern))
            {
                file_matches += 1;
                evidence.push(format!("file \"{file}\" matches \"{pattern}\""));
            }
        }
        if file_matches > 0 {
            score += FILE_WEIGHT * (file_matches as f64 / 5.0).min(1.0);
        }

        let better = match &best {
            Some((best_score, ..)) => score > *best_score,
            None => true,
        };
        if better {
            best = Some((score, signature.vendor, evidence.into_vec()));
        }
    }

    match best {
        Some((score, vendor, evidence)) if score >= THRESHOLD => Detection {
            source_lms: vendor,
            confidence: score.min(1.0),
            evidence,
        },
        Some((_, _, evidence)) => Detection {
            source_lms: SourceLms::Generic,
            confidence: GENERIC_CONFIDENCE,
            evidence,
        },
        None => Detection {
            source_lms: SourceLms::Generic,
            confidence: GENERIC_CONFIDENCE,
            evidence: Vec::new(),
        },
    }
}
