//! Package extractor for `.imscc` archives of unknown origin.
//!
//! `extract` raises only for unrecoverable conditions: an unreadable or
//! invalid archive, a manifest that is absent even after hoisting one
//! wrapper folder, or manifest XML that fails to parse. Everything else -
//! unknown vendor, unknown version, uncertain remediation need - degrades
//! to a best-effort, confidence-scored classification.

mod archive;
mod detection;
mod inventory;
mod metadata;
mod organization;
mod remediation;
mod resources;
mod version;

use crate::common::error::Result;
use crate::common::xml::parse_document;
use crate::model::ExtractedCourse;
use std::path::{Path, PathBuf};

/// Options for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// When set, copy the extracted package tree here before returning
    pub copy_to: Option<PathBuf>,
}

/// Extractor for IMSCC packages.
#[derive(Debug, Default)]
pub struct PackageExtractor;

impl PackageExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract `path` into an [`ExtractedCourse`] report.
    ///
    /// Pipeline: unzip, parse the manifest, detect the source LMS and
    /// cartridge version, pull course metadata, build the organization
    /// tree, classify resources, inventory file types, and flag
    /// remediation needs.
    pub fn extract(
        &self,
        path: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<ExtractedCourse> {
        let package = archive::open(path.as_ref())?;
        let manifest = parse_document(&package.manifest_xml)?;

        let detection = detection::detect(&package.manifest_xml, &manifest, &package.entry_names);
        let imscc_version = version::detect(&manifest);
        let (title, description, language) = metadata::extract(&manifest);
        let organization = organization::build(&manifest);
        let classified = resources::classify(&manifest);
        let file_inventory = inventory::build(&package.entry_names);
        let (resources, remediation) = remediation::assess(classified, &package.root);

        if let Some(dest) = &options.copy_to {
            archive::copy_out(&package.root, dest)?;
        }

        Ok(ExtractedCourse {
            source_lms: detection.source_lms,
            imscc_version,
            confidence: detection.confidence,
            evidence: detection.evidence,
            title,
            description,
            language,
            resources,
            organization,
            file_inventory,
            remediation,
        })
    }
}
