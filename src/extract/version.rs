//! IMSCC version detection.
//!
//! The version is keyed into the manifest's default namespace; when that is
//! missing or unrecognized, the `<schemaversion>` metadata element is the
//! fallback. Unknown versions degrade to `"unknown"` rather than failing.

use crate::common::xml::XmlElement;

const NAMESPACE_VERSIONS: &[(&str, &str)] = &[
    ("imsccv1p1", "1.1.0"),
    ("imsccv1p2", "1.2.0"),
    ("imsccv1p3", "1.3.0"),
];

/// Best-effort version string for a parsed manifest.
pub(crate) fn detect(root: &XmlElement) -> String {
    if let Some(ns) = root.default_namespace() {
        for (token, version) in NAMESPACE_VERSIONS {
            if ns.contains(token) {
                return (*version).to_string();
            }
        }
    }

    if let Some(schemaversion) = root.find_path(&["metadata", "schemaversion"]) {
        let text = schemaversion.text_trimmed();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse_document;

    #[test]
    fn test_version_from_namespace() {
        for (key, expected) in [
            ("imsccv1p1", "1.1.0"),
            ("imsccv1p2", "1.2.0"),
            ("imsccv1p3", "1.3.0"),
        ] {
            let xml = format!(
                "<manifest xmlns=\"http://www.imsglobal.org/xsd/{key}/imscp_v1p1\"/>"
            );
            let root = parse_document(&xml).unwrap();
            assert_eq!(detect(&root), expected);
        }
    }

    #[test]
    fn test_version_from_schemaversion_fallback() {
        let root = parse_document(
            "<manifest><metadata><schemaversion>1.2.0</schemaversion></metadata></manifest>",
        )
        .unwrap();
        assert_eq!(detect(&root), "1.2.0");
    }

    #[test]
    fn test_unknown_version() {
        let root = parse_document("<manifest xmlns=\"urn:x\"/>").unwrap();
        assert_eq!(detect(&root), "unknown");
    }
}
