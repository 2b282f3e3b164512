//! Resource classification.
//!
//! The manifest type string decides the category first; `webcontent` and
//! unrecognized vendor types fall back to the entry-point file extension.

use crate::common::xml::XmlElement;
use crate::consts::resource_type;
use crate::model::{ExtractedResource, ResourceCategory};
use phf::phf_map;

static EXTENSION_CATEGORIES: phf::Map<&'static str, ResourceCategory> = phf_map! {
    "html" => ResourceCategory::WebContent,
    "htm" => ResourceCategory::WebContent,
    "pdf" => ResourceCategory::Document,
    "doc" => ResourceCategory::Document,
    "docx" => ResourceCategory::Document,
    "ppt" => ResourceCategory::Document,
    "pptx" => ResourceCategory::Document,
    "xls" => ResourceCategory::Document,
    "xlsx" => ResourceCategory::Document,
    "png" => ResourceCategory::Image,
    "jpg" => ResourceCategory::Image,
    "jpeg" => ResourceCategory::Image,
    "gif" => ResourceCategory::Image,
    "svg" => ResourceCategory::Image,
    "webp" => ResourceCategory::Image,
    "mp3" => ResourceCategory::Media,
    "mp4" => ResourceCategory::Media,
    "m4a" => ResourceCategory::Media,
    "webm" => ResourceCategory::Media,
    "mov" => ResourceCategory::Media,
};

/// Lowercase extension of a path, if it has one.
pub(crate) fn extension(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn category_from_extension(href: Option<&str>) -> Option<ResourceCategory> {
    let ext = extension(href?)?;
    EXTENSION_CATEGORIES.get(&ext).copied()
}

fn classify_one(resource_type: &str, href: Option<&str>) -> ResourceCategory {
    let type_lower = resource_type.to_lowercase();
    if type_lower.starts_with("assignment_xml") || type_lower.contains("assignment") {
        ResourceCategory::Assignment
    } else if type_lower.starts_with("imsdt") {
        ResourceCategory::Discussion
    } else if type_lower.contains("imsqti") || type_lower.ends_with("assessment") {
        ResourceCategory::Quiz
    } else if type_lower.starts_with("imswl") {
        ResourceCategory::WebLink
    } else if type_lower.contains("lti") {
        ResourceCategory::Lti
    } else if type_lower.starts_with("associatedcontent") {
        ResourceCategory::AssociatedContent
    } else if type_lower == resource_type::WEBCONTENT {
        // Refine plain webcontent by the entry-point extension
        category_from_extension(href).unwrap_or(ResourceCategory::WebContent)
    } else {
        category_from_extension(href).unwrap_or(ResourceCategory::Unknown)
    }
}

/// Classify every `<resource>` of a parsed manifest.
///
/// Remediation flags start out clear; the remediation pass fills them in
/// from file content.
pub(crate) fn classify(root: &XmlElement) -> Vec<ExtractedResource> {
    let Some(resources) = root.find_child("resources") else {
        return Vec::new();
    };
    resources
        .children_named("resource")
        .filter_map(|resource| {
            let identifier = resource.attr("identifier")?.to_string();
            let resource_type = resource.attr("type").unwrap_or("").to_string();
            let href = resource.attr("href").map(str::to_string);
            let mut files: Vec<String> = resource
                .children_named("file")
                .filter_map(|file| file.attr("href"))
                .map(str::to_string)
                .collect();
            if let Some(href) = &href {
                if !files.contains(href) {
                    files.insert(0, href.clone());
                }
            }
            let title = resource
                .find_path(&["metadata", "lom", "general", "title", "string"])
                .map(|t| t.text_trimmed().to_string())
                .filter(|t| !t.is_empty());
            Some(ExtractedResource {
                category: classify_one(&resource_type, href.as_deref()),
                identifier,
                resource_type,
                href,
                files,
                title,
                needs_remediation: false,
                remediation_reasons: Vec::new(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse_document;

    #[test]
    fn test_type_string_wins() {
        use crate::consts::ImsccVersion;
        assert_eq!(
            classify_one(resource_type::DISCUSSION, None),
            ResourceCategory::Discussion
        );
        assert_eq!(
            classify_one(ImsccVersion::V1_3.quiz_resource_type(), None),
            ResourceCategory::Quiz
        );
        assert_eq!(
            classify_one(resource_type::ASSIGNMENT, None),
            ResourceCategory::Assignment
        );
        assert_eq!(
            classify_one(resource_type::BASIC_LTI, None),
            ResourceCategory::Lti
        );
        assert_eq!(
            classify_one(resource_type::WEB_LINK, None),
            ResourceCategory::WebLink
        );
        assert_eq!(
            classify_one(resource_type::ASSOCIATED_CONTENT, None),
            ResourceCategory::AssociatedContent
        );
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(
            classify_one("webcontent", Some("files/slides.pdf")),
            ResourceCategory::Document
        );
        assert_eq!(
            classify_one("webcontent", Some("files/logo.PNG")),
            ResourceCategory::Image
        );
        assert_eq!(
            classify_one("webcontent", Some("pages/a.html")),
            ResourceCategory::WebContent
        );
        assert_eq!(
            classify_one("x-vendor-thing", Some("x.bin")),
            ResourceCategory::Unknown
        );
    }

    #[test]
    fn test_classify_collects_files() {
        let root = parse_document(
            r#"<manifest><resources>
                <resource identifier="r1" type="webcontent" href="a.html">
                    <file href="a.html"/>
                    <file href="a.css"/>
                </resource>
                <resource type="webcontent" href="orphan.html"/>
            </resources></manifest>"#,
        )
        .unwrap();
        let resources = classify(&root);
        // The identifier-less resource is dropped
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].files, vec!["a.html", "a.css"]);
        assert_eq!(resources[0].href.as_deref(), Some("a.html"));
    }

    #[test]
    fn test_extension_helper() {
        assert_eq!(extension("a/b/c.HTML").as_deref(), Some("html"));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension("dir.d/noext"), None);
        assert_eq!(extension("trailing."), None);
    }
}
