//! Namespace URIs, resource-type vocabulary, and cartridge version tables.
//!
//! Wrong root tags or namespaces break LMS import silently, so every
//! vocabulary string the compilers and validators agree on lives here.

/// Namespace of the assignment extension document.
pub const ASSIGNMENT_NS: &str =
    "http://canvas.instructure.com/xsd/cccv1p0";

/// Namespace of the discussion topic document (v1p3).
pub const DISCUSSION_NS: &str = "http://www.imsglobal.org/xsd/imsccv1p3/imsdt_v1p3";

/// Deprecated discussion namespaces that still parse but break import.
pub const DISCUSSION_NS_DEPRECATED: &[&str] = &[
    "http://www.imsglobal.org/xsd/imsccv1p1/imsdt_v1p1",
    "http://www.imsglobal.org/xsd/imsccv1p2/imsdt_v1p2",
];

/// Namespace of QTI 1.2 assessment documents.
pub const QTI_NS: &str = "http://www.imsglobal.org/xsd/ims_qtiasiv1p2";

/// QTI 2.x namespaces: a different, incompatible vocabulary. Common Cartridge
/// requires 1.2, so these are treated as deprecated for our purposes.
pub const QTI_NS_DEPRECATED: &[&str] = &[
    "http://www.imsglobal.org/xsd/imsqti_v2p0",
    "http://www.imsglobal.org/xsd/imsqti_v2p1",
    "http://www.imsglobal.org/xsd/imsqti_v2p2",
];

/// Supported IMS Common Cartridge versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImsccVersion {
    V1_1,
    V1_2,
    #[default]
    V1_3,
}

impl ImsccVersion {
    /// Dotted version string used in `<schemaversion>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImsccVersion::V1_1 => "1.1.0",
            ImsccVersion::V1_2 => "1.2.0",
            ImsccVersion::V1_3 => "1.3.0",
        }
    }

    /// Default namespace of `<manifest>` for this version.
    pub fn manifest_ns(&self) -> &'static str {
        match self {
            ImsccVersion::V1_1 => "http://www.imsglobal.org/xsd/imsccv1p1/imscp_v1p1",
            ImsccVersion::V1_2 => "http://www.imsglobal.org/xsd/imsccv1p2/imscp_v1p1",
            ImsccVersion::V1_3 => "http://www.imsglobal.org/xsd/imsccv1p3/imscp_v1p1",
        }
    }

    /// LOM manifest-metadata namespace for this version.
    pub fn lom_manifest_ns(&self) -> &'static str {
        match self {
            ImsccVersion::V1_1 => "http://ltsc.ieee.org/xsd/imsccv1p1/LOM/manifest",
            ImsccVersion::V1_2 => "http://ltsc.ieee.org/xsd/imsccv1p2/LOM/manifest",
            ImsccVersion::V1_3 => "http://ltsc.ieee.org/xsd/imsccv1p3/LOM/manifest",
        }
    }

    /// LOM resource-metadata namespace for this version.
    pub fn lom_resource_ns(&self) -> &'static str {
        match self {
            ImsccVersion::V1_1 => "http://ltsc.ieee.org/xsd/imsccv1p1/LOM/resource",
            ImsccVersion::V1_2 => "http://ltsc.ieee.org/xsd/imsccv1p2/LOM/resource",
            ImsccVersion::V1_3 => "http://ltsc.ieee.org/xsd/imsccv1p3/LOM/resource",
        }
    }

    /// Quiz resource type string for this version.
    pub fn quiz_resource_type(&self) -> &'static str {
        match self {
            ImsccVersion::V1_1 => "imsqti_xmlv1p2/imscc_xmlv1p1/assessment",
            ImsccVersion::V1_2 => "imsqti_xmlv1p2/imscc_xmlv1p2/assessment",
            ImsccVersion::V1_3 => "imsqti_xmlv1p2/imscc_xmlv1p3/assessment",
        }
    }
}

/// All manifest namespaces accepted by the namespace validator.
pub const MANIFEST_NAMESPACES: &[&str] = &[
    "http://www.imsglobal.org/xsd/imsccv1p1/imscp_v1p1",
    "http://www.imsglobal.org/xsd/imsccv1p2/imscp_v1p1",
    "http://www.imsglobal.org/xsd/imsccv1p3/imscp_v1p1",
];

/// Resource type strings in the fixed Common Cartridge vocabulary.
pub mod resource_type {
    pub const WEBCONTENT: &str = "webcontent";
    pub const ASSIGNMENT: &str = "assignment_xmlv1p0";
    pub const DISCUSSION: &str = "imsdt_xmlv1p3";
    pub const WEB_LINK: &str = "imswl_xmlv1p3";
    pub const BASIC_LTI: &str = "imsbasiclti_xmlv1p0";
    pub const ASSOCIATED_CONTENT: &str =
        "associatedcontent/imscc_xmlv1p3/learning-application-resource";
}

/// Whether a resource type requires a non-empty `href` pointing at content.
///
/// Quiz types are version-keyed, so this matches on substrings of the fixed
/// vocabulary rather than exact strings.
pub fn type_requires_content(resource_type: &str) -> bool {
    resource_type == resource_type::WEBCONTENT
        || resource_type.starts_with("assignment_xml")
        || resource_type.starts_with("imsdt_xml")
        || resource_type.starts_with("imsqti_xml")
}
