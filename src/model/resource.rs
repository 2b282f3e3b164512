//! Manifest-side value types: resources, organization items, and the
//! manifest descriptor handed to the manifest compiler.

/// One content unit listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Unique identifier within the manifest (`i` + 32 hex by convention)
    pub identifier: String,
    /// Type string from the fixed Common Cartridge vocabulary
    pub resource_type: String,
    /// Entry-point href; required for content-bearing types
    pub href: String,
    /// Package-relative paths of all files belonging to this resource
    pub files: Vec<String>,
    /// Identifiers of resources this one depends on
    pub dependencies: Vec<String>,
    /// Human-readable title
    pub title: String,
}

impl Resource {
    /// Create a resource with no files or dependencies.
    pub fn new(
        identifier: impl Into<String>,
        resource_type: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        let href = href.into();
        let files = if href.is_empty() {
            Vec::new()
        } else {
            vec![href.clone()]
        };
        Self {
            identifier: identifier.into(),
            resource_type: resource_type.into(),
            href,
            files,
            dependencies: Vec::new(),
            title: String::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a file path.
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add a dependency on another resource's identifier.
    pub fn with_dependency(mut self, identifier: impl Into<String>) -> Self {
        self.dependencies.push(identifier.into());
        self
    }
}

/// A node in the course organization tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationItem {
    /// Unique identifier within the manifest
    pub identifier: String,
    /// Item title shown in the course outline
    pub title: String,
    /// Identifier of the resource this item points at, if any
    pub identifierref: Option<String>,
    /// Child items, arbitrary depth
    pub children: Vec<OrganizationItem>,
}

impl OrganizationItem {
    /// Create a leaf item pointing at a resource.
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        identifierref: Option<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            identifierref,
            children: Vec::new(),
        }
    }

    /// Create a container item with children.
    pub fn with_children(
        identifier: impl Into<String>,
        title: impl Into<String>,
        children: Vec<OrganizationItem>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            identifierref: None,
            children,
        }
    }
}

/// Everything the manifest compiler needs for one emission.
///
/// Assembled transiently just before compiling; the dependency graph induced
/// by `Resource::dependencies` must be acyclic and all identifiers unique,
/// which the compiler verifies before emitting anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDescriptor {
    /// Manifest identifier
    pub identifier: String,
    /// Course title placed in the manifest metadata
    pub course_title: String,
    /// All resources in the package
    pub resources: Vec<Resource>,
    /// Root items of the organization tree; empty means "auto-generate a
    /// flat one-item-per-resource organization"
    pub organization_roots: Vec<OrganizationItem>,
}

impl ManifestDescriptor {
    /// Create a descriptor with no organization; the compiler will generate
    /// a flat one preserving resource order.
    pub fn new(
        identifier: impl Into<String>,
        course_title: impl Into<String>,
        resources: Vec<Resource>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            course_title: course_title.into(),
            resources,
            organization_roots: Vec::new(),
        }
    }
}
