//! Manifest compiler.
//!
//! Aggregates resources and the organization tree into `imsmanifest.xml`.
//! Before emitting anything it runs every pre-emission check and reports
//! all violations in a single error: duplicate identifiers, missing
//! content hrefs, unresolvable item references, dependency cycles, and
//! (when a base directory is supplied) missing referenced files.

use super::{XML_DECL, graph};
use crate::common::error::{Error, Result};
use crate::common::id::generate_id;
use crate::common::xml::{escape_attribute, escape_content};
use crate::consts::{ImsccVersion, type_requires_content};
use crate::model::{ManifestDescriptor, OrganizationItem, Resource};
use std::collections::HashSet;
use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

/// Options for one manifest compilation.
#[derive(Debug, Clone, Default)]
pub struct ManifestOptions {
    /// Cartridge version; keys the manifest namespaces and schema version
    pub version: ImsccVersion,
    /// When set, every referenced file must exist under this directory
    pub base_dir: Option<PathBuf>,
}

/// Compiler for `imsmanifest.xml` documents.
#[derive(Debug, Default)]
pub struct ManifestCompiler;

impl ManifestCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile one manifest.
    ///
    /// All pre-emission violations are aggregated into a single
    /// `Error::ManifestInvalid`, one violation per line, so a caller fixing
    /// a broken package sees the complete list at once.
    pub fn compile(
        &self,
        descriptor: &ManifestDescriptor,
        options: &ManifestOptions,
    ) -> Result<String> {
        let violations = self.check(descriptor, options);
        if !violations.is_empty() {
            return Err(Error::ManifestInvalid(violations.join("\n")));
        }

        let version = options.version;
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECL);
        write!(
            xml,
            "<manifest identifier=\"{}\" xmlns=\"{}\" xmlns:lom=\"{}\" xmlns:lomimscc=\"{}\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
            escape_attribute(&descriptor.identifier),
            version.manifest_ns(),
            version.lom_resource_ns(),
            version.lom_manifest_ns()
        )?;

        // metadata
        xml.push_str("<metadata><schema>IMS Common Cartridge</schema>");
        write!(xml, "<schemaversion>{}</schemaversion>", version.as_str())?;
        write!(
            xml,
            "<lomimscc:lom><lomimscc:general><lomimscc:title><lomimscc:string>{}\
             </lomimscc:string></lomimscc:title></lomimscc:general></lomimscc:lom>",
            escape_content(&descriptor.course_title)
        )?;
        xml.push_str("</metadata>");

        // organizations
        write!(
            xml,
            "<organizations><organization identifier=\"{}\" structure=\"rooted-hierarchy\">",
            generate_id()
        )?;
        if descriptor.organization_roots.is_empty() {
            // Flat auto-generated organization, one item per resource in
            // input order
            write!(xml, "<item identifier=\"{}\">", generate_id())?;
            for resource in &descriptor.resources {
                let title = if resource.title.is_empty() {
                    &resource.identifier
                } else {
                    &resource.title
                };
                write!(
                    xml,
                    "<item identifier=\"{}\" identifierref=\"{}\"><title>{}</title></item>",
                    generate_id(),
                    escape_attribute(&resource.identifier),
                    escape_content(title)
                )?;
            }
            xml.push_str("</item>");
        } else {
            for root in &descriptor.organization_roots {
                write_item(&mut xml, root)?;
            }
        }
        xml.push_str("</organization></organizations>");

        // resources
        xml.push_str("<resources>");
        for resource in &descriptor.resources {
            write_resource(&mut xml, resource)?;
        }
        xml.push_str("</resources></manifest>");
        Ok(xml)
    }

    /// Run every pre-emission check, returning all violations found.
    fn check(&self, descriptor: &ManifestDescriptor, options: &ManifestOptions) -> Vec<String> {
        let mut violations = Vec::new();

        // Identifier uniqueness across resources and organization items
        let mut seen: HashSet<&str> = HashSet::new();
        for resource in &descriptor.resources {
            if !seen.insert(&resource.identifier) {
                violations.push(format!(
                    "duplicate identifier: {}",
                    resource.identifier
                ));
            }
        }
        let mut items = Vec::new();
        for root in &descriptor.organization_roots {
            collect_items(root, &mut items);
        }
        for item in &items {
            if !seen.insert(&item.identifier) {
                violations.push(format!("duplicate identifier: {}", item.identifier));
            }
        }

        // Content-bearing types need an href
        for resource in &descriptor.resources {
            if type_requires_content(&resource.resource_type) && resource.href.is_empty() {
                violations.push(format!(
                    "resource {} has type {} but no href",
                    resource.identifier, resource.resource_type
                ));
            }
        }

        // Item references must resolve
        let resource_ids: HashSet<&str> = descriptor
            .resources
            .iter()
            .map(|r| r.identifier.as_str())
            .collect();
        for item in &items {
            if let Some(identifierref) = &item.identifierref {
                if !identifierref.is_empty() && !resource_ids.contains(identifierref.as_str()) {
                    violations.push(format!(
                        "item {} references unknown resource {}",
                        item.identifier, identifierref
                    ));
                }
            }
        }

        // Dependency graph must be acyclic; all cycles reported
        for cycle in graph::find_cycles(&descriptor.resources) {
            violations.push(format!("circular dependency: {}", cycle.join(" -> ")));
        }

        // Referenced files must exist when a base directory is supplied
        if let Some(base) = &options.base_dir {
            for resource in &descriptor.resources {
                for file in &resource.files {
                    if !base.join(file).exists() {
                        violations.push(format!(
                            "resource {}: missing file {}",
                            resource.identifier, file
                        ));
                    }
                }
            }
        }

        violations
    }
}

fn collect_items<'a>(item: &'a OrganizationItem, out: &mut Vec<&'a OrganizationItem>) {
    out.push(item);
    for child in &item.children {
        collect_items(child, out);
    }
}

fn write_item(xml: &mut String, item: &OrganizationItem) -> Result<()> {
    write!(xml, "<item identifier=\"{}\"", escape_attribute(&item.identifier))?;
    if let Some(identifierref) = &item.identifierref {
        if !identifierref.is_empty() {
            write!(xml, " identifierref=\"{}\"", escape_attribute(identifierref))?;
        }
    }
    xml.push('>');
    if !item.title.is_empty() {
        write!(xml, "<title>{}</title>", escape_content(&item.title))?;
    }
    for child in &item.children {
        write_item(xml, child)?;
    }
    xml.push_str("</item>");
    Ok(())
}

fn write_resource(xml: &mut String, resource: &Resource) -> Result<()> {
    write!(
        xml,
        "<resource identifier=\"{}\" type=\"{}\"",
        escape_attribute(&resource.identifier),
        escape_attribute(&resource.resource_type)
    )?;
    if !resource.href.is_empty() {
        write!(xml, " href=\"{}\"", escape_attribute(&resource.href))?;
    }
    if resource.files.is_empty() && resource.dependencies.is_empty() {
        xml.push_str("/>");
        return Ok(());
    }
    xml.push('>');
    for file in &resource.files {
        write!(xml, "<file href=\"{}\"/>", escape_attribute(file))?;
    }
    for dependency in &resource.dependencies {
        write!(xml, "<dependency identifierref=\"{}\"/>", escape_attribute(dependency))?;
    }
    xml.push_str("</resource>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse_document;
    use crate::consts::MANIFEST_NAMESPACES;

    fn descriptor(resources: Vec<Resource>) -> ManifestDescriptor {
        ManifestDescriptor::new("im1", "Test Course", resources)
    }

    #[test]
    fn test_compile_flat_organization() {
        let xml = ManifestCompiler::new()
            .compile(
                &descriptor(vec![
                    Resource::new("r1", "webcontent", "a.html").with_title("Page A"),
                    Resource::new("r2", "webcontent", "b.html").with_title("Page B"),
                ]),
                &ManifestOptions::default(),
            )
            .unwrap();
        let root = parse_document(&xml).unwrap();
        assert_eq!(root.local, "manifest");
        assert!(MANIFEST_NAMESPACES.contains(&root.default_namespace().unwrap()));
        assert_eq!(
            root.find_path(&["metadata", "schemaversion"]).map(|e| e.text_trimmed()),
            Some("1.3.0")
        );
        // Flat organization preserves input order
        let organization = root.find_path(&["organizations", "organization"]).unwrap();
        let wrapper = organization.find_child("item").unwrap();
        let refs: Vec<_> = wrapper
            .children_named("item")
            .filter_map(|i| i.attr("identifierref"))
            .collect();
        assert_eq!(refs, vec!["r1", "r2"]);
    }

    #[test]
    fn test_version_keyed_namespace() {
        let xml = ManifestCompiler::new()
            .compile(
                &descriptor(vec![Resource::new("r1", "webcontent", "a.html")]),
                &ManifestOptions {
                    version: ImsccVersion::V1_1,
                    ..ManifestOptions::default()
                },
            )
            .unwrap();
        assert!(xml.contains("imsccv1p1/imscp_v1p1"));
        assert!(xml.contains("<schemaversion>1.1.0</schemaversion>"));
    }

    #[test]
    fn test_caller_supplied_hierarchy() {
        let mut d = descriptor(vec![Resource::new("r1", "webcontent", "a.html")]);
        d.organization_roots = vec![OrganizationItem::with_children(
            "mod1",
            "Module 1",
            vec![OrganizationItem::new("it1", "Page A", Some("r1".to_string()))],
        )];
        let xml = ManifestCompiler::new().compile(&d, &ManifestOptions::default()).unwrap();
        let root = parse_document(&xml).unwrap();
        let organization = root.find_path(&["organizations", "organization"]).unwrap();
        let module = organization.find_child("item").unwrap();
        assert_eq!(module.attr("identifier"), Some("mod1"));
        let leaf = module.find_child("item").unwrap();
        assert_eq!(leaf.attr("identifierref"), Some("r1"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut d = descriptor(vec![
            Resource::new("r1", "webcontent", "").with_dependency("r2"),
            Resource::new("r2", "webcontent", "b.html").with_dependency("r1"),
            Resource::new("r2", "webcontent", "c.html"),
        ]);
        d.organization_roots = vec![OrganizationItem::new(
            "it1",
            "Ghost",
            Some("r9".to_string()),
        )];
        let err = ManifestCompiler::new()
            .compile(&d, &ManifestOptions::default())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("duplicate identifier: r2"));
        assert!(message.contains("r1 has type webcontent but no href"));
        assert!(message.contains("references unknown resource r9"));
        assert!(message.contains("circular dependency"));
    }

    #[test]
    fn test_missing_file_check_with_base_dir() {
        let scratch = tempfile::tempdir().unwrap();
        std::fs::write(scratch.path().join("a.html"), "<html></html>").unwrap();
        let d = descriptor(vec![
            Resource::new("r1", "webcontent", "a.html"),
            Resource::new("r2", "webcontent", "missing.html"),
        ]);
        let err = ManifestCompiler::new()
            .compile(&d, &ManifestOptions {
                base_dir: Some(scratch.path().to_path_buf()),
                ..ManifestOptions::default()
            })
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("r2: missing file missing.html"));
        assert!(!message.contains("r1:"));
    }

    #[test]
    fn test_dependency_emission() {
        let xml = ManifestCompiler::new()
            .compile(
                &descriptor(vec![
                    Resource::new("r1", "webcontent", "a.html").with_dependency("r2"),
                    Resource::new("r2", "webcontent", "b.html"),
                ]),
                &ManifestOptions::default(),
            )
            .unwrap();
        assert!(xml.contains("<dependency identifierref=\"r2\"/>"));
    }
}
