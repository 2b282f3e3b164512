//! Organization tree extraction.
//!
//! Builds the item tree depth-first from every `<organization>` in the
//! manifest. The coarse `item_type` is inferred from depth alone: depth 0 is
//! a root, depth 1 a module, anything deeper an item. Vendor exports rarely
//! agree on anything finer.

use crate::common::xml::XmlElement;
use crate::model::OrganizationNode;

/// Build the organization trees of a parsed manifest.
pub(crate) fn build(root: &XmlElement) -> Vec<OrganizationNode> {
    let Some(organizations) = root.find_child("organizations") else {
        return Vec::new();
    };
    organizations
        .children_named("organization")
        .flat_map(|organization| organization.children_named("item"))
        .map(|item| build_node(item, 0))
        .collect()
}

fn item_type_for_depth(depth: usize) -> &'static str {
    match depth {
        0 => "root",
        1 => "module",
        _ => "item",
    }
}

fn build_node(item: &XmlElement, depth: usize) -> OrganizationNode {
    let title = item
        .find_child("title")
        .map(|t| t.text_trimmed().to_string())
        .unwrap_or_default();
    OrganizationNode {
        identifier: item.attr("identifier").unwrap_or_default().to_string(),
        title,
        identifierref: item.attr("identifierref").map(str::to_string),
        item_type: item_type_for_depth(depth).to_string(),
        children: item
            .children_named("item")
            .map(|child| build_node(child, depth + 1))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse_document;

    #[test]
    fn test_depth_based_item_types() {
        let root = parse_document(
            r#"<manifest><organizations><organization identifier="org1">
                <item identifier="root1"><title>Course</title>
                    <item identifier="mod1"><title>Module 1</title>
                        <item identifier="leaf1" identifierref="r1"><title>Page</title></item>
                    </item>
                </item>
            </organization></organizations></manifest>"#,
        )
        .unwrap();
        let organization = build(&root);
        assert_eq!(organization.len(), 1);
        let course = &organization[0];
        assert_eq!(course.item_type, "root");
        assert_eq!(course.title, "Course");
        let module = &course.children[0];
        assert_eq!(module.item_type, "module");
        let leaf = &module.children[0];
        assert_eq!(leaf.item_type, "item");
        assert_eq!(leaf.identifierref.as_deref(), Some("r1"));
    }

    #[test]
    fn test_missing_organizations_is_empty() {
        let root = parse_document("<manifest/>").unwrap();
        assert!(build(&root).is_empty());
    }
}
