//! Lightweight element tree for validation and extraction.
//!
//! Validators need to look at the whole document at once (namespace
//! declarations on the root, duplicate idents anywhere in the tree), and the
//! extractor walks the manifest recursively, so both parse into this small
//! owned tree instead of streaming. Parse failure is the only hard error;
//! everything after a successful parse is a structural question, not an XML
//! one.

use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use std::collections::HashSet;

/// A single attribute with its fully qualified name (prefix included).
#[derive(Debug, Clone)]
pub struct XmlAttribute {
    /// Qualified attribute name as written, e.g. `identifier` or `xmlns:lom`
    pub name: String,
    /// Unescaped attribute value
    pub value: String,
}

/// An element in the parsed tree.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// Namespace prefix, if the tag was written as `prefix:local`
    pub prefix: Option<String>,
    /// Local tag name
    pub local: String,
    /// Attributes in document order
    pub attributes: Vec<XmlAttribute>,
    /// Concatenated text content of this element (not descendants)
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Look up an attribute by its qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Default namespace declared on this element (`xmlns="..."`), if any.
    pub fn default_namespace(&self) -> Option<&str> {
        self.attr("xmlns")
    }

    /// Namespace prefixes declared on this element via `xmlns:*`.
    pub fn declared_prefixes(&self) -> HashSet<&str> {
        self.attributes
            .iter()
            .filter_map(|a| a.name.strip_prefix("xmlns:"))
            .collect()
    }

    /// First child with the given local name.
    pub fn find_child(&self, local: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local == local)
    }

    /// All children with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.local == local)
    }

    /// Descend through a chain of local names, taking the first match at
    /// each level.
    pub fn find_path(&self, path: &[&str]) -> Option<&XmlElement> {
        let mut current = self;
        for segment in path {
            current = current.find_child(segment)?;
        }
        Some(current)
    }

    /// Visit this element and every descendant, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a XmlElement)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Text content with surrounding whitespace removed.
    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }
}

fn split_qname(qname: &[u8]) -> Result<(Option<String>, String)> {
    let qname = std::str::from_utf8(qname)
        .map_err(|e| Error::XmlError(format!("Invalid UTF-8 in tag name: {e}")))?;
    match qname.split_once(':') {
        Some((prefix, local)) => Ok((Some(prefix.to_string()), local.to_string())),
        None => Ok((None, qname.to_string())),
    }
}

/// Resolve a general entity reference to the character it stands for:
/// the five predefined XML entities plus numeric character references.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<char> {
    let name = std::str::from_utf8(reference.as_ref())
        .map_err(|e| Error::XmlError(format!("Invalid UTF-8 in entity reference: {e}")))?;
    match name {
        "amp" => Ok('&'),
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ => match reference.resolve_char_ref()? {
            Some(ch) => Ok(ch),
            None => Err(Error::XmlError(format!("Unknown entity reference: &{name};"))),
        },
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
    let (prefix, local) = split_qname(e.name().as_ref())?;
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let name = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| Error::XmlError(format!("Invalid UTF-8 in attribute name: {e}")))?
            .to_string();
        let value = attr.unescape_value()?.to_string();
        attributes.push(XmlAttribute { name, value });
    }
    Ok(XmlElement {
        prefix,
        local,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Parse an XML document into an element tree rooted at its single root
/// element.
///
/// Returns `Error::XmlError` for any well-formedness problem: bad syntax,
/// mismatched tags, no root element, or trailing content after the root.
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    // Text is kept verbatim, entity references included; trimming whole
    // text events here would eat the whitespace around an entity. Readers
    // trim via text_trimmed().
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(Error::XmlError(
                        "Multiple root elements in document".to_string(),
                    ));
                }
                stack.push(element_from_start(e)?);
            },
            Ok(Event::Empty(ref e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(Error::XmlError(
                        "Multiple root elements in document".to_string(),
                    ));
                }
                let element = element_from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            },
            Ok(Event::End(_)) => {
                // quick-xml checks end-name matching; an End event always
                // closes the top of the stack here.
                let element = stack.pop().ok_or_else(|| {
                    Error::XmlError("Unexpected closing tag".to_string())
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            },
            Ok(Event::Text(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    // Entity references arrive as separate GeneralRef
                    // events, so this segment is plain text
                    let raw = std::str::from_utf8(e.as_ref()).map_err(|e| {
                        Error::XmlError(format!("Invalid UTF-8 in text content: {e}"))
                    })?;
                    top.text.push_str(raw);
                }
            },
            Ok(Event::GeneralRef(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push(resolve_reference(e)?);
                }
            },
            Ok(Event::CData(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    let raw = std::str::from_utf8(e.as_ref()).map_err(|e| {
                        Error::XmlError(format!("Invalid UTF-8 in CDATA content: {e}"))
                    })?;
                    top.text.push_str(raw);
                }
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}, // declarations, comments, processing instructions
            Err(e) => return Err(Error::XmlError(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(Error::XmlError("Unclosed element at end of document".to_string()));
    }
    root.ok_or_else(|| Error::XmlError("Document has no root element".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tree() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
            <manifest identifier="m1" xmlns="urn:x" xmlns:lom="urn:lom">
                <metadata><schema>IMS Common Cartridge</schema></metadata>
                <resources>
                    <resource identifier="r1" type="webcontent" href="a.html"/>
                </resources>
            </manifest>"#,
        )
        .unwrap();
        assert_eq!(root.local, "manifest");
        assert_eq!(root.attr("identifier"), Some("m1"));
        assert_eq!(root.default_namespace(), Some("urn:x"));
        assert!(root.declared_prefixes().contains("lom"));
        let schema = root.find_path(&["metadata", "schema"]).unwrap();
        assert_eq!(schema.text_trimmed(), "IMS Common Cartridge");
        let resource = root.find_path(&["resources", "resource"]).unwrap();
        assert_eq!(resource.attr("type"), Some("webcontent"));
    }

    #[test]
    fn test_parse_prefixed_element() {
        let root = parse_document(r#"<a xmlns:b="urn:b"><b:c x="1"/></a>"#).unwrap();
        let child = &root.children[0];
        assert_eq!(child.prefix.as_deref(), Some("b"));
        assert_eq!(child.local, "c");
        assert_eq!(child.attr("x"), Some("1"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("not xml at all <<<").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn test_text_is_unescaped() {
        let root = parse_document("<a>x &amp; y</a>").unwrap();
        assert_eq!(root.text_trimmed(), "x & y");
    }

    #[test]
    fn test_entities_keep_surrounding_text() {
        let root = parse_document("<topic><title>Cats &amp; Dogs</title></topic>").unwrap();
        assert_eq!(
            root.find_child("title").unwrap().text_trimmed(),
            "Cats & Dogs"
        );
    }

    #[test]
    fn test_named_and_char_references() {
        let root = parse_document("<a>&lt;b&gt; &#x41;&#66; &apos;q&apos;</a>").unwrap();
        assert_eq!(root.text_trimmed(), "<b> AB 'q'");
    }

    #[test]
    fn test_unknown_entity_is_error() {
        assert!(parse_document("<a>&nosuch;</a>").is_err());
    }
}
