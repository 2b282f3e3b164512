//! Discussion topic compiler.
//!
//! The root element is `topic` in the imsdt v1p3 namespace. It is never
//! `discussion`: several LMS importers match on the root tag and silently
//! drop the document otherwise.

use super::{XML_DECL, check_attachment_path, check_body, check_title};
use crate::common::error::Result;
use crate::common::xml::{escape_attribute, escape_content};
use crate::consts::DISCUSSION_NS;
use std::fmt::Write as FmtWrite;

/// Options for one discussion compilation.
#[derive(Debug, Clone, Default)]
pub struct DiscussionOptions {
    /// Package-relative attachment paths
    pub attachments: Vec<String>,
}

/// Compiler for discussion topic documents.
#[derive(Debug, Default)]
pub struct DiscussionCompiler;

impl DiscussionCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile one discussion topic document.
    ///
    /// Fails without output on a blank/oversized title or body, or an
    /// attachment path that is absolute or contains a parent-directory
    /// segment.
    pub fn compile(
        &self,
        title: &str,
        body_html: &str,
        options: &DiscussionOptions,
    ) -> Result<String> {
        check_title(title)?;
        check_body(body_html)?;
        for path in &options.attachments {
            check_attachment_path(path)?;
        }

        let mut xml = String::with_capacity(512 + body_html.len());
        xml.push_str(XML_DECL);
        write!(
            xml,
            "<topic xmlns=\"{DISCUSSION_NS}\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">"
        )?;
        write!(xml, "<title>{}</title>", escape_content(title))?;
        write!(
            xml,
            "<text texttype=\"text/html\">{}</text>",
            escape_content(body_html)
        )?;

        if !options.attachments.is_empty() {
            xml.push_str("<attachments>");
            for path in &options.attachments {
                write!(xml, "<attachment href=\"{}\"/>", escape_attribute(path))?;
            }
            xml.push_str("</attachments>");
        }

        xml.push_str("</topic>");
        Ok(xml)
    }
}
