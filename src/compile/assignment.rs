//! Assignment document compiler.
//!
//! Emits the assignment-extension document: root `assignment` in the
//! assignment extension namespace, with `title`, `instructor_text`,
//! `submission_formats`, and a `gradable` element carrying the 9-decimal
//! fixed-point `points_possible`.

use super::{
    XML_DECL, check_attachment_path, check_body, check_points, check_title, format_points,
};
use crate::common::error::Result;
use crate::common::id::generate_id;
use crate::common::xml::{escape_attribute, escape_content};
use crate::consts::ASSIGNMENT_NS;
use std::fmt::Write as FmtWrite;

/// Options for one assignment compilation.
#[derive(Debug, Clone)]
pub struct AssignmentOptions {
    /// Points possible, in [0, 1 000 000]
    pub points: f64,
    /// Allowed submission formats, e.g. `online_text_entry`
    pub submission_formats: Vec<String>,
    /// Package-relative attachment paths
    pub attachments: Vec<String>,
}

impl Default for AssignmentOptions {
    fn default() -> Self {
        Self {
            points: 100.0,
            submission_formats: vec![
                "online_text_entry".to_string(),
                "online_upload".to_string(),
            ],
            attachments: Vec::new(),
        }
    }
}

/// Compiler for assignment documents.
#[derive(Debug, Default)]
pub struct AssignmentCompiler;

impl AssignmentCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile one assignment document.
    ///
    /// Fails without output on a blank/oversized title or body, points
    /// outside [0, 1 000 000], or an attachment path that is absolute or
    /// contains a parent-directory segment.
    pub fn compile(
        &self,
        title: &str,
        body_html: &str,
        options: &AssignmentOptions,
    ) -> Result<String> {
        check_title(title)?;
        check_body(body_html)?;
        check_points(options.points)?;
        for path in &options.attachments {
            check_attachment_path(path)?;
        }

        let mut xml = String::with_capacity(1024 + body_html.len());
        xml.push_str(XML_DECL);
        write!(
            xml,
            "<assignment identifier=\"{}\" xmlns=\"{}\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
            generate_id(),
            ASSIGNMENT_NS
        )?;
        write!(xml, "<title>{}</title>", escape_content(title))?;
        write!(
            xml,
            "<instructor_text texttype=\"text/html\">{}</instructor_text>",
            escape_content(body_html)
        )?;

        xml.push_str("<submission_formats>");
        for format in &options.submission_formats {
            write!(xml, "<format type=\"{}\"/>", escape_attribute(format))?;
        }
        xml.push_str("</submission_formats>");

        if !options.attachments.is_empty() {
            xml.push_str("<attachments>");
            for path in &options.attachments {
                write!(xml, "<attachment href=\"{}\"/>", escape_attribute(path))?;
            }
            xml.push_str("</attachments>");
        }

        write!(
            xml,
            "<gradable points_possible=\"{}\">true</gradable>",
            format_points(options.points)
        )?;
        xml.push_str("</assignment>");
        Ok(xml)
    }
}
