//! QTI 1.2 quiz compiler.
//!
//! The assessment wrapper nests one `section` containing one `item` per
//! question inside root `questestinterop`. Structural rules are enforced
//! per question kind before any XML is emitted; a single bad question fails
//! the whole compile call.

use super::{XML_DECL, check_points, check_title};
use crate::common::error::{Error, Result};
use crate::common::id::{generate_id, generate_response_id};
use crate::common::xml::{escape_attribute, escape_content};
use crate::consts::QTI_NS;
use crate::model::{Choice, QuestionKind, QuizQuestion};
use std::fmt::Write as FmtWrite;

/// Options for one quiz compilation.
#[derive(Debug, Clone)]
pub struct QuizOptions {
    /// Assessment type label carried in `qmd_assessmenttype`
    pub assessment_type: String,
    /// Maximum attempts carried in `cc_maxattempts`
    pub max_attempts: u32,
    /// Time limit in minutes, omitted when `None`
    pub time_limit_minutes: Option<u32>,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            assessment_type: "Examination".to_string(),
            max_attempts: 1,
            time_limit_minutes: None,
        }
    }
}

/// Compiler for QTI 1.2 assessment documents.
#[derive(Debug, Default)]
pub struct QuizCompiler;

impl QuizCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile one assessment document from `questions`.
    ///
    /// Fails without output when the title is blank/oversized, the question
    /// list is empty, or any question violates its kind's structural rule:
    /// multiple choice and true/false need exactly one correct choice
    /// (true/false exactly two choices), multiple response at least one
    /// correct choice, fill-in-blank at least one accepted answer.
    pub fn compile(
        &self,
        title: &str,
        questions: &[QuizQuestion],
        options: &QuizOptions,
    ) -> Result<String> {
        check_title(title)?;
        if questions.is_empty() {
            return Err(Error::InvalidInput(
                "quiz must contain at least one question".to_string(),
            ));
        }
        for (index, question) in questions.iter().enumerate() {
            check_question(index, question)?;
        }

        let mut xml = String::with_capacity(2048 * questions.len());
        xml.push_str(XML_DECL);
        write!(
            xml,
            "<questestinterop xmlns=\"{QTI_NS}\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">"
        )?;
        write!(
            xml,
            "<assessment ident=\"{}\" title=\"{}\">",
            generate_id(),
            escape_attribute(title)
        )?;

        xml.push_str("<qtimetadata>");
        write_metadata_field(&mut xml, "cc_profile", "cc.exam.v0p1")?;
        write_metadata_field(&mut xml, "qmd_assessmenttype", &options.assessment_type)?;
        write_metadata_field(&mut xml, "cc_maxattempts", &options.max_attempts.to_string())?;
        if let Some(minutes) = options.time_limit_minutes {
            write_metadata_field(&mut xml, "qmd_timelimit", &minutes.to_string())?;
        }
        xml.push_str("</qtimetadata>");

        write!(xml, "<section ident=\"{}\">", generate_id())?;
        for question in questions {
            write_item(&mut xml, question)?;
        }
        xml.push_str("</section></assessment></questestinterop>");
        Ok(xml)
    }
}

/// Enforce the structural rule for one question.
fn check_question(index: usize, question: &QuizQuestion) -> Result<()> {
    let ident = if question.identifier.is_empty() {
        format!("question {}", index + 1)
    } else {
        question.identifier.clone()
    };
    let fail = |reason: String| {
        Err(Error::InvalidQuestion { ident: ident.clone(), reason })
    };

    if question.text.trim().is_empty() {
        return fail("question text must not be blank".to_string());
    }
    if check_points(question.points).is_err() {
        return fail(format!("points out of range: {}", question.points));
    }

    match &question.kind {
        QuestionKind::MultipleChoice { choices } => {
            let correct = choices.iter().filter(|c| c.is_correct).count();
            if choices.len() < 2 {
                return fail("multiple choice requires at least two choices".to_string());
            }
            if correct != 1 {
                return fail(format!(
                    "multiple choice requires exactly one correct choice, found {correct}"
                ));
            }
        },
        QuestionKind::TrueFalse { choices } => {
            if choices.len() != 2 {
                return fail(format!(
                    "true/false requires exactly two choices, found {}",
                    choices.len()
                ));
            }
            let correct = choices.iter().filter(|c| c.is_correct).count();
            if correct != 1 {
                return fail(format!(
                    "true/false requires exactly one correct choice, found {correct}"
                ));
            }
        },
        QuestionKind::MultipleResponse { choices } => {
            if choices.is_empty() {
                return fail("multiple response requires at least one choice".to_string());
            }
            if !choices.iter().any(|c| c.is_correct) {
                return fail("multiple response requires at least one correct choice".to_string());
            }
        },
        QuestionKind::FillInBlank { answers, .. } => {
            if answers.is_empty() || answers.iter().all(|a| a.trim().is_empty()) {
                return fail("fill-in-blank requires at least one accepted answer".to_string());
            }
        },
        QuestionKind::Essay { .. } => {},
    }
    Ok(())
}

fn write_metadata_field(xml: &mut String, label: &str, entry: &str) -> Result<()> {
    write!(
        xml,
        "<qtimetadatafield><fieldlabel>{}</fieldlabel><fieldentry>{}</fieldentry></qtimetadatafield>",
        escape_content(label),
        escape_content(entry)
    )?;
    Ok(())
}

fn write_material(xml: &mut String, html: &str) -> Result<()> {
    write!(
        xml,
        "<material><mattext texttype=\"text/html\">{}</mattext></material>",
        escape_content(html)
    )?;
    Ok(())
}

/// Assign identifiers to choices that arrived without one.
fn choice_idents(choices: &[Choice]) -> Vec<String> {
    choices
        .iter()
        .map(|c| {
            if c.identifier.is_empty() {
                generate_id()
            } else {
                c.identifier.clone()
            }
        })
        .collect()
}

fn write_choice_rendering(
    xml: &mut String,
    response_ident: &str,
    choices: &[Choice],
    idents: &[String],
    cardinality: &str,
) -> Result<()> {
    write!(
        xml,
        "<response_lid ident=\"{response_ident}\" rcardinality=\"{cardinality}\"><render_choice>"
    )?;
    for (choice, ident) in choices.iter().zip(idents) {
        write!(xml, "<response_label ident=\"{}\">", escape_attribute(ident))?;
        write_material(xml, &choice.text)?;
        xml.push_str("</response_label>");
    }
    xml.push_str("</render_choice></response_lid>");
    Ok(())
}

fn open_resprocessing(xml: &mut String) {
    xml.push_str(
        "<resprocessing><outcomes>\
         <decvar maxvalue=\"100\" minvalue=\"0\" varname=\"SCORE\" vartype=\"Decimal\"/>\
         </outcomes>",
    );
}

fn write_item(xml: &mut String, question: &QuizQuestion) -> Result<()> {
    let item_ident = if question.identifier.is_empty() {
        generate_id()
    } else {
        question.identifier.clone()
    };
    write!(xml, "<item ident=\"{}\" title=\"{}\">", escape_attribute(&item_ident), {
        // First line of the question text doubles as the item title
        let title: String = question.text.chars().take(60).collect();
        escape_attribute(title.trim())
    })?;

    xml.push_str("<itemmetadata><qtimetadata>");
    write_metadata_field(xml, "cc_profile", question.kind.cc_profile())?;
    write_metadata_field(xml, "points_possible", &super::format_points(question.points))?;
    if matches!(question.kind, QuestionKind::Essay { .. }) {
        write_metadata_field(xml, "qmd_computerscored", "No")?;
    }
    xml.push_str("</qtimetadata></itemmetadata>");

    match &question.kind {
        QuestionKind::MultipleChoice { choices } | QuestionKind::TrueFalse { choices } => {
            let response_ident = generate_response_id();
            let idents = choice_idents(choices);
            xml.push_str("<presentation>");
            write_material(xml, &question.text)?;
            write_choice_rendering(xml, &response_ident, choices, &idents, "Single")?;
            xml.push_str("</presentation>");

            // Structural rule guarantees exactly one correct choice
            let correct = choices
                .iter()
                .zip(&idents)
                .find(|(c, _)| c.is_correct)
                .map(|(_, ident)| ident.as_str())
                .unwrap_or_default();
            open_resprocessing(xml);
            write!(
                xml,
                "<respcondition continue=\"No\"><conditionvar>\
                 <varequal respident=\"{response_ident}\">{}</varequal></conditionvar>\
                 <setvar action=\"Set\" varname=\"SCORE\">100</setvar></respcondition>\
                 </resprocessing>",
                escape_content(correct)
            )?;
        },
        QuestionKind::MultipleResponse { choices } => {
            let response_ident = generate_response_id();
            let idents = choice_idents(choices);
            xml.push_str("<presentation>");
            write_material(xml, &question.text)?;
            write_choice_rendering(xml, &response_ident, choices, &idents, "Multiple")?;
            xml.push_str("</presentation>");

            // All correct selected AND no incorrect selected
            open_resprocessing(xml);
            xml.push_str("<respcondition continue=\"No\"><conditionvar><and>");
            for (choice, ident) in choices.iter().zip(&idents) {
                if choice.is_correct {
                    write!(
                        xml,
                        "<varequal respident=\"{response_ident}\">{}</varequal>",
                        escape_content(ident)
                    )?;
                } else {
                    write!(
                        xml,
                        "<not><varequal respident=\"{response_ident}\">{}</varequal></not>",
                        escape_content(ident)
                    )?;
                }
            }
            xml.push_str(
                "</and></conditionvar>\
                 <setvar action=\"Set\" varname=\"SCORE\">100</setvar></respcondition>\
                 </resprocessing>",
            );
        },
        QuestionKind::FillInBlank { answers, case_sensitive } => {
            let response_ident = generate_response_id();
            xml.push_str("<presentation>");
            write_material(xml, &question.text)?;
            write!(
                xml,
                "<response_str ident=\"{response_ident}\" rcardinality=\"Single\">\
                 <render_fib><response_label ident=\"{}\" rshuffle=\"No\"/></render_fib>\
                 </response_str>",
                generate_id()
            )?;
            xml.push_str("</presentation>");

            // Disjunction over the accepted answers
            let case = if *case_sensitive { "Yes" } else { "No" };
            open_resprocessing(xml);
            xml.push_str("<respcondition continue=\"No\"><conditionvar>");
            if answers.len() > 1 {
                xml.push_str("<or>");
            }
            for answer in answers {
                write!(
                    xml,
                    "<varequal respident=\"{response_ident}\" case=\"{case}\">{}</varequal>",
                    escape_content(answer)
                )?;
            }
            if answers.len() > 1 {
                xml.push_str("</or>");
            }
            xml.push_str(
                "</conditionvar>\
                 <setvar action=\"Set\" varname=\"SCORE\">100</setvar></respcondition>\
                 </resprocessing>",
            );
        },
        QuestionKind::Essay { solution } => {
            xml.push_str("<presentation>");
            write_material(xml, &question.text)?;
            write!(
                xml,
                "<response_str ident=\"{}\" rcardinality=\"Single\">\
                 <render_fib><response_label ident=\"{}\" rshuffle=\"No\"/></render_fib>\
                 </response_str>",
                generate_response_id(),
                generate_id()
            )?;
            xml.push_str("</presentation>");

            if let Some(solution) = solution {
                write!(
                    xml,
                    "<itemfeedback ident=\"{}_solution\"><flow_mat>",
                    escape_attribute(&item_ident)
                )?;
                write_material(xml, solution)?;
                xml.push_str("</flow_mat></itemfeedback>");
            }
        },
    }

    if let Some(feedback) = &question.feedback {
        write!(
            xml,
            "<itemfeedback ident=\"{}_fb\"><flow_mat>",
            escape_attribute(&item_ident)
        )?;
        write_material(xml, feedback)?;
        xml.push_str("</flow_mat></itemfeedback>");
    }

    xml.push_str("</item>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse_document;

    fn mc_question(correct_count: usize) -> QuizQuestion {
        let choices = (0..4)
            .map(|i| Choice::new(format!("Choice {i}"), i < correct_count))
            .collect();
        QuizQuestion::new("Pick one.", 1.0, QuestionKind::MultipleChoice { choices })
    }

    #[test]
    fn test_multiple_choice_cardinality_rule() {
        let compiler = QuizCompiler::new();
        let options = QuizOptions::default();
        assert!(compiler.compile("Quiz", &[mc_question(0)], &options).is_err());
        assert!(compiler.compile("Quiz", &[mc_question(2)], &options).is_err());
        assert!(compiler.compile("Quiz", &[mc_question(1)], &options).is_ok());
    }

    #[test]
    fn test_wrapper_structure() {
        let xml = QuizCompiler::new()
            .compile("Quiz 1", &[mc_question(1)], &QuizOptions::default())
            .unwrap();
        let root = parse_document(&xml).unwrap();
        assert_eq!(root.local, "questestinterop");
        assert_eq!(root.default_namespace(), Some(QTI_NS));
        let assessment = root.find_child("assessment").unwrap();
        assert_eq!(assessment.attr("title"), Some("Quiz 1"));
        let section = assessment.find_child("section").unwrap();
        assert_eq!(section.children_named("item").count(), 1);
        // Profile tag present in flat metadata
        assert!(xml.contains("cc.exam.v0p1"));
        assert!(xml.contains("cc_maxattempts"));
    }

    #[test]
    fn test_true_false_structure() {
        let compiler = QuizCompiler::new();
        let options = QuizOptions::default();
        let good = QuizQuestion::new("True?", 1.0, QuestionKind::TrueFalse {
            choices: vec![Choice::new("True", true), Choice::new("False", false)],
        });
        let xml = compiler.compile("Quiz", &[good], &options).unwrap();
        assert!(xml.contains("cc.true_false.v0p1"));
        assert!(xml.contains("rcardinality=\"Single\""));

        let three = QuizQuestion::new("True?", 1.0, QuestionKind::TrueFalse {
            choices: vec![
                Choice::new("True", true),
                Choice::new("False", false),
                Choice::new("Maybe", false),
            ],
        });
        assert!(compiler.compile("Quiz", &[three], &options).is_err());
    }

    #[test]
    fn test_multiple_response_conjunction() {
        let q = QuizQuestion::new("Pick all.", 2.0, QuestionKind::MultipleResponse {
            choices: vec![
                Choice { identifier: "c1".to_string(), text: "A".to_string(), is_correct: true },
                Choice { identifier: "c2".to_string(), text: "B".to_string(), is_correct: false },
                Choice { identifier: "c3".to_string(), text: "C".to_string(), is_correct: true },
            ],
        });
        let xml = QuizCompiler::new()
            .compile("Quiz", &[q], &QuizOptions::default())
            .unwrap();
        assert!(xml.contains("rcardinality=\"Multiple\""));
        assert!(xml.contains("<and>"));
        assert!(xml.contains(">c2</varequal></not>"));
        assert!(xml.contains(">c1</varequal>"));
        // exactly the one incorrect choice is negated
        assert_eq!(xml.matches("<not>").count(), 1);
    }

    #[test]
    fn test_fill_in_blank_disjunction_case_insensitive() {
        let q = QuizQuestion::new("Capital of France?", 1.0, QuestionKind::FillInBlank {
            answers: vec!["Paris".to_string(), "paris".to_string()],
            case_sensitive: false,
        });
        let xml = QuizCompiler::new()
            .compile("Quiz", &[q], &QuizOptions::default())
            .unwrap();
        assert!(xml.contains("<or>"));
        assert!(xml.contains("case=\"No\">Paris</varequal>"));
        assert!(xml.contains("case=\"No\">paris</varequal>"));
        // Response ident is the wide fully-random token
        let root = parse_document(&xml).unwrap();
        let mut response_ident = None;
        root.walk(&mut |e| {
            if e.local == "response_str" {
                response_ident = e.attr("ident").map(str::to_string);
            }
        });
        assert_eq!(response_ident.map(|s| s.len()), Some(40));
    }

    #[test]
    fn test_essay_manual_scoring_and_solution() {
        let q = QuizQuestion::new("Discuss.", 10.0, QuestionKind::Essay {
            solution: Some("<p>Model answer.</p>".to_string()),
        });
        let xml = QuizCompiler::new()
            .compile("Quiz", &[q], &QuizOptions::default())
            .unwrap();
        assert!(xml.contains("qmd_computerscored"));
        assert!(xml.contains("_solution\"><flow_mat>"));
        assert!(!xml.contains("<resprocessing>"));
    }

    #[test]
    fn test_empty_quiz_rejected() {
        assert!(
            QuizCompiler::new()
                .compile("Quiz", &[], &QuizOptions::default())
                .is_err()
        );
    }

    #[test]
    fn test_time_limit_emitted_when_set() {
        let options = QuizOptions {
            time_limit_minutes: Some(45),
            ..QuizOptions::default()
        };
        let xml = QuizCompiler::new()
            .compile("Quiz", &[mc_question(1)], &options)
            .unwrap();
        assert!(xml.contains("qmd_timelimit"));
        assert!(xml.contains("<fieldentry>45</fieldentry>"));
    }
}
