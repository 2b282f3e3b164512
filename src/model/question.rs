//! Quiz question model: a closed sum over the five supported QTI kinds.
//!
//! Each variant carries only the fields its kind needs, so the compiler and
//! validator can match exhaustively and adding a kind is a compile-checked
//! change in both places.

/// One answer choice for a choice-based question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Choice identifier; generated if empty at compile time
    pub identifier: String,
    /// Choice text (HTML allowed)
    pub text: String,
    /// Whether selecting this choice is correct
    pub is_correct: bool,
}

impl Choice {
    /// Create a choice with an empty identifier (one is generated at
    /// compile time).
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            identifier: String::new(),
            text: text.into(),
            is_correct,
        }
    }
}

/// Kind-specific payload of a question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Exactly one correct choice
    MultipleChoice { choices: Vec<Choice> },
    /// One or more correct choices; scored as a conjunction
    MultipleResponse { choices: Vec<Choice> },
    /// Exactly two choices, exactly one correct. The first choice is the
    /// "True" slot by position convention.
    TrueFalse { choices: Vec<Choice> },
    /// One or more accepted answers, matched as a disjunction
    FillInBlank {
        answers: Vec<String>,
        case_sensitive: bool,
    },
    /// Manually scored; optional model solution shown as feedback
    Essay { solution: Option<String> },
}

impl QuestionKind {
    /// QTI `cc_profile` metadata value for this kind.
    pub fn cc_profile(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "cc.multiple_choice.v0p1",
            QuestionKind::MultipleResponse { .. } => "cc.multiple_response.v0p1",
            QuestionKind::TrueFalse { .. } => "cc.true_false.v0p1",
            QuestionKind::FillInBlank { .. } => "cc.fib.v0p1",
            QuestionKind::Essay { .. } => "cc.essay.v0p1",
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    /// Item identifier; generated if empty at compile time
    pub identifier: String,
    /// Question text (HTML allowed)
    pub text: String,
    /// Points possible, must be >= 0
    pub points: f64,
    /// General feedback shown after answering, if any
    pub feedback: Option<String>,
    /// Kind-specific payload
    pub kind: QuestionKind,
}

impl QuizQuestion {
    /// Create a question worth `points` with no feedback.
    pub fn new(text: impl Into<String>, points: f64, kind: QuestionKind) -> Self {
        Self {
            identifier: String::new(),
            text: text.into(),
            points,
            feedback: None,
            kind,
        }
    }

    /// Set the feedback text.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}
