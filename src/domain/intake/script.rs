//! IntakeScript - the ordered question list and its skip table.
//!
//! The skip table is a sparse conditional-edge overlay on the linear question
//! list: a yes/no question answered "no" jumps over the detail question that
//! directly follows it. Every skip edge is checked at construction, never per
//! answer; a misplaced edge is a fatal configuration error.

use serde::Serialize;

use super::question::{Question, QuestionKind};
use super::validator::FieldKind;

/// A skip edge: answering the yes/no `source` question with "no" bypasses
/// the `detail` question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkipRule {
    source: &'static str,
    detail: &'static str,
}

impl SkipRule {
    /// Creates a skip edge from a yes/no field to its detail field.
    pub const fn new(source: &'static str, detail: &'static str) -> Self {
        Self { source, detail }
    }

    /// Returns the yes/no field key that triggers the skip.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Returns the detail field key that gets bypassed.
    pub fn detail(&self) -> &'static str {
        self.detail
    }
}

/// Configuration errors detected when a script is assembled.
///
/// These are build-time concerns, not runtime ones: a script that constructs
/// successfully can never hit them while answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Empty,

    DuplicateFieldKey(String),

    UnknownSkipSource(String),

    SkipSourceNotYesNo(String),

    SkipTargetMisplaced { source: String, detail: String },
}

// Implemented by hand rather than via `#[derive(thiserror::Error)]` because
// thiserror treats the `source` field of `SkipTargetMisplaced` as the error
// chain's source, which a `String` cannot be.
impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Script must contain at least one question"),
            Self::DuplicateFieldKey(key) => {
                write!(f, "Duplicate field key '{key}' in question list")
            }
            Self::UnknownSkipSource(key) => {
                write!(f, "Skip rule source '{key}' is not a question in the script")
            }
            Self::SkipSourceNotYesNo(key) => {
                write!(f, "Skip rule source '{key}' is not a yes/no question")
            }
            Self::SkipTargetMisplaced { source, detail } => write!(
                f,
                "Skip target '{detail}' must directly follow its source '{source}'"
            ),
        }
    }
}

impl std::error::Error for ScriptError {}

/// The ordered, immutable intake questionnaire plus its validated skip table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeScript {
    questions: Vec<Question>,
    skips: Vec<SkipRule>,
}

impl IntakeScript {
    /// Assembles a script, validating the skip table against the question
    /// order.
    ///
    /// # Errors
    ///
    /// - `Empty` if there are no questions
    /// - `DuplicateFieldKey` if two questions share a field key
    /// - `UnknownSkipSource` / `SkipSourceNotYesNo` for bad skip sources
    /// - `SkipTargetMisplaced` unless each skip target sits at exactly
    ///   `source index + 1`
    pub fn new(questions: Vec<Question>, skips: Vec<SkipRule>) -> Result<Self, ScriptError> {
        if questions.is_empty() {
            return Err(ScriptError::Empty);
        }

        for (i, q) in questions.iter().enumerate() {
            if questions[..i].iter().any(|p| p.field_key() == q.field_key()) {
                return Err(ScriptError::DuplicateFieldKey(q.field_key().to_string()));
            }
        }

        for rule in &skips {
            let source_index = questions
                .iter()
                .position(|q| q.field_key() == rule.source())
                .ok_or_else(|| ScriptError::UnknownSkipSource(rule.source().to_string()))?;

            if questions[source_index].kind() != QuestionKind::YesNo {
                return Err(ScriptError::SkipSourceNotYesNo(rule.source().to_string()));
            }

            let target = questions.get(source_index + 1);
            if target.map(Question::field_key) != Some(rule.detail()) {
                return Err(ScriptError::SkipTargetMisplaced {
                    source: rule.source().to_string(),
                    detail: rule.detail().to_string(),
                });
            }
        }

        Ok(Self { questions, skips })
    }

    /// The canonical symptom intake questionnaire.
    pub fn standard() -> Self {
        let questions = vec![
            Question::text(
                "name",
                "Hi! I'm your intake assistant. To get started, what is your full name?",
                FieldKind::Name,
            ),
            Question::text("age", "Thanks! How old are you?", FieldKind::Age),
            Question::text("gender", "What is your gender?", FieldKind::Gender),
            Question::text(
                "height",
                "What is your height? (e.g. 175 cm or 5'9)",
                FieldKind::Height,
            ),
            Question::text(
                "weight",
                "What is your weight? (e.g. 70 kg or 150 lb)",
                FieldKind::Weight,
            ),
            Question::text(
                "location",
                "Where are you located? (City, State)",
                FieldKind::Location,
            ),
            Question::yes_no("allergies", "Do you have any allergies? (yes/no)"),
            Question::text(
                "allergyDetails",
                "Please describe your allergies.",
                FieldKind::FreeText,
            ),
            Question::yes_no(
                "medications",
                "Are you currently taking any medications? (yes/no)",
            ),
            Question::text(
                "medicationDetails",
                "Which medications are you taking?",
                FieldKind::FreeText,
            ),
            Question::yes_no(
                "conditions",
                "Do you have any pre-existing medical conditions? (yes/no)",
            ),
            Question::text(
                "conditionDetails",
                "Please describe those conditions.",
                FieldKind::FreeText,
            ),
            Question::text(
                "symptoms",
                "Finally, please describe the symptoms you're experiencing in as much detail as you can.",
                FieldKind::FreeText,
            ),
        ];
        let skips = vec![
            SkipRule::new("allergies", "allergyDetails"),
            SkipRule::new("medications", "medicationDetails"),
            SkipRule::new("conditions", "conditionDetails"),
        ];

        Self::new(questions, skips)
            .expect("standard intake script satisfies the skip-table invariants")
    }

    /// Returns the ordered question list.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the question at the given position, if in bounds.
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Returns the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if the script has no questions. Construction forbids
    /// this; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the skip rule triggered by the given yes/no field, if any.
    pub fn skip_for(&self, source_key: &str) -> Option<&SkipRule> {
        self.skips.iter().find(|r| r.source() == source_key)
    }
}
