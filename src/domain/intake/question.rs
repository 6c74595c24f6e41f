//! Question entity for the guided intake flow.

use serde::{Deserialize, Serialize};

use super::validator::FieldKind;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free-typed text answer.
    Text,
    /// Yes/no answer; a "no" may skip the detail question that follows.
    YesNo,
}

/// A single question in the ordered intake script.
///
/// Questions are immutable. The `field_key` is the key the answer is stored
/// under; it uses the camelCase spelling of the submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Key the answer is recorded under.
    field_key: &'static str,

    /// The prompt shown to the user.
    prompt: &'static str,

    /// How the question is answered.
    kind: QuestionKind,

    /// Validator for the answer, if the field has one. Questions without a
    /// validator accept any answer.
    validator: Option<FieldKind>,
}

impl Question {
    /// Creates a free-text question validated by the given field kind.
    pub const fn text(
        field_key: &'static str,
        prompt: &'static str,
        validator: FieldKind,
    ) -> Self {
        Self {
            field_key,
            prompt,
            kind: QuestionKind::Text,
            validator: Some(validator),
        }
    }

    /// Creates a yes/no question. Yes/no answers are not validated; the flow
    /// interprets a normalized "no" for skip rules.
    pub const fn yes_no(field_key: &'static str, prompt: &'static str) -> Self {
        Self {
            field_key,
            prompt,
            kind: QuestionKind::YesNo,
            validator: None,
        }
    }

    /// Returns the field key the answer is stored under.
    pub fn field_key(&self) -> &'static str {
        self.field_key
    }

    /// Returns the prompt text.
    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    /// Returns the question kind.
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Returns the validator for this question, if any.
    pub fn validator(&self) -> Option<FieldKind> {
        self.validator
    }
}
