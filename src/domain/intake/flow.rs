//! QuestionFlowController - state machine over the intake script.
//!
//! Drives one question at a time: validate the raw answer, record it,
//! advance (or skip the following detail question on a "no"), and surface
//! the next prompt or completion. A failed validation leaves the controller
//! exactly where it was; retries are unlimited.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::question::QuestionKind;
use super::script::IntakeScript;
use super::validator::FieldError;
use super::Question;

/// Literal recorded for a detail field whose question was skipped.
const SKIPPED_ANSWER: &str = "None";

/// Collected answers, keyed by field key. Keys are unique; a value is only
/// ever overwritten by a later pass through the same field or by the
/// auto-fill on skip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(BTreeMap<String, String>);

impl AnswerSheet {
    /// Creates an empty answer sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded answer for a field, if any.
    pub fn get(&self, field_key: &str) -> Option<&str> {
        self.0.get(field_key).map(String::as_str)
    }

    /// Returns true if the field has a recorded answer.
    pub fn contains(&self, field_key: &str) -> bool {
        self.0.contains_key(field_key)
    }

    /// Returns the number of recorded answers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying map, ordered by field key.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    fn record(&mut self, field_key: &str, value: impl Into<String>) {
        self.0.insert(field_key.to_string(), value.into());
    }
}

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    /// Waiting for an answer to the current question.
    AwaitingAnswer,
    /// All questions answered; the answer sheet is final.
    Complete,
}

/// Outcome of a successful answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// Flow moved to the next question.
    Advanced {
        /// Prompt of the question now awaiting an answer.
        prompt: &'static str,
        /// Field key of a detail question bypassed by a "no", if any.
        skipped: Option<&'static str>,
    },
    /// The final question was answered; the flow is complete.
    Completed,
}

/// State machine over the ordered question list.
#[derive(Debug, Clone, Serialize)]
pub struct FlowController {
    script: IntakeScript,
    current_index: usize,
    answers: AnswerSheet,
}

impl FlowController {
    /// Creates a controller positioned at the first question of the script.
    pub fn new(script: IntakeScript) -> Self {
        Self {
            script,
            current_index: 0,
            answers: AnswerSheet::new(),
        }
    }

    /// Returns the question currently awaiting an answer, or None once
    /// complete.
    pub fn current_question(&self) -> Option<&Question> {
        self.script.question_at(self.current_index)
    }

    /// Returns the current position in the question list.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the flow status.
    pub fn status(&self) -> FlowStatus {
        if self.is_complete() {
            FlowStatus::Complete
        } else {
            FlowStatus::AwaitingAnswer
        }
    }

    /// Returns true once every question is answered or skipped.
    pub fn is_complete(&self) -> bool {
        self.current_index >= self.script.len()
    }

    /// Returns the answers recorded so far.
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Consumes the controller, yielding the answer sheet for handoff.
    pub fn into_answers(self) -> AnswerSheet {
        self.answers
    }

    /// Submits a raw answer for the current question.
    ///
    /// On success the answer is recorded and the flow advances: by one
    /// position normally, or by exactly two when a yes/no question answered
    /// "no" has a skip rule, in which case the bypassed detail field is
    /// auto-filled with `"None"` and its prompt is never shown.
    ///
    /// Submitting after completion is a no-op that reports `Completed`.
    ///
    /// # Errors
    ///
    /// The current question's [`FieldError`] verdict; the position and all
    /// committed answers are left untouched.
    pub fn submit(&mut self, raw: &str) -> Result<FlowStep, FieldError> {
        let question = match self.current_question() {
            Some(q) => q,
            None => return Ok(FlowStep::Completed),
        };

        if let Some(validator) = question.validator() {
            validator.validate(raw)?;
        }

        let field_key = question.field_key();
        let kind = question.kind();
        self.answers.record(field_key, raw);

        let mut next_index = self.current_index + 1;
        let mut skipped = None;

        if kind == QuestionKind::YesNo && raw.trim().eq_ignore_ascii_case("no") {
            if let Some(rule) = self.script.skip_for(field_key) {
                // Validated at script construction: the detail question sits
                // at current_index + 1, so this advances by exactly one
                // extra position.
                next_index = self.current_index + 2;
                self.answers.record(rule.detail(), SKIPPED_ANSWER);
                skipped = Some(rule.detail());
            }
        }

        self.current_index = next_index;

        match self.script.question_at(next_index) {
            Some(next) => Ok(FlowStep::Advanced {
                prompt: next.prompt(),
                skipped,
            }),
            None => Ok(FlowStep::Completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::question::Question;
    use super::super::script::SkipRule;
    use super::super::validator::FieldKind;
    use super::*;

    fn controller() -> FlowController {
        FlowController::new(IntakeScript::standard())
    }

    /// Small script: one yes/no with a skip edge, then a closing question.
    fn skip_script() -> IntakeScript {
        IntakeScript::new(
            vec![
                Question::yes_no("allergies", "Any allergies?"),
                Question::text("allergyDetails", "Describe them.", FieldKind::FreeText),
                Question::text("symptoms", "What are your symptoms?", FieldKind::FreeText),
            ],
            vec![SkipRule::new("allergies", "allergyDetails")],
        )
        .unwrap()
    }

    #[test]
    fn starts_at_first_question_awaiting_answer() {
        let flow = controller();
        assert_eq!(flow.status(), FlowStatus::AwaitingAnswer);
        assert_eq!(flow.current_question().unwrap().field_key(), "name");
        assert!(flow.answers().is_empty());
    }

    #[test]
    fn valid_answer_records_and_advances_by_one() {
        let mut flow = controller();
        let step = flow.submit("Anna-Marie").unwrap();

        assert_eq!(flow.answers().get("name"), Some("Anna-Marie"));
        assert_eq!(flow.current_index(), 1);
        assert!(matches!(step, FlowStep::Advanced { skipped: None, .. }));
    }

    #[test]
    fn invalid_answer_leaves_position_and_answers_untouched() {
        let mut flow = controller();
        let err = flow.submit("A").unwrap_err();

        assert_eq!(err, FieldError::TooShort { min: 2 });
        assert_eq!(flow.current_index(), 0);
        assert!(flow.answers().is_empty());
    }

    #[test]
    fn retries_are_unlimited() {
        let mut flow = controller();
        for _ in 0..5 {
            assert!(flow.submit("X").is_err());
        }
        assert!(flow.submit("Anna").is_ok());
        assert_eq!(flow.current_index(), 1);
    }

    #[test]
    fn no_answer_skips_detail_and_autofills_none() {
        let mut flow = FlowController::new(skip_script());
        let step = flow.submit("No").unwrap();

        assert_eq!(flow.answers().get("allergies"), Some("No"));
        assert_eq!(flow.answers().get("allergyDetails"), Some("None"));
        assert_eq!(flow.current_index(), 2);
        assert_eq!(
            step,
            FlowStep::Advanced {
                prompt: "What are your symptoms?",
                skipped: Some("allergyDetails"),
            }
        );
    }

    #[test]
    fn yes_answer_prompts_detail_normally() {
        let mut flow = FlowController::new(skip_script());
        let step = flow.submit("Yes").unwrap();

        assert_eq!(flow.current_index(), 1);
        assert_eq!(
            step,
            FlowStep::Advanced {
                prompt: "Describe them.",
                skipped: None,
            }
        );
        assert!(!flow.answers().contains("allergyDetails"));
    }

    #[test]
    fn skip_trigger_is_case_and_whitespace_insensitive() {
        let mut flow = FlowController::new(skip_script());
        flow.submit("  NO  ").unwrap();
        assert_eq!(flow.answers().get("allergyDetails"), Some("None"));
    }

    #[test]
    fn non_no_answer_to_yes_no_never_skips() {
        let mut flow = FlowController::new(skip_script());
        flow.submit("not sure").unwrap();
        assert_eq!(flow.current_index(), 1);
        assert!(!flow.answers().contains("allergyDetails"));
    }

    #[test]
    fn completing_the_last_question_finishes_the_flow() {
        let mut flow = FlowController::new(skip_script());
        flow.submit("No").unwrap();
        let step = flow.submit("persistent headache").unwrap();

        assert_eq!(step, FlowStep::Completed);
        assert_eq!(flow.status(), FlowStatus::Complete);
        assert!(flow.current_question().is_none());
    }

    #[test]
    fn submitting_after_completion_is_a_noop() {
        let mut flow = FlowController::new(skip_script());
        flow.submit("No").unwrap();
        flow.submit("persistent headache").unwrap();

        let answers_before = flow.answers().clone();
        assert_eq!(flow.submit("extra"), Ok(FlowStep::Completed));
        assert_eq!(flow.answers(), &answers_before);
    }

    #[test]
    fn into_answers_yields_the_full_sheet() {
        let mut flow = FlowController::new(skip_script());
        flow.submit("No").unwrap();
        flow.submit("persistent headache").unwrap();

        let answers = flow.into_answers();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get("symptoms"), Some("persistent headache"));
    }
}
