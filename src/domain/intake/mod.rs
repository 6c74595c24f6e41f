//! Guided intake flow: field validators, the ordered question script, and
//! the flow controller that advances through it.

mod flow;
mod question;
mod script;
mod validator;

pub use flow::{AnswerSheet, FlowController, FlowStatus, FlowStep};
pub use question::{Question, QuestionKind};
pub use script::{IntakeScript, ScriptError, SkipRule};
pub use validator::{FieldError, FieldKind};
