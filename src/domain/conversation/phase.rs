//! Session phase state machine.
//!
//! A session starts in the guided questionnaire, opens into free dialogue
//! once the questionnaire completes, and can be closed from either phase.
//! Abandoning a session before completion is always safe; nothing outside
//! the session's own memory needs reconciliation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle phase of an intake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Working through the ordered questionnaire.
    #[default]
    Guided,

    /// Questionnaire complete; free text is routed to the dispatcher.
    OpenDialogue,

    /// Session ended; no further input accepted.
    Closed,
}

impl SessionPhase {
    /// Returns true if the session still accepts user input.
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            (Guided, OpenDialogue) | (Guided, Closed) | (OpenDialogue, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Guided => vec![OpenDialogue, Closed],
            OpenDialogue => vec![Closed],
            Closed => vec![],
        }
    }
}
