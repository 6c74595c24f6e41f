//! IntakeSession aggregate - the single mutation entry point for callers.
//!
//! Owns the transcript, the flow controller and the dispatcher, and routes
//! each submitted text through whichever applies for the current phase.
//! One session instance per conversation, passed explicitly; no shared
//! mutable state across sessions.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::domain::dispatch::Dispatcher;
use crate::domain::foundation::{AttachmentId, SessionId, StateMachine, Timestamp, TransitionError};
use crate::domain::intake::{AnswerSheet, FieldError, FlowController, FlowStatus, FlowStep, IntakeScript};

use super::message::Message;
use super::phase::SessionPhase;

/// Closing line appended when the questionnaire completes.
const GUIDED_COMPLETE_MESSAGE: &str = "Thank you. That's everything I need for your intake. \
     Your answers are being passed on for analysis. Feel free to keep telling me how \
     you're feeling in the meantime.";

/// Errors raised by session mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session was closed and no longer accepts input.
    #[error("Session is closed and no longer accepts input")]
    Closed,

    /// Defensive: an invalid phase transition was attempted.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Media captured outside this core and attached for the completion handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    id: AttachmentId,
    kind: MediaKind,
    uri: String,
}

/// What a media attachment contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Image,
    Document,
}

impl MediaAttachment {
    /// Creates an attachment pointing at externally stored media.
    pub fn new(kind: MediaKind, uri: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::new(),
            kind,
            uri: uri.into(),
        }
    }

    /// Returns the attachment ID.
    pub fn id(&self) -> &AttachmentId {
        &self.id
    }

    /// Returns the media kind.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns the URI of the stored media.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// What a single submission did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Guided flow accepted the answer and moved to the next question.
    Advanced {
        /// Prompt now awaiting an answer.
        prompt: &'static str,
        /// Detail field bypassed by a "no", if any.
        skipped: Option<&'static str>,
    },

    /// Guided flow rejected the answer; the same question stands.
    Rejected { error: FieldError },

    /// The final question was answered; the questionnaire is complete and
    /// the answer sheet is ready for handoff.
    GuidedComplete,

    /// Open dialogue reply selected by the dispatcher.
    Replied { template: &'static str },

    /// Blank input; nothing changed.
    Ignored,
}

/// Renderer-facing view of the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub phase: SessionPhase,
    pub flow_status: FlowStatus,
    pub messages: Vec<Message>,
    /// Prompt awaiting an answer, when still in the guided phase.
    pub current_prompt: Option<&'static str>,
    /// Error text from the most recent rejected answer, cleared on success.
    pub last_error: Option<String>,
}

/// Aggregate owning one conversation's state.
#[derive(Debug, Clone)]
pub struct IntakeSession {
    id: SessionId,
    phase: SessionPhase,
    flow: FlowController,
    dispatcher: Dispatcher,
    messages: Vec<Message>,
    attachments: Vec<MediaAttachment>,
    /// Completed-exchange counter. Varies response pacing only, never
    /// branching.
    stage: u32,
    last_error: Option<String>,
    created_at: Timestamp,
}

impl IntakeSession {
    /// Creates a session over the given script, with the first question
    /// already prompted.
    pub fn new(script: IntakeScript) -> Self {
        let flow = FlowController::new(script);
        let mut messages = Vec::new();
        if let Some(question) = flow.current_question() {
            messages.push(Message::ai(question.prompt()));
        }
        Self {
            id: SessionId::new(),
            phase: SessionPhase::Guided,
            flow,
            dispatcher: Dispatcher::new(),
            messages,
            attachments: Vec::new(),
            stage: 0,
            last_error: None,
            created_at: Timestamp::now(),
        }
    }

    /// Creates a session over the canonical intake script.
    pub fn standard() -> Self {
        Self::new(IntakeScript::standard())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the transcript in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the answers recorded so far.
    pub fn answers(&self) -> &AnswerSheet {
        self.flow.answers()
    }

    /// Returns attached media.
    pub fn attachments(&self) -> &[MediaAttachment] {
        &self.attachments
    }

    /// Returns the completed-exchange counter.
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the pacing delay before the next assistant message is shown.
    ///
    /// Between 1.0 and 1.5 seconds, varied by `stage`. Purely cosmetic; the
    /// application layer applies it through an injectable pacer so tests
    /// never wait.
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(1000 + 250 * u64::from(self.stage % 3))
    }

    /// Returns the renderer-facing view.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            phase: self.phase,
            flow_status: self.flow.status(),
            messages: self.messages.clone(),
            current_prompt: self.flow.current_question().map(|q| q.prompt()),
            last_error: self.last_error.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Submits one piece of user text - the single mutation entry point.
    ///
    /// In the guided phase the text is validated and drives the flow; in
    /// open dialogue it is answered by the dispatcher. Blank input is
    /// ignored. Each successful exchange appends the user message and the
    /// assistant reply, in that order, and bumps `stage`.
    ///
    /// # Errors
    ///
    /// - `Closed` when the session no longer accepts input.
    pub fn submit_text(&mut self, raw: &str) -> Result<SessionEvent, SessionError> {
        if !self.phase.accepts_input() {
            return Err(SessionError::Closed);
        }
        if raw.trim().is_empty() {
            return Ok(SessionEvent::Ignored);
        }

        match self.phase {
            SessionPhase::Guided => self.submit_guided(raw),
            SessionPhase::OpenDialogue => Ok(self.submit_open(raw)),
            SessionPhase::Closed => Err(SessionError::Closed),
        }
    }

    /// Attaches media for the completion handoff.
    pub fn attach(&mut self, media: MediaAttachment) {
        self.attachments.push(media);
    }

    /// Closes the session. Safe at any point before or after completion.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.phase = self.phase.transition_to(SessionPhase::Closed)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    fn submit_guided(&mut self, raw: &str) -> Result<SessionEvent, SessionError> {
        self.messages.push(Message::user(raw));

        match self.flow.submit(raw) {
            Err(error) => {
                // Same question stands; committed answers untouched.
                self.last_error = Some(error.to_string());
                self.messages.push(Message::ai(error.to_string()));
                Ok(SessionEvent::Rejected { error })
            }
            Ok(FlowStep::Advanced { prompt, skipped }) => {
                self.last_error = None;
                self.stage += 1;
                self.messages.push(Message::ai(prompt));
                Ok(SessionEvent::Advanced { prompt, skipped })
            }
            Ok(FlowStep::Completed) => {
                self.last_error = None;
                self.stage += 1;
                self.messages.push(Message::ai(GUIDED_COMPLETE_MESSAGE));
                self.phase = self.phase.transition_to(SessionPhase::OpenDialogue)?;
                Ok(SessionEvent::GuidedComplete)
            }
        }
    }

    fn submit_open(&mut self, raw: &str) -> SessionEvent {
        self.messages.push(Message::user(raw));
        let template = self.dispatcher.respond(raw);
        self.messages.push(Message::ai(template));
        self.stage += 1;
        SessionEvent::Replied { template }
    }
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::standard()
    }
}
