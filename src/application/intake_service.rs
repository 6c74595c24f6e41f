//! IntakeService - the application-facing wrapper around one session.
//!
//! Serializes submissions: the session sits behind a tokio mutex, so a
//! second submit arriving while a pending pacing delay is in flight queues
//! behind the first instead of racing it. One service instance per session;
//! sessions never share mutable state.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::conversation::{
    IntakeSession, MediaAttachment, SessionError, SessionEvent, SessionSnapshot,
};
use crate::ports::{AnalysisGateway, AnalysisReceipt, GatewayError, ResponsePacer};

/// Errors surfaced by the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The session rejected the operation.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The completion handoff failed. The questionnaire is still complete
    /// and the answers remain available; fallback transport is the caller's
    /// concern.
    #[error("Completion handoff failed: {0}")]
    Handoff(#[from] GatewayError),
}

/// Result of one submission: the session event plus, on guided completion,
/// the analysis receipt from the handoff.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub event: SessionEvent,
    pub receipt: Option<AnalysisReceipt>,
}

/// Single-writer driver for one intake session.
pub struct IntakeService {
    session: Mutex<IntakeSession>,
    pacer: Arc<dyn ResponsePacer>,
    gateway: Arc<dyn AnalysisGateway>,
}

impl IntakeService {
    /// Creates a service around an existing session.
    pub fn new(
        session: IntakeSession,
        pacer: Arc<dyn ResponsePacer>,
        gateway: Arc<dyn AnalysisGateway>,
    ) -> Self {
        Self {
            session: Mutex::new(session),
            pacer,
            gateway,
        }
    }

    /// Creates a service over the canonical intake script.
    pub fn standard(pacer: Arc<dyn ResponsePacer>, gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self::new(IntakeSession::standard(), pacer, gateway)
    }

    /// Submits one piece of user text.
    ///
    /// Holds the session lock across the pacing delay so concurrent submits
    /// queue in arrival order. On guided completion the full answer sheet
    /// and attachments are handed to the analysis gateway.
    ///
    /// # Errors
    ///
    /// - `Session` if the session is closed
    /// - `Handoff` if the gateway rejects the completed intake
    pub async fn submit(&self, raw: &str) -> Result<SubmitOutcome, ServiceError> {
        let mut session = self.session.lock().await;
        let session_id = *session.id();

        let event = session.submit_text(raw)?;
        debug!(%session_id, stage = session.stage(), ?event, "processed submission");

        if !matches!(event, SessionEvent::Ignored) {
            self.pacer.pause(session.response_delay()).await;
        }

        let receipt = if matches!(event, SessionEvent::GuidedComplete) {
            info!(
                %session_id,
                answers = session.answers().len(),
                attachments = session.attachments().len(),
                "guided intake complete, submitting for analysis"
            );
            let receipt = self
                .gateway
                .submit(session.answers(), session.attachments())
                .await
                .map_err(|err| {
                    warn!(%session_id, error = %err, "analysis handoff failed");
                    err
                })?;
            Some(receipt)
        } else {
            None
        };

        Ok(SubmitOutcome { event, receipt })
    }

    /// Attaches media for the completion handoff.
    pub async fn attach(&self, media: MediaAttachment) {
        self.session.lock().await.attach(media);
    }

    /// Closes the session.
    ///
    /// # Errors
    ///
    /// - `Session` if the session is already closed
    pub async fn close(&self) -> Result<(), ServiceError> {
        self.session.lock().await.close()?;
        Ok(())
    }

    /// Returns the renderer-facing view of the session.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }
}
