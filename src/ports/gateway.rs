//! Outbound port for the completion handoff.
//!
//! When the guided flow completes, the core yields the full answer sheet
//! (plus any attached media) to an external submission collaborator. The
//! transport behind this trait, and any fallback on failure, belongs to the
//! caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::conversation::MediaAttachment;
use crate::domain::intake::AnswerSheet;

/// Token returned by the analysis service for a submitted intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReceipt {
    pub analysis_id: String,
}

impl AnalysisReceipt {
    /// Creates a receipt for the given analysis ID.
    pub fn new(analysis_id: impl Into<String>) -> Self {
        Self {
            analysis_id: analysis_id.into(),
        }
    }
}

/// Errors from the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The analysis service could not be reached.
    #[error("Analysis service unavailable: {0}")]
    Unavailable(String),

    /// The analysis service refused the submission.
    #[error("Analysis service rejected the submission: {0}")]
    RejectedSubmission(String),
}

/// External collaborator that receives completed intakes.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Submits the completed answer sheet and attached media for analysis.
    ///
    /// # Errors
    ///
    /// A [`GatewayError`]; the caller owns any fallback transport.
    async fn submit(
        &self,
        answers: &AnswerSheet,
        media: &[MediaAttachment],
    ) -> Result<AnalysisReceipt, GatewayError>;
}
