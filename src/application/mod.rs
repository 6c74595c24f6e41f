//! Application layer: orchestration around the session aggregate.

mod intake_service;

pub use intake_service::{IntakeService, ServiceError, SubmitOutcome};
