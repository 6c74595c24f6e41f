//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and the state machine trait
//! that form the vocabulary of the intake domain.

mod ids;
mod state_machine;
mod timestamp;

pub use ids::{AttachmentId, MessageId, SessionId};
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::Timestamp;
