//! Domain layer containing the intake core's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, state machine)
//! - `intake` - Field validators, the question script, and the flow controller
//! - `dispatch` - Ordered keyword rules for open-dialogue replies
//! - `conversation` - Messages, session phases, and the session aggregate

pub mod conversation;
pub mod dispatch;
pub mod foundation;
pub mod intake;
