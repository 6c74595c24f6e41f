//! Conversation layer: transcript messages, the session phase machine, and
//! the IntakeSession aggregate.

mod message;
mod phase;
mod session;

pub use message::{Message, Role};
pub use phase::SessionPhase;
pub use session::{
    IntakeSession, MediaAttachment, MediaKind, SessionError, SessionEvent, SessionSnapshot,
};
