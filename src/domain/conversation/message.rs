//! Message entity for the session transcript.
//!
//! Messages are immutable records of the exchange between the assistant and
//! the user. The transcript is append-only and strictly ordered by insertion,
//! not by timestamp granularity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Assistant-authored prompt or reply.
    Ai,
    /// User-typed answer or free text.
    User,
}

/// An immutable message within a session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    created_at: Timestamp,
}

impl Message {
    /// Creates a new message. Callers keep empty content out of the
    /// transcript; the session ignores blank submissions before this point.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates an assistant message.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Role::Ai, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the author role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this message is from the assistant.
    pub fn is_ai(&self) -> bool {
        self.role == Role::Ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_creates_assistant_message() {
        let msg = Message::ai("What is your name?");
        assert!(msg.is_ai());
        assert!(!msg.is_user());
        assert_eq!(msg.content(), "What is your name?");
    }

    #[test]
    fn user_creates_user_message() {
        let msg = Message::user("Anna");
        assert!(msg.is_user());
        assert_eq!(msg.role(), Role::User);
    }

    #[test]
    fn messages_get_unique_ids() {
        let a = Message::user("hello");
        let b = Message::user("hello");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn role_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Ai).unwrap(), "\"ai\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn sets_created_at() {
        let msg = Message::user("hi");
        let now = Timestamp::now();
        assert!(msg.created_at().as_datetime() <= now.as_datetime());
    }
}
