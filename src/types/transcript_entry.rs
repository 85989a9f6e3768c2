use serde::{Deserialize, Serialize};

use crate::types::Role;

/// One message in the running transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who wrote the message.
    pub role: Role,

    /// The message text.
    pub content: String,
}

impl TranscriptEntry {
    /// Create a new entry.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns true for entries typed by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
