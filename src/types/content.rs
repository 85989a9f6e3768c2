use serde::{Deserialize, Serialize};

use crate::types::Role;

/// A single turn in a Gemini `contents` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// `"user"` or `"model"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The parts making up this turn.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of a [`Content`].  Only text parts are produced or consumed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Part {
    /// Text of the part; absent for non-text parts in responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Content {
    /// Create a single-part text turn for `role`.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.wire_name().to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::text(Role::User, text)
    }

    /// Create a model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self::text(Role::Assistant, text)
    }

    /// Concatenated text of every text part, or `None` when there is none.
    pub fn joined_text(&self) -> Option<String> {
        let mut texts = self.parts.iter().filter_map(|p| p.text.as_deref()).peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}
