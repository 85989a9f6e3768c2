//! The chat session handle.
//!
//! A [`ChatSession`] is a stateful conversation bound to one model.  The
//! session loop and the retry wrapper only need [`ChatSession::send_message`],
//! so tests substitute scripted sessions for [`GeminiChat`].

use crate::Gemini;
use crate::error::{Error, Result};
use crate::types::{Content, GenerateContentRequest};

/// A stateful conversation with a remote model.
#[async_trait::async_trait]
pub trait ChatSession: Send {
    /// The model this session is bound to.
    fn model(&self) -> &str;

    /// Send one user message and return the model's text reply.
    ///
    /// The session's context only grows when the call succeeds.
    async fn send_message(&mut self, message: &str) -> Result<String>;
}

/// A [`ChatSession`] backed by the Gemini API.
///
/// The API itself is stateless, so the handle keeps every successful
/// exchange and sends it as context with the next message.
#[derive(Debug, Clone)]
pub struct GeminiChat {
    client: Gemini,
    model: String,
    history: Vec<Content>,
}

impl GeminiChat {
    /// Creates a chat with an empty context.
    pub fn new(client: Gemini, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            history: Vec::new(),
        }
    }

    /// The turns accumulated so far.
    pub fn history(&self) -> &[Content] {
        &self.history
    }
}

#[async_trait::async_trait]
impl ChatSession for GeminiChat {
    fn model(&self) -> &str {
        &self.model
    }

    async fn send_message(&mut self, message: &str) -> Result<String> {
        let user = Content::user(message);
        let mut contents = self.history.clone();
        contents.push(user.clone());
        let request = GenerateContentRequest::new(contents);

        let response = self.client.generate_content(&self.model, &request).await?;
        let Some(text) = response.text() else {
            return Err(Error::empty_response(response.empty_reason()));
        };

        self.history.push(user);
        self.history.push(Content::model(text.clone()));
        Ok(text)
    }
}
