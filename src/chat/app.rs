//! The reactive chat application.
//!
//! [`ChatApp`] owns the transcript and the chat session for the life of the
//! process.  Each submitted message is one event: append, send, append,
//! persist, render.  Nothing is replayed into the session on startup.

use crate::error::Result;
use crate::history::HistoryStore;
use crate::render::Renderer;
use crate::retry::send_with_retry;
use crate::session::ChatSession;
use crate::types::{Role, TranscriptEntry};

/// Process-lifetime chat state, constructed once and passed to every event.
pub struct ChatApp<C: ChatSession> {
    chat: C,
    store: HistoryStore,
    transcript: Vec<TranscriptEntry>,
}

impl<C: ChatSession> ChatApp<C> {
    /// Loads the persisted transcript and renders it.
    pub fn start(chat: C, store: HistoryStore, renderer: &mut dyn Renderer) -> Self {
        let transcript = store.load();
        renderer.print_transcript(&transcript);
        Self {
            chat,
            store,
            transcript,
        }
    }

    /// The transcript as currently held in memory.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The model the chat session is bound to.
    pub fn model(&self) -> &str {
        self.chat.model()
    }

    /// The store the transcript is persisted to.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Handles one submitted message.
    ///
    /// A prompt that is empty or only whitespace does nothing.  Any other
    /// prompt is sent and recorded exactly as typed.  On a failed send the
    /// error is rendered inline and returned; the user entry stays in memory
    /// but nothing is persisted.  On success the full transcript is saved.
    pub async fn submit(&mut self, prompt: &str, renderer: &mut dyn Renderer) -> Result<()> {
        if prompt.trim().is_empty() {
            return Ok(());
        }
        self.transcript.push(TranscriptEntry::user(prompt));
        renderer.print_message(Role::User, prompt);

        let answer = match send_with_retry(&mut self.chat, prompt, renderer).await {
            Ok(answer) => answer,
            Err(err) => {
                renderer.print_error(&format!("Request failed: {err}"));
                return Err(err);
            }
        };

        self.transcript.push(TranscriptEntry::assistant(answer.clone()));
        if let Err(err) = self.store.save(&self.transcript) {
            renderer.print_error(&format!("Failed to save chat history: {err}"));
            return Err(err);
        }
        renderer.print_message(Role::Assistant, &answer);
        Ok(())
    }

    /// Empties the transcript in memory and on disk.
    pub fn clear(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        self.transcript.clear();
        match self.store.clear() {
            Ok(()) => {
                renderer.print_info("Chat history cleared.");
                Ok(())
            }
            Err(err) => {
                renderer.print_error(&format!("Failed to clear chat history: {err}"));
                Err(err)
            }
        }
    }

    /// Re-renders the whole transcript.
    pub fn render_transcript(&self, renderer: &mut dyn Renderer) {
        renderer.print_transcript(&self.transcript);
    }
}
