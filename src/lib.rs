// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod history;
pub mod observability;
pub mod render;
pub mod retry;
pub mod session;
pub mod types;

// Re-exports
pub use client::Gemini;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use history::HistoryStore;
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer};
pub use retry::send_with_retry;
pub use session::{ChatSession, GeminiChat};
pub use types::*;
