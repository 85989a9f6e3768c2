// Public modules
pub mod content;
pub mod error_response;
pub mod generate_content;
pub mod role;
pub mod transcript_entry;

// Re-exports
pub use content::{Content, Part};
pub use error_response::{ErrorBody, ErrorResponse};
pub use generate_content::{
    Candidate, GenerateContentRequest, GenerateContentResponse, PromptFeedback,
};
pub use role::Role;
pub use transcript_entry::TranscriptEntry;
