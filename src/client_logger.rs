//! Logging trait for Gemini client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log every API interaction passing through the [`Gemini`](crate::Gemini)
//! client.

use crate::{Error, GenerateContentRequest, GenerateContentResponse};

/// A trait for logging Gemini client operations.
///
/// # Example
///
/// ```rust,ignore
/// use gemchat::{ClientLogger, Error, GenerateContentRequest, GenerateContentResponse};
/// use std::io::Write;
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, model: &str, request: &GenerateContentRequest) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{model} <- {}", serde_json::to_string(request).unwrap()).unwrap();
///     }
///
///     fn log_response(&self, model: &str, response: &GenerateContentResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{model} -> {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
///
///     fn log_error(&self, model: &str, error: &Error) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{model} !! {error}").unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, model: &str, request: &GenerateContentRequest);

    /// Log a successfully decoded response.
    fn log_response(&self, model: &str, response: &GenerateContentResponse);

    /// Log a failed request.
    ///
    /// Called once per failed call with the error that will be returned to
    /// the caller.
    fn log_error(&self, model: &str, error: &Error);
}
