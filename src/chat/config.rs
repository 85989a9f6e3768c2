//! Configuration types for the chat binaries.
//!
//! This module provides CLI argument parsing via `arrrg`, the resolved
//! [`ChatConfig`], and API key lookup from the environment or a dotenv file.

use std::path::{Path, PathBuf};

use arrrg_derive::CommandLine;

use crate::client::API_KEY_VAR;
use crate::error::{Error, Result};
use crate::history::DEFAULT_HISTORY_PATH;

/// Model used when none is given.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Dotenv file consulted for the API key when none is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Command-line arguments shared by the chat binaries.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gemini-2.5-flash)", "MODEL")]
    pub model: Option<String>,

    /// Path of the JSON history file.
    #[arrrg(optional, "History file (default: chat_memory.json)", "PATH")]
    pub history: Option<String>,

    /// Path of the dotenv file holding the API key.
    #[arrrg(optional, "Env file with apikey=... (default: .env)", "PATH")]
    pub env_file: Option<String>,

    /// Override the API base URL.
    #[arrrg(optional, "API base URL", "URL")]
    pub base_url: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Resolved configuration for a chat run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// The model the chat session is bound to.
    pub model: String,

    /// Where the transcript is persisted.
    pub history_path: PathBuf,

    /// Dotenv file consulted for the API key.
    pub env_file: PathBuf,

    /// Base URL override for the API.
    pub base_url: Option<String>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            base_url: None,
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the history file path.
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Sets the dotenv file path.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Looks up the API key: process environment first, then the env file.
    pub fn load_api_key(&self) -> Result<String> {
        resolve_api_key(std::env::var(API_KEY_VAR).ok(), &self.env_file)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            model: args.model.unwrap_or(defaults.model),
            history_path: args.history.map(PathBuf::from).unwrap_or(defaults.history_path),
            env_file: args.env_file.map(PathBuf::from).unwrap_or(defaults.env_file),
            base_url: args.base_url,
            use_color: !args.no_color,
        }
    }
}

/// Picks the API key from `from_env` or, failing that, from `env_file`.
///
/// Blank values count as missing.  A missing or unreadable env file is not an
/// error by itself; only the absence of a key is.
pub fn resolve_api_key(from_env: Option<String>, env_file: &Path) -> Result<String> {
    if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
        return Ok(key);
    }
    if let Ok(iter) = dotenvy::from_path_iter(env_file) {
        for (name, value) in iter.flatten() {
            if name == API_KEY_VAR && !value.trim().is_empty() {
                return Ok(value);
            }
        }
    }
    Err(Error::configuration(format!(
        "API key not found in {}. Add: {API_KEY_VAR}=YOUR_KEY",
        env_file.display()
    )))
}
