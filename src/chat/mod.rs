//! The two chat front ends built on the history store and the retry sender.
//!
//! - [`ChatApp`]: the reactive variant; one event per submitted message, a
//!   clear action, and no replay on startup.
//! - [`run_terminal`]: the basic variant; reads lines until `exit` and replays
//!   stored user messages on a cold start.
//!
//! [`config`](ChatConfig) and [`commands`](parse_command) are shared by the
//! binaries.

mod app;
mod commands;
mod config;
mod terminal;

pub use app::ChatApp;
pub use commands::{ChatCommand, help_text, is_exit_command, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_ENV_FILE, DEFAULT_MODEL, resolve_api_key};
pub use terminal::{LineSource, PROMPT, replay_history, run_terminal};
