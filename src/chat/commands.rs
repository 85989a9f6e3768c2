//! Slash command parsing for the chat application.
//!
//! Lines starting with `/` control the session and are never sent to the API.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the in-memory and persisted transcript.
    Clear,

    /// Re-display the whole transcript.
    History,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use gemchat::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
/// assert!(parse_command("Hello, Gemini!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "history" => ChatCommand::History,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    match (result, argument) {
        (ChatCommand::Invalid(msg), _) => Some(ChatCommand::Invalid(msg)),
        (_, Some(_)) => Some(ChatCommand::Invalid(format!(
            "/{} takes no arguments",
            command
        ))),
        (result, None) => Some(result),
    }
}

/// Returns true for the basic loop's exit word, matched case-insensitively.
pub fn is_exit_command(input: &str) -> bool {
    input.to_lowercase() == "exit"
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /clear                 Clear chat history (memory and file)
  /history               Show the whole transcript again
  /help                  Show this help message
  /quit                  Exit the chat"#
}
