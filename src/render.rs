//! Output rendering for the chat loops.
//!
//! The session loops never print directly; they go through a [`Renderer`] so
//! the same loop can drive a terminal, a recording in tests, or another
//! display surface.

use std::io::{self, Stdout, Write};

use crate::types::{Role, TranscriptEntry};

/// ANSI escape code for dim text (used for info lines).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for speaker labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the assistant label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for warnings).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Width of the rule printed after each reply.
const RULE_WIDTH: usize = 40;

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Display one transcript message.
    fn print_message(&mut self, role: Role, content: &str);

    /// Display an error inline, where the interaction happened.
    fn print_error(&mut self, error: &str);

    /// Display a recoverable problem, such as a pending retry.
    fn print_warning(&mut self, warning: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Display every entry of a transcript, oldest first.
    fn print_transcript(&mut self, entries: &[TranscriptEntry]) {
        for entry in entries {
            self.print_message(entry.role, &entry.content);
        }
    }
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, role: Role, content: &str) {
        print!("{}", format_message(role, content, self.use_color));
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            eprintln!("Error: {error}");
        }
    }

    fn print_warning(&mut self, warning: &str) {
        if self.use_color {
            eprintln!("{ANSI_YELLOW}Warning: {warning}{ANSI_RESET}");
        } else {
            eprintln!("Warning: {warning}");
        }
    }

    fn print_info(&mut self, info: &str) {
        if self.use_color {
            println!("{ANSI_DIM}{info}{ANSI_RESET}");
        } else {
            println!("{info}");
        }
        self.flush();
    }
}

/// Formats one message the way [`PlainTextRenderer`] prints it.
///
/// User messages are a single `You:` line.  Replies start on a fresh line with
/// `Bot:` and are followed by a rule.
pub fn format_message(role: Role, content: &str, use_color: bool) -> String {
    let (label, color) = match role {
        Role::User => ("You:", ANSI_CYAN),
        Role::Assistant => ("Bot:", ANSI_GREEN),
    };
    let label = if use_color {
        format!("{ANSI_BOLD}{color}{label}{ANSI_RESET}")
    } else {
        label.to_string()
    };
    match role {
        Role::User => format!("{label} {content}\n"),
        Role::Assistant => format!("\n{label} {content}\n{}\n", "-".repeat(RULE_WIDTH)),
    }
}
