//! The basic line-by-line terminal loop.
//!
//! On a cold start the stored user messages are re-sent to the fresh session
//! so the model sees the earlier conversation again.  Replies to the replay
//! are discarded and the replay has no rate-limit protection.

use std::io;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::commands::is_exit_command;
use crate::error::{Error, Result};
use crate::history::HistoryStore;
use crate::observability::SEND_REPLAYED;
use crate::render::Renderer;
use crate::retry::send_with_retry;
use crate::session::ChatSession;
use crate::types::{Role, TranscriptEntry};

/// Prompt shown before each line of input.
pub const PROMPT: &str = "You: ";

/// A source of input lines.
pub trait LineSource {
    /// Reads one line, without its newline.  `Ok(None)` means input is over.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => {
                let _ = self.add_history_entry(line.as_str());
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(err)) => Err(Error::io("failed to read input", err)),
            Err(err) => Err(Error::io(
                "failed to read input",
                io::Error::other(err.to_string()),
            )),
        }
    }
}

/// Re-sends every stored user message to `chat`, in order.
///
/// Returns the number of messages replayed.  The first failure stops the
/// replay and is returned.
pub async fn replay_history<C: ChatSession + ?Sized>(
    chat: &mut C,
    entries: &[TranscriptEntry],
) -> Result<usize> {
    let mut replayed = 0;
    for entry in entries.iter().filter(|e| e.is_user()) {
        chat.send_message(&entry.content).await?;
        SEND_REPLAYED.click();
        replayed += 1;
    }
    Ok(replayed)
}

/// Runs the terminal chat until `exit` or end of input.
///
/// Each exchange is appended to the history and the whole file rewritten.
/// Send and save failures end the loop with an error.
pub async fn run_terminal<C, L>(
    chat: &mut C,
    store: &HistoryStore,
    input: &mut L,
    renderer: &mut dyn Renderer,
) -> Result<()>
where
    C: ChatSession + ?Sized,
    L: LineSource + ?Sized,
{
    let mut history = store.load();
    replay_history(chat, &history).await?;

    renderer.print_info("Chat started. Type 'exit' to quit.\n");

    while let Some(line) = input.read_line(PROMPT)? {
        if is_exit_command(&line) {
            break;
        }

        let reply = send_with_retry(chat, &line, renderer).await?;
        renderer.print_message(Role::Assistant, &reply);

        history.push(TranscriptEntry::user(line));
        history.push(TranscriptEntry::assistant(reply));
        store.save(&history)?;
    }

    renderer.print_info("Chat ended.");
    Ok(())
}
