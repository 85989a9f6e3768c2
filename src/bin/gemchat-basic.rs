//! Line-by-line Gemini chat for the terminal.
//!
//! Earlier user messages from the history file are re-sent on startup to
//! rebuild the model's context.  Type `exit` to quit; any request failure
//! ends the program.
//!
//! # Usage
//!
//! ```bash
//! gemchat-basic
//! gemchat-basic --history other.json --env-file ~/.config/gemchat.env
//! ```

use arrrg::CommandLine;
use rustyline::DefaultEditor;

use gemchat::chat::{ChatArgs, ChatConfig, run_terminal};
use gemchat::{Gemini, HistoryStore, PlainTextRenderer, Renderer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("gemchat-basic [OPTIONS]");
    let config = ChatConfig::from(args);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);

    let api_key = match config.load_api_key() {
        Ok(key) => key,
        Err(err) => {
            renderer.print_error(&err.to_string());
            std::process::exit(1);
        }
    };
    let client = Gemini::with_options(Some(api_key), config.base_url.clone(), None)?;

    let mut chat = client.chat(&config.model);
    let store = HistoryStore::new(&config.history_path);
    let mut rl = DefaultEditor::new()?;

    run_terminal(&mut chat, &store, &mut rl, &mut renderer).await?;
    Ok(())
}
