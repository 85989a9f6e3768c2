//! Interactive Gemini chat with persistent history.
//!
//! The saved transcript is shown on startup and every exchange is written
//! back to the history file.  Nothing is replayed to the model, so it starts
//! without the earlier context.
//!
//! # Usage
//!
//! ```bash
//! # Key in ./.env as apikey=..., history in ./chat_memory.json
//! gemchat
//!
//! # Different model and history file
//! gemchat --model gemini-2.5-pro --history ~/notes/chat.json
//! ```
//!
//! # Commands
//!
//! - `/clear` - Clear chat history
//! - `/history` - Show the transcript again
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use gemchat::chat::{ChatApp, ChatArgs, ChatCommand, ChatConfig, help_text, parse_command};
use gemchat::{Gemini, HistoryStore, PlainTextRenderer, Renderer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("gemchat [OPTIONS]");
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

    println!("Gemini Chat (model: {})", config.model);
    println!("Type /help for commands, /quit to exit\n");

    let store = HistoryStore::new(&config.history_path);
    let mut app = ChatApp::start(client.chat(&config.model), store, &mut renderer);
    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            let _ = app.clear(&mut renderer);
                        }
                        ChatCommand::History => {
                            app.render_transcript(&mut renderer);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Failures are already rendered inline; the session carries on.
                let _ = app.submit(&line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}
