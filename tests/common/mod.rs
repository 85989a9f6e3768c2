//! Scripted collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use gemchat::chat::LineSource;
use gemchat::{ChatSession, Error, Renderer, Result, Role};

/// A chat session that answers from a fixed script and records what it was sent.
pub struct ScriptedChat {
    replies: VecDeque<Result<String>>,
    pub sent: Vec<String>,
}

impl ScriptedChat {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: replies.into(),
            sent: Vec::new(),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }
}

#[async_trait::async_trait]
impl ChatSession for ScriptedChat {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn send_message(&mut self, message: &str) -> Result<String> {
        self.sent.push(message.to_string());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(Error::api(500, None, "script exhausted", None)))
    }
}

/// Everything a renderer was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Message(Role, String),
    Error(String),
    Warning(String),
    Info(String),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub shown: Vec<Shown>,
}

impl RecordingRenderer {
    pub fn warnings(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Warning(w) => Some(w.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Error(e) => Some(e.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<(Role, &str)> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Message(role, text) => Some((*role, text.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Info(i) => Some(i.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn print_message(&mut self, role: Role, content: &str) {
        self.shown.push(Shown::Message(role, content.to_string()));
    }

    fn print_error(&mut self, error: &str) {
        self.shown.push(Shown::Error(error.to_string()));
    }

    fn print_warning(&mut self, warning: &str) {
        self.shown.push(Shown::Warning(warning.to_string()));
    }

    fn print_info(&mut self, info: &str) {
        self.shown.push(Shown::Info(info.to_string()));
    }
}

/// Input lines fed to the terminal loop; running out is end of input.
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

pub fn rate_limit_error(message: &str) -> Error {
    Error::api(429, Some("RESOURCE_EXHAUSTED".to_string()), message, None)
}
