//! Parsing of lines typed at the prompt.

use std::path::PathBuf;

/// A reference to a conversation from `/open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRef {
    /// A conversation id
    Id(String),
    /// 1-based position in the last listing (`#3`)
    Index(usize),
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    /// Plain text to send
    Message(String),
    New,
    Chats,
    Open(ChatRef),
    Attach(PathBuf),
    Detach,
    Help,
    Quit,
    /// Unrecognised or malformed slash command
    Invalid(String),
    /// Blank line
    Empty,
}

pub const HELP: &str = "\
Type a message and press Enter to send it.

  /new             start a new conversation
  /chats           list conversations
  /open <id|#n>    open a conversation by id or list position
  /attach <path>   attach a file to the next message
  /detach          drop the attached file
  /help            show this help
  /quit            exit (or Ctrl+C)

Esc returns from the conversation list to the messages.
Start a line with // to send text that begins with a slash.";

impl InputCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return InputCommand::Empty;
        }
        if let Some(escaped) = trimmed.strip_prefix("//") {
            return InputCommand::Message(format!("/{}", escaped));
        }
        let Some(command) = trimmed.strip_prefix('/') else {
            return InputCommand::Message(trimmed.to_string());
        };

        let (name, rest) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        match (name, rest.is_empty()) {
            ("new", true) => InputCommand::New,
            ("chats", true) => InputCommand::Chats,
            ("detach", true) => InputCommand::Detach,
            ("help", true) => InputCommand::Help,
            ("quit" | "exit", true) => InputCommand::Quit,
            ("open", false) => match rest.strip_prefix('#') {
                Some(n) => match n.parse::<usize>() {
                    Ok(n) if n > 0 => InputCommand::Open(ChatRef::Index(n)),
                    _ => InputCommand::Invalid(format!("not a list position: #{}", n)),
                },
                None => InputCommand::Open(ChatRef::Id(rest.to_string())),
            },
            ("attach", false) => InputCommand::Attach(PathBuf::from(unquote(rest))),
            ("open" | "attach", true) => InputCommand::Invalid(format!("/{} needs an argument", name)),
            _ => InputCommand::Invalid(format!("unknown command: /{}", name)),
        }
    }
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}
