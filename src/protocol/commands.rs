//! Module `commands`
//!
//! Defines the two commands a session can carry and how user input is
//! turned into one.

use std::fmt;

/// Token requesting a directory listing.
pub const LIST_TOKEN: &str = "-l";

/// Token requesting a file.
pub const FETCH_TOKEN: &str = "-g";

/// A command sent to the server on the control connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the server's working directory
    List,
    /// Retrieve a file by name
    Fetch { filename: String },
}

impl Command {
    /// Returns the text sent on the control connection.
    pub fn wire_token(&self) -> String {
        match self {
            Command::List => LIST_TOKEN.to_string(),
            Command::Fetch { filename } => format!("{} {}", FETCH_TOKEN, filename),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_token())
    }
}

/// Result of interpreting one line of command input.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandInput {
    /// A complete command.
    Ready(Command),
    /// `-g` was given without a filename.
    NeedsFilename,
    /// Neither `-l` nor `-g` appears in the input.
    Invalid,
}

/// Parses command input such as `-l`, `-g notes.txt` or `notes.txt -g`.
///
/// `filename` is used when the input is a bare `-g`.
pub fn parse_command(raw: &str, filename: Option<&str>) -> CommandInput {
    let trimmed = raw.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    if parts.contains(&FETCH_TOKEN) {
        let named = parts
            .iter()
            .find(|part| **part != FETCH_TOKEN)
            .map(|s| s.to_string())
            .or_else(|| filename.filter(|f| !f.trim().is_empty()).map(|f| f.trim().to_string()));

        return match named {
            Some(filename) => CommandInput::Ready(Command::Fetch { filename }),
            None => CommandInput::NeedsFilename,
        };
    }

    if parts.contains(&LIST_TOKEN) {
        return CommandInput::Ready(Command::List);
    }

    CommandInput::Invalid
}
