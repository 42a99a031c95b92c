//! Module `console`
//!
//! User interaction for a session: status output, questions and yes/no
//! confirmation. The session engine only talks to the `Console` trait so it
//! can run without a terminal.

use std::collections::VecDeque;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

/// Console collaborator used by the session and by command resolution.
// Sessions run on a current-thread runtime, so these futures need not be Send.
#[allow(async_fn_in_trait)]
pub trait Console {
    /// Prints a line of output for the user.
    fn print(&mut self, text: &str);

    /// Shows `prompt` and returns the line the user typed, without the newline.
    async fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Asks a yes/no question. Only `y` counts as yes.
    async fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.read_line(prompt).await?;
        Ok(answer.trim() == "y")
    }
}

/// Console backed by the process's stdin and stdout.
pub struct StdConsole {
    stdin: BufReader<Stdin>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    async fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        let n = self.stdin.read_line(&mut line).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Console with pre-recorded answers that captures everything printed.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines printed so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    async fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn confirm_accepts_only_y() {
        let mut console = ScriptedConsole::new(["y", "yes", "n", " y "]);
        assert!(console.confirm("?").await.unwrap());
        assert!(!console.confirm("?").await.unwrap());
        assert!(!console.confirm("?").await.unwrap());
        assert!(console.confirm("?").await.unwrap());
        assert_eq!(console.prompts().len(), 4);
    }

    #[tokio::test]
    async fn running_out_of_answers_is_an_error() {
        let mut console = ScriptedConsole::default();
        let err = console.read_line("name: ").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
