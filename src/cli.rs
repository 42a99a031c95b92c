//! Command-line interface
//!
//! Parses arguments, validates them and fills in anything missing by
//! asking the user.

use clap::Parser;
use log::debug;
use std::path::PathBuf;

use crate::config::ClientConfig;
use crate::console::Console;
use crate::error::ClientError;
use crate::protocol::{Command, CommandInput, parse_command};
use crate::session::SessionRequest;
use crate::utils::validation::{validate_port, validate_server};

pub const COMMAND_PROMPT: &str = "Enter -l to list files or -g <FILENAME> to get a file: ";
pub const RETRY_COMMAND_PROMPT: &str =
    "Valid commands are (-l or -g FILENAME) -l to list files or -g FILENAME to get a file: ";
pub const FILENAME_PROMPT: &str = "You must enter a filename for -g: ";

/// File transfer client: list a server's directory or fetch a file
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "ftclient", version)]
pub struct CliArgs {
    /// Server alias
    pub server: String,

    /// Server control port (1024-49151)
    pub server_port: u32,

    /// Command: -l (list files) or -g (get file)
    #[arg(short = 'c', long = "command", allow_hyphen_values = true, value_parser = ["-l", "-g"])]
    pub command: Option<String>,

    /// Filename to get from the server
    #[arg(short = 'f', long)]
    pub filename: Option<String>,

    /// Local port for the server's data connection (1024-49151)
    pub data_port: u32,

    /// Configuration file (defaults to ./ftclient.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Validates `args` and builds the session request.
///
/// Server and ports are checked before anything is asked; a missing or
/// incomplete command is then completed interactively.
pub async fn resolve_request<C: Console>(
    args: &CliArgs,
    config: &ClientConfig,
    console: &mut C,
) -> Result<SessionRequest, ClientError> {
    let control_port = validate_port(args.server_port, config.port_min, config.port_max)?;
    validate_server(&args.server, &config.allowed_servers)?;
    let data_port = validate_port(args.data_port, config.port_min, config.port_max)?;

    let command =
        resolve_command(args.command.as_deref(), args.filename.as_deref(), console).await?;
    let host = config.server_host(&args.server);
    debug!("Resolved request: {} on {}:{}, data port {}", command, host, control_port, data_port);

    Ok(SessionRequest {
        host,
        control_port,
        data_port,
        command,
    })
}

/// Turns the command and filename options into a `Command`, prompting until
/// the input names a valid command.
pub async fn resolve_command<C: Console>(
    command: Option<&str>,
    filename: Option<&str>,
    console: &mut C,
) -> Result<Command, ClientError> {
    let mut input = match command {
        Some(command) => command.to_string(),
        None => console.read_line(COMMAND_PROMPT).await.map_err(ClientError::Prompt)?,
    };

    loop {
        match parse_command(&input, filename) {
            CommandInput::Ready(command) => return Ok(command),
            CommandInput::NeedsFilename => {
                let name = console
                    .read_line(FILENAME_PROMPT)
                    .await
                    .map_err(ClientError::Prompt)?;
                let name = name.trim();
                if !name.is_empty() {
                    return Ok(Command::Fetch {
                        filename: name.to_string(),
                    });
                }
            }
            CommandInput::Invalid => {
                input = console
                    .read_line(RETRY_COMMAND_PROMPT)
                    .await
                    .map_err(ClientError::Prompt)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    fn args(server: &str, server_port: u32, data_port: u32) -> CliArgs {
        CliArgs {
            server: server.to_string(),
            server_port,
            data_port,
            ..CliArgs::default()
        }
    }

    #[test]
    fn test_parses_positionals_and_options() {
        let parsed = CliArgs::try_parse_from([
            "ftclient", "flip1", "30021", "-c", "-g", "-f", "short.txt", "30020",
        ])
        .unwrap();
        assert_eq!(parsed.server, "flip1");
        assert_eq!(parsed.server_port, 30021);
        assert_eq!(parsed.data_port, 30020);
        assert_eq!(parsed.command.as_deref(), Some("-g"));
        assert_eq!(parsed.filename.as_deref(), Some("short.txt"));
    }

    #[test]
    fn test_rejects_unknown_command_value() {
        let parsed = CliArgs::try_parse_from(["ftclient", "flip1", "30021", "-c", "-x", "30020"]);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_request_from_complete_arguments() {
        let mut cli = args("flip2", 30021, 30020);
        cli.command = Some("-l".into());
        let mut console = ScriptedConsole::default();

        let request = resolve_request(&cli, &ClientConfig::default(), &mut console).await.unwrap();
        assert_eq!(request.host, "flip2.engr.oregonstate.edu");
        assert_eq!(request.control_port, 30021);
        assert_eq!(request.data_port, 30020);
        assert_eq!(request.command, Command::List);
        assert!(console.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_server_port_is_rejected_before_prompting() {
        let cli = args("flip1", 80, 30020);
        let mut console = ScriptedConsole::default();
        let err = resolve_request(&cli, &ClientConfig::default(), &mut console).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidPort(80)));
        assert!(console.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_server_is_rejected() {
        let cli = args("example.com", 30021, 30020);
        let mut console = ScriptedConsole::default();
        let err = resolve_request(&cli, &ClientConfig::default(), &mut console).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidServer(ref s) if s == "example.com"));
    }

    #[tokio::test]
    async fn test_invalid_data_port_is_rejected() {
        let cli = args("flip3", 30021, 49152);
        let mut console = ScriptedConsole::default();
        let err = resolve_request(&cli, &ClientConfig::default(), &mut console).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidPort(49152)));
    }

    #[tokio::test]
    async fn test_missing_command_is_prompted_until_valid() {
        let mut console = ScriptedConsole::new(["list please", "-g short.txt"]);
        let command = resolve_command(None, None, &mut console).await.unwrap();
        assert_eq!(
            command,
            Command::Fetch {
                filename: "short.txt".into()
            }
        );
        assert_eq!(console.prompts(), &[COMMAND_PROMPT, RETRY_COMMAND_PROMPT]);
    }

    #[tokio::test]
    async fn test_fetch_without_filename_prompts_for_one() {
        let mut console = ScriptedConsole::new(["", "long.txt"]);
        let command = resolve_command(Some("-g"), None, &mut console).await.unwrap();
        assert_eq!(
            command,
            Command::Fetch {
                filename: "long.txt".into()
            }
        );
        assert_eq!(console.prompts(), &[FILENAME_PROMPT, FILENAME_PROMPT]);
    }

    #[tokio::test]
    async fn test_fetch_with_filename_option_does_not_prompt() {
        let mut console = ScriptedConsole::default();
        let command = resolve_command(Some("-g"), Some("short.txt"), &mut console).await.unwrap();
        assert_eq!(
            command,
            Command::Fetch {
                filename: "short.txt".into()
            }
        );
        assert!(console.prompts().is_empty());
    }
}
