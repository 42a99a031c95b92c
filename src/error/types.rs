//! Error types
//!
//! Defines the error type shared by every stage of a client session.

use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Errors that end a session
#[derive(Debug)]
pub enum ClientError {
    InvalidServer(String),
    InvalidPort(u32),
    Connect { target: String, source: io::Error },
    ControlProtocol(String),
    ListenerSetup(SocketAddr, io::Error),
    DataChannel(io::Error),
    TransferIo { path: String, source: io::Error },
    Prompt(io::Error),
    Config(String),
    Io(io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidServer(s) => write!(f, "Invalid Server: {}", s),
            ClientError::InvalidPort(p) => {
                write!(f, "Invalid Port Number: {}, valid Port Range: 1024-49151", p)
            }
            ClientError::Connect { target, source } => {
                write!(f, "Failed to connect to {}: {}", target, source)
            }
            // The server's text is shown as-is.
            ClientError::ControlProtocol(msg) => write!(f, "{}", msg),
            ClientError::ListenerSetup(addr, e) => {
                write!(f, "Failed to listen for data on {}: {}", addr, e)
            }
            ClientError::DataChannel(e) => write!(f, "Data connection failed: {}", e),
            ClientError::TransferIo { path, source } => {
                write!(f, "Failed to write {}: {}", path, source)
            }
            ClientError::Prompt(e) => write!(f, "Failed to read input: {}", e),
            ClientError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ClientError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Connect { source, .. } | ClientError::TransferIo { source, .. } => {
                Some(source)
            }
            ClientError::ListenerSetup(_, e)
            | ClientError::DataChannel(e)
            | ClientError::Prompt(e)
            | ClientError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        ClientError::Io(error)
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(error: config::ConfigError) -> Self {
        ClientError::Config(error.to_string())
    }
}
