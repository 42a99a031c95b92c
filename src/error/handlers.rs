//! Error handlers
//!
//! Maps session errors to log output and process exit codes.

use crate::error::types::ClientError;
use log::{debug, error};

/// Exit status for rejected command-line input.
pub const EXIT_USAGE: i32 = 2;

/// Exit status for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Log a session error
pub fn handle_error(err: &ClientError) {
    match err {
        ClientError::ControlProtocol(msg) => debug!("Server rejected the request: {}", msg),
        _ => error!("ftclient error: {}", err),
    }
}

/// Convert an error into the process exit code
pub fn exit_code(err: &ClientError) -> i32 {
    match err {
        ClientError::InvalidServer(_) => EXIT_USAGE,
        ClientError::InvalidPort(_) => EXIT_USAGE,
        ClientError::Connect { .. } => EXIT_FAILURE,
        ClientError::ControlProtocol(_) => EXIT_FAILURE,
        ClientError::ListenerSetup(..) => EXIT_FAILURE,
        ClientError::DataChannel(_) => EXIT_FAILURE,
        ClientError::TransferIo { .. } => EXIT_FAILURE,
        ClientError::Prompt(_) => EXIT_FAILURE,
        ClientError::Config(_) => EXIT_FAILURE,
        ClientError::Io(_) => EXIT_FAILURE,
    }
}
