//! Validated session input

use crate::protocol::Command;

/// Everything a session needs to know about what to ask the server.
///
/// Built from validated command-line input; the session does not re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Host name or IP address of the server.
    pub host: String,
    pub control_port: u16,
    /// Port the client listens on for the server's data connection.
    pub data_port: u16,
    pub command: Command,
}
