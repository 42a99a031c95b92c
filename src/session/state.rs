//! Module `state`
//!
//! Lifecycle of a session.

use std::fmt;

/// Where a session is in its lifecycle.
///
/// `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Opening the control connection.
    #[default]
    Connecting,
    /// Data port and command sent; waiting for a reply or the data connection.
    HandshakeSent,
    /// Data connection accepted; waiting for it to become readable.
    AwaitingData,
    /// Consuming the data stream.
    Transferring,
    Done,
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Connecting => "connecting",
            SessionState::HandshakeSent => "handshake-sent",
            SessionState::AwaitingData => "awaiting-data",
            SessionState::Transferring => "transferring",
            SessionState::Done => "done",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}
