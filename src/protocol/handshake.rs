//! Handshake encoding
//!
//! The handshake tells the server which port to connect back on and
//! which command to run.

use crate::protocol::Command;

/// Encodes the handshake as one newline-terminated record.
pub fn encode_framed(data_port: u16, command: &Command) -> Vec<u8> {
    format!("{} {}\n", data_port, command.wire_token()).into_bytes()
}

/// Encodes the handshake as two separate writes: port, then command.
pub fn encode_legacy(data_port: u16, command: &Command) -> (Vec<u8>, Vec<u8>) {
    (
        data_port.to_string().into_bytes(),
        command.wire_token().into_bytes(),
    )
}
