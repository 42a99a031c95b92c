//! Control replies
//!
//! The server answers a handshake with nothing on success or with an
//! error message.

/// A reply read from the control connection.
#[derive(Debug, PartialEq, Eq)]
pub enum ControlReply {
    /// No error text; the data phase proceeds.
    Accepted,
    /// Error text from the server.
    Error(String),
}

impl ControlReply {
    /// Interprets the bytes of one bounded read.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // Servers writing from fixed-size buffers pad with NULs.
        let text = String::from_utf8_lossy(bytes);
        let text = text.trim_end_matches('\0');
        if text.is_empty() {
            ControlReply::Accepted
        } else {
            ControlReply::Error(text.to_string())
        }
    }
}
