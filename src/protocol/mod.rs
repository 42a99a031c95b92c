//! Wire protocol
//!
//! Command tokens, the handshake record and control replies.

pub mod commands;
pub mod handshake;
pub mod replies;

pub use commands::{Command, CommandInput, parse_command};
pub use handshake::{encode_framed, encode_legacy};
pub use replies::ControlReply;
