//! Error handling
//!
//! Defines the client error type and how errors are reported on exit.

pub mod handlers;
pub mod types;

pub use handlers::{exit_code, handle_error};
pub use types::ClientError;
