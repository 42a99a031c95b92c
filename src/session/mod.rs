//! Session engine
//!
//! Drives one request from control connection to finished transfer.

pub mod core;
pub mod request;
pub mod state;
pub mod watch;

pub use core::Session;
pub use request::SessionRequest;
pub use state::SessionState;
pub use watch::{Readiness, Role, WatchSet};
