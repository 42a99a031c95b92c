//! Utility functions
//!
//! Provides logging setup and command-line input validation.

pub mod logging;
pub mod validation;
