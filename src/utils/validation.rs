//! Input validation utilities
//!
//! Checks server aliases and port numbers given on the command line.

use crate::error::ClientError;

/// Validate a port number against the inclusive range `min..=max`
pub fn validate_port(port: u32, min: u16, max: u16) -> Result<u16, ClientError> {
    if port < u32::from(min) || port > u32::from(max) {
        return Err(ClientError::InvalidPort(port));
    }
    Ok(port as u16)
}

/// Validate that `server` is one of the allowed aliases
pub fn validate_server(server: &str, allowed: &[String]) -> Result<(), ClientError> {
    if allowed.iter().any(|alias| alias == server) {
        Ok(())
    } else {
        Err(ClientError::InvalidServer(server.to_string()))
    }
}
