//! Configuration management for ftclient
//!
//! Values come from built-in defaults, an optional TOML file and
//! `FTCLIENT_*` environment variables, in increasing order of precedence.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "ftclient";

/// How the data port and command are put on the control connection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HandshakeMode {
    /// One newline-terminated record: `"<data_port> <command>\n"`.
    Framed,
    /// Port and command as two writes separated by `handshake_delay_ms`.
    Legacy,
}

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Size of each read on the control and data connections
    pub chunk_size: usize,

    /// Backlog passed to `listen` on the data port
    pub listen_backlog: u32,

    /// Local address the data listener binds to
    pub data_bind_address: String,

    pub handshake: HandshakeMode,

    /// Pause between the two legacy handshake writes
    pub handshake_delay_ms: u64,

    /// Server aliases accepted on the command line
    pub allowed_servers: Vec<String>,

    /// Appended to the alias to form the host name; empty to use the alias as-is
    pub server_domain: String,

    /// Directory fetched files are written to
    pub download_dir: PathBuf,

    /// Inclusive range accepted for the control and data ports
    pub port_min: u16,
    pub port_max: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            listen_backlog: 2,
            data_bind_address: "0.0.0.0".to_string(),
            handshake: HandshakeMode::Legacy,
            handshake_delay_ms: 1000,
            allowed_servers: vec!["flip1".into(), "flip2".into(), "flip3".into()],
            server_domain: "engr.oregonstate.edu".to_string(),
            download_dir: PathBuf::from("."),
            port_min: 1024,
            port_max: 49151,
        }
    }
}

impl ClientConfig {
    /// Load configuration, optionally from an explicit file path.
    ///
    /// An explicit path must exist; the default `ftclient.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("FTCLIENT").try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.chunk_size == 0 {
            return Err(config::ConfigError::Message(
                "chunk_size must be greater than 0".into(),
            ));
        }

        if self.listen_backlog == 0 {
            return Err(config::ConfigError::Message(
                "listen_backlog must be greater than 0".into(),
            ));
        }

        if self.allowed_servers.is_empty() {
            return Err(config::ConfigError::Message(
                "allowed_servers cannot be empty".into(),
            ));
        }

        if self.port_min > self.port_max {
            return Err(config::ConfigError::Message(
                "port_min must not exceed port_max".into(),
            ));
        }

        if self.data_bind_address.parse::<IpAddr>().is_err() {
            return Err(config::ConfigError::Message(format!(
                "data_bind_address is not an IP address: {}",
                self.data_bind_address
            )));
        }

        Ok(())
    }

    /// Socket address the data listener binds for `data_port`
    pub fn data_socket(&self, data_port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.data_bind_address.parse()?;
        Ok(SocketAddr::new(ip, data_port))
    }

    /// Host name to connect to for a validated server alias
    pub fn server_host(&self, alias: &str) -> String {
        if self.server_domain.is_empty() {
            alias.to_string()
        } else {
            format!("{}.{}", alias, self.server_domain)
        }
    }

    /// Get the legacy handshake delay as Duration
    pub fn handshake_delay(&self) -> Duration {
        Duration::from_millis(self.handshake_delay_ms)
    }
}
