//! Module `control`
//!
//! The control connection: connect, send the handshake, read the reply.

use log::{debug, info};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::HandshakeMode;
use crate::error::ClientError;
use crate::protocol::{Command, ControlReply, encode_framed, encode_legacy};

/// Outbound connection to the server's control port.
pub struct ControlChannel {
    stream: TcpStream,
    peer_addr: SocketAddr,
}

impl ControlChannel {
    /// Connects to `host:port`, resolving `host` if it is a name.
    pub async fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let target = format!("{}:{}", host, port);
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| ClientError::Connect {
                target: target.clone(),
                source,
            })?;
        let peer_addr = stream.peer_addr()?;

        info!("Control connection established to {} ({})", target, peer_addr);
        Ok(Self { stream, peer_addr })
    }

    /// Sends the data port and the command.
    ///
    /// In `Legacy` mode the two values go out as separate writes with `delay`
    /// between them, for servers that read them with two `recv` calls.
    pub async fn send_handshake(
        &mut self,
        data_port: u16,
        command: &Command,
        mode: HandshakeMode,
        delay: Duration,
    ) -> Result<(), ClientError> {
        match mode {
            HandshakeMode::Framed => {
                let record = encode_framed(data_port, command);
                self.stream.write_all(&record).await?;
                self.stream.flush().await?;
            }
            HandshakeMode::Legacy => {
                let (port, command_token) = encode_legacy(data_port, command);
                self.stream.write_all(&port).await?;
                self.stream.flush().await?;
                tokio::time::sleep(delay).await;
                self.stream.write_all(&command_token).await?;
                self.stream.flush().await?;
            }
        }

        debug!(
            "Handshake sent to {} ({:?}): port {}, command {}",
            self.peer_addr, mode, data_port, command
        );
        Ok(())
    }

    /// Performs one bounded read and interprets it as a reply.
    ///
    /// Returns the reply and the number of bytes read; zero means the server
    /// closed the control connection.
    pub async fn receive_reply(&mut self, buf: &mut [u8]) -> Result<(ControlReply, usize), ClientError> {
        let n = self.stream.read(buf).await?;
        Ok((ControlReply::from_bytes(&buf[..n]), n))
    }
}
