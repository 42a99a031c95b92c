//! Module `data_channel`
//!
//! Listens on the negotiated data port and accepts the single connection
//! the server opens back to the client.

use log::{error, info};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::error::ClientError;

/// Listener for the server-initiated data connection.
pub struct DataListener {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl DataListener {
    /// Binds `addr` and starts listening with the given backlog.
    pub fn bind(addr: SocketAddr, backlog: u32) -> Result<Self, ClientError> {
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(|e| ClientError::ListenerSetup(addr, e))?;

        socket
            .set_reuseaddr(true)
            .map_err(|e| ClientError::ListenerSetup(addr, e))?;
        socket.bind(addr).map_err(|e| {
            error!("Failed to bind data listener to {}: {}", addr, e);
            ClientError::ListenerSetup(addr, e)
        })?;

        let listener = socket
            .listen(backlog)
            .map_err(|e| ClientError::ListenerSetup(addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ClientError::ListenerSetup(addr, e))?;

        info!("Listening for data connection on {} (backlog {})", local_addr, backlog);
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Waits for the server's data connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ClientError> {
        let (stream, peer_addr) = self.listener.accept().await.map_err(ClientError::DataChannel)?;
        info!(
            "Data connection accepted from {} on {}",
            peer_addr, self.local_addr
        );
        Ok((stream, peer_addr))
    }
}
