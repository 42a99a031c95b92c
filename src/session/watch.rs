//! Module `watch`
//!
//! The set of sockets a session waits on. Each handle sits in the slot for
//! its role, so readiness is reported already tagged with what became ready.

use log::{debug, warn};
use std::future::pending;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpStream;

use crate::error::ClientError;
use crate::protocol::ControlReply;
use crate::transfer::{ControlChannel, DataListener};

/// Role of a watched socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Control,
    Listener,
    Data,
}

/// One readiness event, tagged with the role of the socket it came from.
pub enum Readiness {
    /// A bounded read on the control connection completed.
    Control(Result<(ControlReply, usize), ClientError>),
    /// The listener accepted a connection.
    Listener(Result<(TcpStream, SocketAddr), ClientError>),
    /// The data connection has bytes or end-of-stream to read.
    Data(io::Result<()>),
    /// Nothing is being watched.
    Idle,
}

/// Sockets owned by a running session.
///
/// Dropping a slot closes its socket.
pub struct WatchSet {
    control: Option<ControlChannel>,
    listener: Option<DataListener>,
    data: Option<TcpStream>,
}

impl WatchSet {
    pub fn new(control: ControlChannel, listener: DataListener) -> Self {
        Self {
            control: Some(control),
            listener: Some(listener),
            data: None,
        }
    }

    /// Returns whether a socket with `role` is being watched.
    pub fn is_watching(&self, role: Role) -> bool {
        match role {
            Role::Control => self.control.is_some(),
            Role::Listener => self.listener.is_some(),
            Role::Data => self.data.is_some(),
        }
    }

    /// Roles currently watched, in the order they are checked.
    pub fn roles(&self) -> Vec<Role> {
        [Role::Control, Role::Listener, Role::Data]
            .into_iter()
            .filter(|role| self.is_watching(*role))
            .collect()
    }

    /// Stops watching `role` and closes its socket.
    pub fn close(&mut self, role: Role) {
        let closed = match role {
            Role::Control => self.control.take().is_some(),
            Role::Listener => self.listener.take().is_some(),
            Role::Data => self.data.take().is_some(),
        };
        if closed {
            debug!("Closed {:?} socket", role);
        }
    }

    /// Adds the accepted data connection.
    ///
    /// A session has one data connection; a second one is closed immediately.
    pub fn attach_data(&mut self, stream: TcpStream) {
        if self.data.is_some() {
            warn!("Ignoring extra data connection");
            return;
        }
        self.data = Some(stream);
    }

    pub fn control_mut(&mut self) -> Option<&mut ControlChannel> {
        self.control.as_mut()
    }

    pub fn data_mut(&mut self) -> Option<&mut TcpStream> {
        self.data.as_mut()
    }

    /// Waits until at least one watched socket is ready.
    ///
    /// Control readiness wins when several sockets are ready at once, so a
    /// server error is never hidden behind a data connection.
    pub async fn wait(&mut self, buf: &mut [u8]) -> Readiness {
        if self.roles().is_empty() {
            return Readiness::Idle;
        }

        let WatchSet {
            control,
            listener,
            data,
        } = self;

        tokio::select! {
            biased;
            reply = control_ready(control, buf) => Readiness::Control(reply),
            accepted = listener_ready(listener) => Readiness::Listener(accepted),
            ready = data_ready(data) => Readiness::Data(ready),
        }
    }
}

async fn control_ready(
    control: &mut Option<ControlChannel>,
    buf: &mut [u8],
) -> Result<(ControlReply, usize), ClientError> {
    match control {
        Some(channel) => channel.receive_reply(buf).await,
        None => pending().await,
    }
}

async fn listener_ready(
    listener: &Option<DataListener>,
) -> Result<(TcpStream, SocketAddr), ClientError> {
    match listener {
        Some(listener) => listener.accept().await,
        None => pending().await,
    }
}

async fn data_ready(data: &Option<TcpStream>) -> io::Result<()> {
    match data {
        Some(stream) => stream.readable().await,
        None => pending().await,
    }
}
