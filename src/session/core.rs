use log::{debug, info, warn};

use crate::config::ClientConfig;
use crate::console::Console;
use crate::error::ClientError;
use crate::protocol::ControlReply;
use crate::session::request::SessionRequest;
use crate::session::state::SessionState;
use crate::session::watch::{Readiness, Role, WatchSet};
use crate::transfer::{ControlChannel, DataListener, TransferOutcome, handle_transfer};

/// One request/transfer exchange with the server.
///
/// The control connection, the data listener and the accepted data
/// connection live only for the duration of `run` and are closed on every
/// way out of it.
pub struct Session {
    request: SessionRequest,
    config: ClientConfig,
    state: SessionState,
}

impl Session {
    pub fn new(request: SessionRequest, config: ClientConfig) -> Self {
        Self {
            request,
            config,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the session to a terminal state.
    ///
    /// A server error reply is returned as `ClientError::ControlProtocol`
    /// carrying the server's text. Declining to overwrite an existing file is
    /// a successful outcome.
    pub async fn run<C: Console>(&mut self, console: &mut C) -> Result<TransferOutcome, ClientError> {
        let result = self.drive(console).await;
        match &result {
            Ok(outcome) => {
                self.transition(SessionState::Done);
                debug!("Session finished: {:?}", outcome);
            }
            Err(e) => {
                self.transition(SessionState::Failed);
                warn!("Session failed: {}", e);
            }
        }
        result
    }

    async fn drive<C: Console>(&mut self, console: &mut C) -> Result<TransferOutcome, ClientError> {
        self.transition(SessionState::Connecting);
        let control =
            ControlChannel::connect(&self.request.host, self.request.control_port).await?;

        // Listen before the handshake so the server can never connect first.
        let data_socket = self
            .config
            .data_socket(self.request.data_port)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        let listener = DataListener::bind(data_socket, self.config.listen_backlog)?;

        let mut watch = WatchSet::new(control, listener);
        self.send_handshake(&mut watch).await?;
        self.transition(SessionState::HandshakeSent);

        let mut scratch = vec![0u8; self.config.chunk_size];

        loop {
            match watch.wait(&mut scratch).await {
                Readiness::Control(reply) => match reply? {
                    (ControlReply::Error(message), _) => {
                        info!("Server replied with an error: {}", message);
                        return Err(ClientError::ControlProtocol(message));
                    }
                    (ControlReply::Accepted, 0) => {
                        debug!("Server closed the control connection");
                        watch.close(Role::Control);
                    }
                    (ControlReply::Accepted, n) => {
                        debug!("Ignoring {} bytes of padding on control connection", n);
                    }
                },
                Readiness::Listener(accepted) => {
                    let (stream, peer_addr) = accepted?;
                    watch.attach_data(stream);
                    // One data connection per session.
                    watch.close(Role::Listener);
                    self.transition(SessionState::AwaitingData);
                    debug!("Watching data connection from {}", peer_addr);
                }
                Readiness::Data(ready) => {
                    ready.map_err(ClientError::DataChannel)?;
                    self.transition(SessionState::Transferring);

                    let Some(stream) = watch.data_mut() else {
                        continue;
                    };
                    let outcome = handle_transfer(
                        &self.request.command,
                        stream,
                        &self.config.download_dir,
                        self.config.chunk_size,
                        console,
                    )
                    .await?;
                    watch.close(Role::Data);
                    return Ok(outcome);
                }
                Readiness::Idle => {
                    return Err(ClientError::Io(std::io::Error::other(
                        "no sockets left to wait on",
                    )));
                }
            }
        }
    }

    async fn send_handshake(&self, watch: &mut WatchSet) -> Result<(), ClientError> {
        let delay = self.config.handshake_delay();
        let Some(control) = watch.control_mut() else {
            return Err(ClientError::Io(std::io::Error::other(
                "control connection is not open",
            )));
        };
        control
            .send_handshake(
                self.request.data_port,
                &self.request.command,
                self.config.handshake,
                delay,
            )
            .await
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!("Session state {} -> {}", self.state, next);
            self.state = next;
        }
    }
}
