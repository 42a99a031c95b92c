#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use ftclient::config::{ClientConfig, HandshakeMode};
use ftclient::protocol::Command;
use ftclient::session::SessionRequest;

/// What the mock server does once it has read the handshake.
#[derive(Clone)]
pub enum Behavior {
    /// Write this text on the control connection and never connect back.
    Reply(String),
    /// Connect back and write each chunk as a separate send, then close.
    Send(Vec<Vec<u8>>),
    /// Like `Send`, but close the control connection before connecting back.
    CloseControlThenSend(Vec<Vec<u8>>),
    /// Connect back, write this text on the control connection, then close
    /// the data connection without sending anything.
    ConnectDataThenReply(String),
}

/// What the mock server saw on its control connection.
#[derive(Debug)]
pub struct Received {
    pub data_port: u16,
    pub command: String,
}

/// Starts a one-shot server speaking the framed handshake.
pub async fn spawn_mock_server(behavior: Behavior) -> (u16, JoinHandle<Received>) {
    spawn_mock_server_with(HandshakeMode::Framed, behavior).await
}

pub async fn spawn_mock_server_with(
    mode: HandshakeMode,
    behavior: Behavior,
) -> (u16, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (control, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(control);

        let received = match mode {
            HandshakeMode::Framed => {
                let mut line = String::new();
                reader.read_line(&mut line).await.unwrap();
                let line = line.trim_end_matches('\n');
                let (port, command) = line.split_once(' ').unwrap();
                Received {
                    data_port: port.parse().unwrap(),
                    command: command.to_string(),
                }
            }
            HandshakeMode::Legacy => {
                let mut buf = [0u8; 1024];
                let n = reader.read(&mut buf).await.unwrap();
                let port = String::from_utf8_lossy(&buf[..n]).to_string();
                let n = reader.read(&mut buf).await.unwrap();
                let command = String::from_utf8_lossy(&buf[..n]).to_string();
                Received {
                    data_port: port.parse().unwrap(),
                    command,
                }
            }
        };

        let mut control = reader.into_inner();
        match behavior {
            Behavior::Reply(text) => {
                control.write_all(text.as_bytes()).await.unwrap();
                hold_until_closed(&mut control).await;
            }
            Behavior::ConnectDataThenReply(text) => {
                let data = TcpStream::connect(("127.0.0.1", received.data_port))
                    .await
                    .unwrap();
                // Let the client accept before both sockets become readable.
                tokio::time::sleep(Duration::from_millis(20)).await;
                control.write_all(text.as_bytes()).await.unwrap();
                control.flush().await.unwrap();
                drop(data);
                hold_until_closed(&mut control).await;
            }
            Behavior::Send(chunks) => {
                send_chunks(received.data_port, chunks).await;
                drop(control);
            }
            Behavior::CloseControlThenSend(chunks) => {
                drop(control);
                tokio::time::sleep(Duration::from_millis(20)).await;
                send_chunks(received.data_port, chunks).await;
            }
        }

        received
    });

    (port, handle)
}

/// Keeps the connection open until the client hangs up.
async fn hold_until_closed(control: &mut TcpStream) {
    let mut sink = [0u8; 64];
    while let Ok(n) = control.read(&mut sink).await {
        if n == 0 {
            break;
        }
    }
}

async fn send_chunks(data_port: u16, chunks: Vec<Vec<u8>>) {
    let mut data = TcpStream::connect(("127.0.0.1", data_port)).await.unwrap();
    for chunk in chunks {
        // The client may close early, e.g. after declining an overwrite.
        if data.write_all(&chunk).await.is_err() {
            return;
        }
        let _ = data.flush().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let _ = data.shutdown().await;
}

/// Returns a port that was free a moment ago.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Loopback config using the framed handshake, which needs no delay.
pub fn test_config(download_dir: &Path) -> ClientConfig {
    ClientConfig {
        data_bind_address: "127.0.0.1".to_string(),
        handshake: HandshakeMode::Framed,
        download_dir: download_dir.to_path_buf(),
        ..ClientConfig::default()
    }
}

pub fn request(control_port: u16, data_port: u16, command: Command) -> SessionRequest {
    SessionRequest {
        host: "127.0.0.1".to_string(),
        control_port,
        data_port,
        command,
    }
}

pub fn fetch(filename: &str) -> Command {
    Command::Fetch {
        filename: filename.to_string(),
    }
}

/// Bytes 0x01 through 0xFF.
pub fn byte_ramp() -> Vec<u8> {
    (1..=255u8).collect()
}
