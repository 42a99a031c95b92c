//! Transfer module for ftclient
//!
//! Handles the control connection, the data listener and consumption of
//! the data stream for each command.

pub mod control;
pub mod data_channel;
pub mod file_ops;
pub mod listing;
pub mod results;

pub use control::ControlChannel;
pub use data_channel::DataListener;
pub use file_ops::receive_file;
pub use listing::receive_listing;
pub use results::TransferOutcome;

use std::path::Path;
use tokio::net::TcpStream;

use crate::console::Console;
use crate::error::ClientError;
use crate::protocol::Command;

/// Consumes an accepted data connection according to `command`.
pub async fn handle_transfer<C: Console>(
    command: &Command,
    data_stream: &mut TcpStream,
    download_dir: &Path,
    chunk_size: usize,
    console: &mut C,
) -> Result<TransferOutcome, ClientError> {
    match command {
        Command::List => receive_listing(data_stream, chunk_size, console).await,
        Command::Fetch { filename } => {
            receive_file(data_stream, filename, download_dir, chunk_size, console).await
        }
    }
}
