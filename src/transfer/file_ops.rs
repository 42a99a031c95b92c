//! Module `file_ops`
//!
//! Receives a fetched file on the data connection and writes it to the
//! download directory, asking before an existing file is replaced.

use log::{debug, error, info};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::console::Console;
use crate::error::ClientError;
use crate::transfer::results::TransferOutcome;

/// Question asked when the target file already exists.
pub const OVERWRITE_PROMPT: &str = "File already exists overwrite(y/n): ";

/// Returns whether `dir` contains an entry named `name`.
pub async fn dir_contains(dir: &Path, name: &OsStr) -> io::Result<bool> {
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name() == name {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Resolves the local path for `filename` inside `download_dir`.
///
/// Only the final path component of `filename` is used locally.
pub fn local_target(download_dir: &Path, filename: &str) -> Result<PathBuf, ClientError> {
    match Path::new(filename).file_name() {
        Some(name) => Ok(download_dir.join(name)),
        None => Err(ClientError::TransferIo {
            path: filename.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a file name"),
        }),
    }
}

/// Handles the data connection of a fetch.
///
/// When a same-named file exists the user is asked first; declining returns
/// `OverwriteDeclined` without reading from `data_stream`.
pub async fn receive_file<C: Console>(
    data_stream: &mut TcpStream,
    filename: &str,
    download_dir: &Path,
    chunk_size: usize,
    console: &mut C,
) -> Result<TransferOutcome, ClientError> {
    let path = local_target(download_dir, filename)?;
    let display_path = path.display().to_string();

    let exists = match path.file_name() {
        Some(name) => dir_contains(download_dir, name).await,
        None => Ok(false),
    }
    .map_err(|source| ClientError::TransferIo {
        path: download_dir.display().to_string(),
        source,
    })?;

    if exists {
        let overwrite = console
            .confirm(OVERWRITE_PROMPT)
            .await
            .map_err(ClientError::Prompt)?;
        if !overwrite {
            info!("Keeping existing file {}", display_path);
            console.print("Not overwriting file");
            return Ok(TransferOutcome::OverwriteDeclined { path });
        }
        console.print("Overwriting file");
    }

    let mut file = File::create(&path).await.map_err(|source| {
        error!("Failed to create {}: {}", display_path, source);
        ClientError::TransferIo {
            path: display_path.clone(),
            source,
        }
    })?;

    if let (Ok(peer), Ok(local)) = (data_stream.peer_addr(), data_stream.local_addr()) {
        console.print(&format!(
            "Receiving \"{}\" from {}:{}",
            filename,
            peer.ip(),
            local.port()
        ));
    }

    let mut buffer = vec![0u8; chunk_size];
    let mut total_bytes_received = 0u64;

    loop {
        let n = data_stream
            .read(&mut buffer)
            .await
            .map_err(ClientError::DataChannel)?;
        if n == 0 {
            break; // Server closed the connection
        }

        file.write_all(&buffer[..n])
            .await
            .map_err(|source| ClientError::TransferIo {
                path: display_path.clone(),
                source,
            })?;
        total_bytes_received += n as u64;
        debug!("Wrote {} bytes ({} total) to {}", n, total_bytes_received, display_path);
    }

    file.flush().await.map_err(|source| ClientError::TransferIo {
        path: display_path.clone(),
        source,
    })?;
    drop(file);

    info!(
        "File transfer completed: {} ({} bytes)",
        display_path, total_bytes_received
    );
    console.print("Transfer Complete");

    Ok(TransferOutcome::Fetched {
        path,
        bytes: total_bytes_received,
    })
}
