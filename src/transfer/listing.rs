//! Module `listing`
//!
//! Receives a directory listing on the data connection and prints it.

use log::{debug, warn};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::console::Console;
use crate::error::ClientError;
use crate::transfer::results::TransferOutcome;

/// Reads the listing until the server closes the connection and prints it.
pub async fn receive_listing<C: Console>(
    data_stream: &mut TcpStream,
    chunk_size: usize,
    console: &mut C,
) -> Result<TransferOutcome, ClientError> {
    if let (Ok(peer), Ok(local)) = (data_stream.peer_addr(), data_stream.local_addr()) {
        console.print(&format!(
            "\nReceiving directory structure from {}:{}",
            peer.ip(),
            local.port()
        ));
    }

    let mut buffer = vec![0u8; chunk_size];
    let mut received = Vec::new();

    loop {
        let n = data_stream
            .read(&mut buffer)
            .await
            .map_err(ClientError::DataChannel)?;
        if n == 0 {
            break;
        }
        debug!("Listing chunk of {} bytes", n);
        received.extend_from_slice(&buffer[..n]);
    }

    let listing = trim_listing(&received);
    if listing.is_empty() {
        warn!("Server closed the data connection without sending a listing");
    } else {
        console.print(&listing);
    }

    Ok(TransferOutcome::Listing(listing))
}

/// Decodes listing bytes and drops trailing newlines and NUL padding.
pub fn trim_listing(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\n', '\0'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_newline_removed() {
        assert_eq!(trim_listing(b"a.txt\nb.txt\n"), "a.txt\nb.txt");
        assert_eq!(trim_listing(b"a.txt\n\n"), "a.txt");
    }

    #[test]
    fn test_nul_padding_removed() {
        let mut padded = b"ftserver\nshort.txt\n".to_vec();
        padded.resize(1024, 0);
        assert_eq!(trim_listing(&padded), "ftserver\nshort.txt");
    }

    #[test]
    fn test_inner_newlines_kept() {
        assert_eq!(trim_listing(b"\na\n\nb"), "\na\n\nb");
    }
}
