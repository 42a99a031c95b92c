//! Transfer result types
//!
//! Defines what a completed data transfer produced.

use std::path::PathBuf;

/// Outcome of consuming a data connection
#[derive(Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Listing text as printed, trailing newlines removed.
    Listing(String),
    /// The file was written in full.
    Fetched { path: PathBuf, bytes: u64 },
    /// A file of the same name exists and the user chose to keep it.
    OverwriteDeclined { path: PathBuf },
}
