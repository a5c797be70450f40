//! Per-entry fetch error.

use std::io;
use std::path::PathBuf;

/// Why one asset could not be fetched and saved. Reported per entry, never
/// fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connection, timeout, TLS, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The server answered with a non-2xx status.
    #[error("HTTP {code} for url: {url}")]
    Http { code: u32, url: String },
    /// The fetched bytes could not be written to the target file.
    #[error("failed to write {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// True when the transfer was cut off by the request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_operation_timedout())
    }
}
