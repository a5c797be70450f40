//! Per-entry outcomes and the status lines printed for them.

use crate::fetch::FetchError;
use std::fmt;

/// Result of fetching one manifest entry.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub name: String,
    /// Bytes written on success.
    pub result: Result<u64, FetchError>,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Console line for this entry.
    pub fn status_line(&self) -> StatusLine<'_> {
        StatusLine(self)
    }
}

/// `Display` adapter: `✅ downloaded: <name>` or
/// `❌ failed to download <name>: <error>`.
pub struct StatusLine<'a>(&'a DownloadOutcome);

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.result {
            Ok(_) => write!(f, "✅ downloaded: {}", self.0.name),
            Err(e) => write!(f, "❌ failed to download {}: {}", self.0.name, e),
        }
    }
}

/// Counts for a finished run. Logged, not printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}
