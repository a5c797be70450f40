//! The fetch run: create the target directory, then fetch and save every
//! manifest entry, printing one status line per entry in manifest order.
//!
//! Entry failures (transport, HTTP status, file write) are reported and
//! never stop the run. Only target directory creation and status output
//! errors are fatal.

mod pool;

use crate::fetch::{Fetch, FetchError};
use crate::manifest::{AssetEntry, AssetManifest};
use crate::report::{DownloadOutcome, RunSummary};
use crate::storage;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default target directory, relative to the working directory.
pub const DEFAULT_TARGET_DIR: &str = "assets/images";

/// Runs a manifest against a target directory with a given `Fetch` backend.
#[derive(Debug, Clone)]
pub struct AssetFetcher<F> {
    fetcher: F,
    target_dir: PathBuf,
    jobs: usize,
}

impl<F: Fetch> AssetFetcher<F> {
    /// Sequential fetcher (one request in flight).
    pub fn new(fetcher: F, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            target_dir: target_dir.into(),
            jobs: 1,
        }
    }

    /// Allow up to `jobs` concurrent requests. 0 is treated as 1.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Fetch every entry and write one status line per entry to `out`.
    ///
    /// A failed write to `out` ends the run with an error. Assets saved before
    /// that point stay on disk and later entries are not attempted, so the
    /// target directory may be left partially populated.
    pub fn run<W: Write>(&self, manifest: &AssetManifest, out: &mut W) -> Result<RunSummary> {
        storage::ensure_dir(&self.target_dir)?;
        tracing::info!(
            target_dir = %self.target_dir.display(),
            entries = manifest.len(),
            jobs = self.jobs,
            "fetch run started"
        );

        let mut summary = RunSummary::default();
        let mut emit = |outcome: DownloadOutcome| -> Result<()> {
            summary.record(&outcome);
            writeln!(out, "{}", outcome.status_line()).context("failed to write status line")
        };

        if self.jobs <= 1 {
            for entry in manifest.entries() {
                emit(fetch_one(&self.fetcher, &self.target_dir, entry))?;
            }
        } else {
            pool::run_pool(
                &self.fetcher,
                &self.target_dir,
                manifest.entries(),
                self.jobs,
                emit,
            )?;
        }
        out.flush().context("failed to flush status output")?;

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "fetch run finished"
        );
        Ok(summary)
    }
}

/// Fetch one entry and save it. Entry failures are returned in the outcome.
fn fetch_one<F: Fetch + ?Sized>(
    fetcher: &F,
    target_dir: &Path,
    entry: &AssetEntry,
) -> DownloadOutcome {
    tracing::debug!(name = %entry.name, url = %entry.url, "fetching asset");
    let result = fetcher.fetch(&entry.url).and_then(|bytes| {
        let path = storage::write_asset(target_dir, &entry.name, &bytes)
            .map_err(|source| FetchError::Storage {
                path: storage::asset_path(target_dir, &entry.name),
                source,
            })?;
        tracing::info!(
            name = %entry.name,
            bytes = bytes.len(),
            path = %path.display(),
            "asset saved"
        );
        Ok(bytes.len() as u64)
    });
    if let Err(e) = &result {
        tracing::warn!(
            name = %entry.name,
            url = %entry.url,
            timeout = e.is_timeout(),
            "asset failed: {}",
            e
        );
    }
    DownloadOutcome {
        name: entry.name.clone(),
        result,
    }
}

#[cfg(test)]
mod tests;
