//! Fetch command: download every manifest entry into the target directory.

use agri_assets_core::config::FetchConfig;
use agri_assets_core::{AssetFetcher, AssetManifest, CurlFetcher};
use anyhow::Result;
use std::io;

/// Runs the fetcher with stdout as the status stream. Per-asset failures are
/// printed, not returned; the run only fails if the target directory or the
/// manifest is unusable.
pub fn run_fetch(cfg: &FetchConfig) -> Result<()> {
    let manifest = AssetManifest::load_or_builtin(cfg.manifest.as_deref())?;

    let mut curl = CurlFetcher::new(cfg.timeout());
    if let Some(ua) = &cfg.user_agent {
        curl = curl.with_user_agent(ua.clone());
    }

    AssetFetcher::new(curl, &cfg.target_dir)
        .with_jobs(cfg.jobs)
        .run(&manifest, &mut io::stdout().lock())?;
    Ok(())
}
