//! Status command: show which assets are on disk.

use agri_assets_core::config::FetchConfig;
use agri_assets_core::{status, AssetManifest};
use anyhow::Result;
use std::io::Write;

/// One line per entry: `name  size  sha256  path`, or `name  missing  path`.
pub fn run_status(cfg: &FetchConfig, out: &mut impl Write) -> Result<()> {
    let manifest = AssetManifest::load_or_builtin(cfg.manifest.as_deref())?;
    let statuses = status::scan(&cfg.target_dir, &manifest)?;

    let width = statuses.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for s in &statuses {
        match &s.local {
            Some(local) => writeln!(
                out,
                "{:<width$}  {:>8}  {}  {}",
                s.name,
                local.size,
                local.sha256,
                s.path.display(),
                width = width
            )?,
            None => writeln!(
                out,
                "{:<width$}  missing  {}",
                s.name,
                s.path.display(),
                width = width
            )?,
        }
    }
    let present = statuses.iter().filter(|s| s.local.is_some()).count();
    tracing::debug!("{} of {} assets present", present, statuses.len());
    Ok(())
}
