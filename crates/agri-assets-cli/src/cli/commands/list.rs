//! List command: print the manifest.

use agri_assets_core::AssetManifest;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// One `name<TAB>url` line per entry, or a pretty JSON array of
/// `{"name", "url"}` objects with `json`.
pub fn run_list(manifest: Option<&Path>, json: bool, out: &mut impl Write) -> Result<()> {
    let manifest = AssetManifest::load_or_builtin(manifest)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, manifest.entries())
            .context("failed to write manifest JSON")?;
        writeln!(out)?;
    } else {
        for entry in manifest.entries() {
            writeln!(out, "{}\t{}", entry.name, entry.url)?;
        }
    }
    Ok(())
}
