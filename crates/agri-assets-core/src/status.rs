//! Local state of each manifest entry under the target directory.

use crate::checksum;
use crate::manifest::AssetManifest;
use crate::storage;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A fetched file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub size: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub name: String,
    pub path: PathBuf,
    /// `None` when nothing has been fetched for this entry yet.
    pub local: Option<LocalFile>,
}

/// Inspect `target_dir` for every entry, in manifest order. A missing
/// directory means nothing is present.
pub fn scan(target_dir: &Path, manifest: &AssetManifest) -> Result<Vec<AssetStatus>> {
    manifest
        .entries()
        .iter()
        .map(|entry| -> Result<AssetStatus> {
            let path = storage::asset_path(target_dir, &entry.name);
            let local = match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => Some(LocalFile {
                    size: meta.len(),
                    sha256: checksum::sha256_path(&path)?,
                }),
                Ok(_) => None,
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(e).with_context(|| format!("stat {}", path.display())),
            };
            Ok(AssetStatus {
                name: entry.name.clone(),
                path,
                local,
            })
        })
        .collect()
}
