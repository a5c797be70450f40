//! Target directory setup and asset file writes.
//!
//! Bytes go to `<name>.part` first and are renamed over `<name>` once fully
//! written and synced, so a failed write never leaves a truncated asset.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix of the temp file an asset is written to before the final rename.
pub const PART_SUFFIX: &str = ".part";

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create target directory: {}", dir.display()))
}

/// Final path of asset `name` under `dir`.
pub fn asset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

fn part_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}{}", name, PART_SUFFIX))
}

/// Write `bytes` to `dir/name`, replacing any existing file. Returns the final path.
/// On error the temp file is removed and any previous `dir/name` is left untouched.
pub fn write_asset(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let final_path = asset_path(dir, name);
    let temp_path = part_path(dir, name);
    let res = write_and_rename(&temp_path, &final_path, bytes);
    if res.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    res.map(|()| final_path)
}

fn write_and_rename(temp_path: &Path, final_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp_path, final_path)
}
