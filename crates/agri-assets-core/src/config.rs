use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::DEFAULT_TARGET_DIR;

/// Global configuration loaded from `~/.config/agri-assets/config.toml`.
/// Every field is optional in the file; CLI flags override it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory the assets are written into.
    pub target_dir: PathBuf,
    /// Whole-transfer timeout per asset, in seconds.
    pub timeout_secs: u64,
    /// Maximum concurrent downloads (1 = sequential).
    pub jobs: usize,
    /// Optional TOML manifest replacing the built-in asset table.
    pub manifest: Option<PathBuf>,
    /// Optional User-Agent header sent with every request.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            timeout_secs: 10,
            jobs: 1,
            manifest: None,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Path of an existing config file, if any. Never creates directories.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("agri-assets")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from disk, or defaults if no config file exists.
/// Unlike a first-run init, a missing file is not written out.
pub fn load() -> Result<FetchConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => Ok(FetchConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
