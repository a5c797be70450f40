//! Asset manifest: the ordered (name, URL) table to fetch.
//!
//! The built-in table is compiled in. A TOML manifest file can replace it;
//! either way entries are validated before any download starts.

mod name;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub use name::check_file_name;

/// Built-in icons for the crop and disease screens, in download order.
/// Several names share a placeholder URL.
#[rustfmt::skip]
const BUILTIN: &[(&str, &str)] = &[
    // crop icons
    ("tomato_icon.png", "https://cdn-icons-png.flaticon.com/512/415/415733.png"),
    ("potato_icon.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    ("wheat_icon.png", "https://cdn-icons-png.flaticon.com/512/2919/2919439.png"),
    ("corn_icon.png", "https://cdn-icons-png.flaticon.com/512/2919/2919460.png"),
    ("pepper_icon.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    ("cucumber_icon.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    // tomato
    ("tomato_wilt.png", "https://cdn-icons-png.flaticon.com/512/2909/2909763.png"),
    ("tomato_powder.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    ("aphids.png", "https://cdn-icons-png.flaticon.com/512/2913/2913465.png"),
    ("whitefly.png", "https://cdn-icons-png.flaticon.com/512/2913/2913469.png"),
    ("tomato_blight.png", "https://cdn-icons-png.flaticon.com/512/2909/2909765.png"),
    ("blossom_rot.png", "https://cdn-icons-png.flaticon.com/512/415/415733.png"),
    ("gray_mold.png", "https://cdn-icons-png.flaticon.com/512/3050/3050525.png"),
    // potato
    ("potato_blight.png", "https://cdn-icons-png.flaticon.com/512/2909/2909765.png"),
    ("beetle.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    // wheat
    ("yellow_rust.png", "https://cdn-icons-png.flaticon.com/512/3050/3050525.png"),
    ("wheat_powder.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    ("smut.png", "https://cdn-icons-png.flaticon.com/512/2919/2919410.png"),
    // corn
    ("armyworm.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    ("fusarium.png", "https://cdn-icons-png.flaticon.com/512/3050/3050525.png"),
    // pepper
    ("pepper_wilt.png", "https://cdn-icons-png.flaticon.com/512/2909/2909763.png"),
    ("red_spider.png", "https://cdn-icons-png.flaticon.com/512/2913/2913465.png"),
    // cucumber
    ("downy_mildew.png", "https://cdn-icons-png.flaticon.com/512/616/616408.png"),
    ("bacterial_wilt.png", "https://cdn-icons-png.flaticon.com/512/2909/2909763.png"),
];

/// One asset to fetch: the output file name and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Logical name, used verbatim as the file name under the target directory.
    pub name: String,
    /// HTTP(S) source URL.
    pub url: String,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("duplicate asset name: {0}")]
    DuplicateName(String),
    #[error("invalid asset name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("invalid URL for {name}: {reason}")]
    InvalidUrl { name: String, reason: String },
}

/// Ordered, validated list of asset entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetManifest {
    entries: Vec<AssetEntry>,
}

/// On-disk layout: `[[asset]]` tables with `name` and `url`.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "asset")]
    assets: Vec<AssetEntry>,
}

impl AssetManifest {
    /// Validates `entries` and keeps their order.
    pub fn new(entries: Vec<AssetEntry>) -> Result<Self, ManifestError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if let Err(reason) = check_file_name(&entry.name) {
                return Err(ManifestError::InvalidName {
                    name: entry.name.clone(),
                    reason,
                });
            }
            check_url(entry)?;
            if !seen.insert(entry.name.as_str()) {
                return Err(ManifestError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The compiled-in icon table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(name, url)| AssetEntry::new(*name, *url))
                .collect(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ManifestFile = toml::from_str(s).context("failed to parse manifest")?;
        Ok(Self::new(file.assets)?)
    }

    /// Load a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::from_toml_str(&data).with_context(|| format!("manifest {}", path.display()))
    }

    /// `load(path)` when a path is given, otherwise the built-in table.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_url(entry: &AssetEntry) -> Result<(), ManifestError> {
    let invalid = |reason: String| ManifestError::InvalidUrl {
        name: entry.name.clone(),
        reason,
    };
    let parsed = url::Url::parse(&entry.url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}
