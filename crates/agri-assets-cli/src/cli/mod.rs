//! CLI for the agri-assets image downloader.

mod commands;

use agri_assets_core::config::{self, FetchConfig};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use commands::{run_checksum, run_fetch, run_list, run_status};

/// Top-level CLI. With no subcommand, fetches the built-in assets into `assets/images`.
#[derive(Debug, Parser)]
#[command(name = "agri-assets")]
#[command(about = "Download crop and disease icons into a local assets directory")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every asset in the manifest (the default action).
    Fetch(FetchArgs),

    /// Print the manifest entries.
    List {
        /// TOML manifest to use instead of the built-in table.
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
        /// Print a JSON array instead of tab-separated lines.
        #[arg(long)]
        json: bool,
    },

    /// Show which assets are present in the target directory, with size,
    /// SHA-256 and path.
    Status {
        /// Target directory (default from config, else `assets/images`).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// TOML manifest to use instead of the built-in table.
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

/// Overrides for a fetch run. Unset flags fall back to the config file, then defaults.
#[derive(Debug, Default, Args)]
pub struct FetchArgs {
    /// Target directory for downloaded assets.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
    /// TOML manifest to use instead of the built-in table.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
    /// Per-asset timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Download up to N assets concurrently (default 1). Output order is unchanged.
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl FetchArgs {
    /// Apply the flags that were given on top of `cfg`.
    pub fn apply(&self, mut cfg: FetchConfig) -> FetchConfig {
        if let Some(out) = &self.out {
            cfg.target_dir = out.clone();
        }
        if let Some(manifest) = &self.manifest {
            cfg.manifest = Some(manifest.clone());
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
        if let Some(jobs) = self.jobs {
            cfg.jobs = jobs;
        }
        cfg
    }
}

impl Cli {
    /// The subcommand to run. No subcommand means `fetch` with no flags.
    pub fn into_command(self) -> CliCommand {
        match self.command {
            Some(command) => command,
            None => CliCommand::Fetch(FetchArgs::default()),
        }
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.into_command() {
            CliCommand::Fetch(args) => run_fetch(&args.apply(cfg))?,
            CliCommand::List { manifest, json } => {
                let manifest = manifest.or(cfg.manifest);
                run_list(manifest.as_deref(), json, &mut io::stdout().lock())?
            }
            CliCommand::Status { out, manifest } => {
                let args = FetchArgs {
                    out,
                    manifest,
                    ..FetchArgs::default()
                };
                run_status(&args.apply(cfg), &mut io::stdout().lock())?
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
