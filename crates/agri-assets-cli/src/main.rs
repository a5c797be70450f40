use agri_assets_core::logging;
use clap::Parser;

mod cli;

use crate::cli::Cli;

fn main() {
    // Log to the state file; fall back to stderr so stdout stays status lines only.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    if let Err(err) = Cli::parse().run() {
        tracing::error!("{:#}", err);
        eprintln!("agri-assets error: {:#}", err);
        std::process::exit(1);
    }
}
