//! CLI parse tests.

use super::{Cli, CliCommand, FetchArgs};
use clap::Parser;

pub(super) fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

pub(super) fn parse(args: &[&str]) -> Option<CliCommand> {
    try_parse(args).unwrap().command
}
