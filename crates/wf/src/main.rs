//! Command-line interface for the `wf` wildcard tool.

use std::process::ExitCode;

use clap::Parser;
use wf::cli::{args::Cli, commands, logger};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);
    commands::run(cli.command, cli.config.as_deref())
}
