//! Command implementations and dispatch.

pub mod classify;
pub mod compile;
pub mod config;
pub mod matching;
pub mod search;

use std::{path::Path, process::ExitCode};

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand. `config_file` overrides configuration discovery.
pub fn run(command: Commands, config_file: Option<&Path>) -> ExitCode {
    let loaded = match command {
        Commands::Classify(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(config_file),
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match command {
        Commands::Classify(cmd) => classify::run(&cmd),
        Commands::Compile(cmd) => compile::run(&ctx, &cmd),
        Commands::Match(cmd) => matching::run(&ctx, &cmd),
        Commands::Search(cmd) => search::run(&ctx, &cmd),
        Commands::Config => config::run(&ctx),
    }
}
