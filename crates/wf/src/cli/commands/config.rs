//! Implementation of `wf config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows the files the configuration came from and the effective settings.
///
/// Warnings go to stderr and do not change the exit status.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    for warning in config.validate() {
        eprintln!("warning: {warning}");
    }

    let rendered = match config.to_toml() {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.sources.is_empty() {
        println!("# no .wf.toml found; showing defaults");
    } else {
        for path in &config.sources {
            println!("# from {}", ctx.display_path(path));
        }
    }
    print!("{rendered}");
    ExitCode::SUCCESS
}
