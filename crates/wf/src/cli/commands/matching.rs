//! Implementation of `wf match`.

use std::process::ExitCode;

use log::{debug, warn};
use wf_matcher::{Composition, accept_with, make_matcher};
use wf_wildcard::WildcardPlan;

use crate::cli::{args::MatchCommand, context::CommandContext};

/// Tests every input against the pattern, using the configured matcher stack for compiled
/// patterns. Succeeds only if every input matches.
pub fn run(ctx: &CommandContext, cmd: &MatchCommand) -> ExitCode {
    let plan = WildcardPlan::prepare(cmd.pattern.as_bytes(), &ctx.compile_options(None));
    if plan == WildcardPlan::Invalid {
        warn!("{:?} matches nothing", cmd.pattern);
    }

    let results: Vec<bool> = match &plan {
        WildcardPlan::Automaton(fst) => {
            let settings = &ctx.config.matcher;
            let composition = Composition::from_settings(settings);
            debug!("matching with the {} stack", composition.name());
            let mut matcher = make_matcher(fst, settings.binary_search_threshold, &composition);
            let results = cmd
                .inputs
                .iter()
                .map(|input| accept_with(matcher.as_mut(), input.as_bytes()))
                .collect();
            if let Some(err) = matcher.error() {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
            results
        }
        _ => {
            debug!("matching with the {} plan", plan.name());
            cmd.inputs
                .iter()
                .map(|input| plan.matches(input.as_bytes()))
                .collect()
        }
    };

    if !cmd.quiet {
        for (input, matched) in cmd.inputs.iter().zip(&results) {
            let status = if *matched { "match" } else { "no match" };
            println!("{input}\t{status}");
        }
    }

    if results.iter().all(|&m| m) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
