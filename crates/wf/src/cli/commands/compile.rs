//! Implementation of `wf compile`.

use std::process::ExitCode;

use log::info;
use wf_fst::dot::to_dot;
use wf_wildcard::{classify, try_compile};

use crate::cli::{
    args::CompileCommand,
    context::CommandContext,
    output::{JsonAutomaton, automaton_table, print_json},
};

/// Compiles a pattern and prints the automaton as a table, DOT or JSON.
pub fn run(ctx: &CommandContext, cmd: &CompileCommand) -> ExitCode {
    let options = ctx.compile_options(cmd.max_states);
    let fst = match try_compile(cmd.pattern.as_bytes(), &options) {
        Ok(fst) => fst,
        Err(e) => {
            eprintln!("error: cannot compile {:?}: {e}", cmd.pattern);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "compiled {:?}: {} states, {} arcs",
        cmd.pattern,
        fst.num_states(),
        fst.total_arcs()
    );

    if cmd.dot {
        print!("{}", to_dot(&fst));
        return ExitCode::SUCCESS;
    }
    let kind = classify(cmd.pattern.as_bytes());
    if cmd.json {
        return print_json(&JsonAutomaton::new(&cmd.pattern, kind, &fst));
    }

    println!("{table}", table = automaton_table(&fst));
    println!(
        "{kind}: {} states, {} arcs",
        fst.num_states(),
        fst.total_arcs()
    );
    ExitCode::SUCCESS
}
