//! Clap argument definitions for the `wf` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "wf")]
#[command(about = "Wildcard patterns compiled to UTF-8 byte automata")]
pub struct Cli {
    /// Read settings from this file instead of discovering .wf.toml files
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `wf classify`.
#[derive(Args, Debug, Clone)]
pub struct ClassifyCommand {
    /// Patterns to classify
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `wf compile`.
#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
    /// Pattern to compile
    pub pattern: String,

    /// Output the automaton in Graphviz DOT format
    #[arg(long, conflicts_with = "json")]
    pub dot: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Give up beyond this many determinized states [default: 65536]
    #[arg(long)]
    pub max_states: Option<usize>,
}

/// Arguments for `wf match`.
#[derive(Args, Debug, Clone)]
pub struct MatchCommand {
    /// Pattern to match with
    pub pattern: String,

    /// Strings to test
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Print nothing; report through the exit status only
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for `wf search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Pattern to search with
    pub pattern: String,

    /// File with one term per line
    pub terms: PathBuf,

    /// Maximum terms to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Supported `wf` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show how patterns would be evaluated
    Classify(ClassifyCommand),
    /// Compile a pattern and print its automaton
    Compile(CompileCommand),
    /// Test strings against a pattern; exits 0 only if every string matches
    Match(MatchCommand),
    /// Find the terms of a dictionary file that match a pattern
    Search(SearchCommand),
    /// Show effective configuration settings
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use wf_fst::DEFAULT_MAX_STATES;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn max_states_help_shows_default() {
        let cmd = Cli::command();
        let help = cmd
            .get_subcommands()
            .find(|c| c.get_name() == "compile")
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == "max_states"))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default();
        assert!(
            help.contains(&format!("[default: {DEFAULT_MAX_STATES}]")),
            "{help}"
        );
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["wf", "match", "a%", "abc", "-vv", "--config", "x.toml"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Match(ref m) if m.inputs == ["abc"]));
    }

    #[test]
    fn dot_and_json_conflict() {
        assert!(Cli::try_parse_from(["wf", "compile", "a_", "--dot", "--json"]).is_err());
    }
}
