//! Implementation of `wf search`.

use std::{collections::BTreeSet, fs, process::ExitCode};

use log::info;
use tantivy_fst::{IntoStreamer, Map, Streamer};
use wf_matcher::ByteDfa;
use wf_wildcard::WildcardPlan;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{JsonSearch, print_json},
};

/// Builds a term dictionary from newline-separated terms. Blank lines are skipped and
/// duplicates collapse; values are positions in sorted order.
pub fn build_dictionary(contents: &[u8]) -> Result<Map<Vec<u8>>, tantivy_fst::Error> {
    let terms: BTreeSet<&[u8]> = contents
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect();
    Map::from_iter(terms.into_iter().zip(0u64..))
}

/// Drains `stream` into owned strings, stopping after `limit` terms.
fn drain<S>(mut stream: S, limit: usize, keep: impl Fn(&[u8]) -> bool) -> Vec<String>
where
    S: for<'a> Streamer<'a, Item = (&'a [u8], u64)>,
{
    let mut out = Vec::new();
    while out.len() < limit
        && let Some((key, _)) = stream.next()
    {
        if !keep(key) {
            break;
        }
        out.push(String::from_utf8_lossy(key).into_owned());
    }
    out
}

/// Terms of `dict` matched by `plan`, in dictionary order.
pub fn search_dictionary(
    dict: &Map<Vec<u8>>,
    plan: &WildcardPlan,
    limit: usize,
) -> Result<Vec<String>, String> {
    let terms = match plan {
        WildcardPlan::Invalid => Vec::new(),
        WildcardPlan::Term(term) => {
            if dict.contains_key(term) && limit > 0 {
                vec![String::from_utf8_lossy(term).into_owned()]
            } else {
                Vec::new()
            }
        }
        WildcardPlan::Prefix(prefix) => drain(
            dict.range().ge(prefix).into_stream(),
            limit,
            |key| key.starts_with(prefix),
        ),
        WildcardPlan::MatchAll => drain(dict.stream(), limit, |_| true),
        WildcardPlan::Automaton(fst) => {
            let dfa = ByteDfa::new(fst).map_err(|e| e.to_string())?;
            drain(dict.search(dfa).into_stream(), limit, |_| true)
        }
    };
    Ok(terms)
}

/// Searches a term file with the pattern and prints the matching terms.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let contents = match fs::read(&cmd.terms) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", cmd.terms.display());
            return ExitCode::FAILURE;
        }
    };
    let dict = match build_dictionary(&contents) {
        Ok(dict) => dict,
        Err(e) => {
            eprintln!("error: failed to build term dictionary: {e}");
            return ExitCode::FAILURE;
        }
    };

    let plan = WildcardPlan::prepare(cmd.pattern.as_bytes(), &ctx.compile_options(None));
    info!(
        "searching {} terms with the {} plan",
        dict.len(),
        plan.name()
    );
    let terms = match search_dictionary(&dict, &plan, cmd.limit.unwrap_or(usize::MAX)) {
        Ok(terms) => terms,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&JsonSearch {
            pattern: cmd.pattern.clone(),
            plan: plan.name(),
            total: terms.len(),
            terms,
        });
    }
    for term in &terms {
        println!("{term}");
    }
    ExitCode::SUCCESS
}
