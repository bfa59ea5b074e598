//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use wf_fst::{Automaton, StateId};
use wf_wildcard::WildcardKind;

/// One arc of a compiled automaton.
#[derive(Debug, Serialize)]
pub struct JsonTransition {
    /// Source state.
    pub from: StateId,
    /// Lowest byte on the arc.
    pub min: u32,
    /// Highest byte on the arc.
    pub max: u32,
    /// Target state.
    pub to: StateId,
}

/// JSON output for `wf compile`.
#[derive(Debug, Serialize)]
pub struct JsonAutomaton {
    /// The compiled pattern.
    pub pattern: String,
    /// How the pattern classifies.
    pub kind: WildcardKind,
    /// Start state; absent when the pattern matches nothing.
    pub start: Option<StateId>,
    /// Number of states.
    pub states: usize,
    /// Accepting states.
    pub finals: Vec<StateId>,
    /// Every arc, by source state.
    pub transitions: Vec<JsonTransition>,
}

impl JsonAutomaton {
    /// Describes `fst`, compiled from `pattern`.
    pub fn new(pattern: &str, kind: WildcardKind, fst: &Automaton) -> Self {
        let transitions = fst
            .state_ids()
            .flat_map(|from| {
                fst.transitions(from).iter().map(move |arc| {
                    let range = arc.input_range();
                    JsonTransition {
                        from,
                        min: range.min,
                        max: range.max,
                        to: arc.next,
                    }
                })
            })
            .collect();
        Self {
            pattern: pattern.to_string(),
            kind,
            start: fst.start(),
            states: fst.num_states(),
            finals: fst.state_ids().filter(|&s| fst.is_final(s)).collect(),
            transitions,
        }
    }
}

/// One row of `wf classify`.
#[derive(Debug, Serialize)]
pub struct JsonClassification {
    /// The classified pattern.
    pub pattern: String,
    /// Its kind.
    pub kind: WildcardKind,
    /// The unescaped term or prefix, for kinds that have one.
    pub literal: Option<String>,
}

/// JSON output for `wf search`.
#[derive(Debug, Serialize)]
pub struct JsonSearch {
    /// The search pattern.
    pub pattern: String,
    /// Evaluation strategy used.
    pub plan: &'static str,
    /// Matching terms in dictionary order.
    pub terms: Vec<String>,
    /// Number of terms returned.
    pub total: usize,
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats a byte for display: printable ASCII as itself, everything else in hex.
fn format_byte(b: u32) -> String {
    match u8::try_from(b) {
        Ok(byte) if byte.is_ascii_graphic() => format!("'{}'", char::from(byte)),
        _ => format!("{b:#04x}"),
    }
}

/// Formats an arc's byte range.
pub fn format_range(min: u32, max: u32) -> String {
    if min == max {
        format_byte(min)
    } else {
        format!("{}-{}", format_byte(min), format_byte(max))
    }
}

/// Tabulates the arcs of `fst`, one row per arc. Final states without arcs get a row too.
pub fn automaton_table(fst: &Automaton) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["State", "Final", "Bytes", "Next"]);

    for state in fst.state_ids() {
        let name = if fst.start() == Some(state) {
            format!("{state} (start)")
        } else {
            state.to_string()
        };
        let final_mark = if fst.is_final(state) { "yes" } else { "" };
        let arcs = fst.transitions(state);
        if arcs.is_empty() {
            table.add_row(vec![
                Cell::new(&name),
                Cell::new(final_mark),
                Cell::new(""),
                Cell::new(""),
            ]);
        }
        for arc in arcs {
            let range = arc.input_range();
            table.add_row(vec![
                Cell::new(&name),
                Cell::new(final_mark),
                Cell::new(format_range(range.min, range.max)),
                Cell::new(arc.next.to_string()),
            ]);
        }
    }
    table
}
