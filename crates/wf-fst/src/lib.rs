//! Interval-labelled finite-state automata.
//!
//! This crate holds the automaton model shared by the wildcard compiler and the matchers:
//!
//! - **Labels**: closed byte/codepoint intervals packed into one `i64` ([`IntervalLabel`])
//! - **Weights**: a boolean semiring with an explicit invalid element ([`BooleanWeight`])
//! - **Automata**: an arena of states with sorted, interval-labelled arcs ([`Automaton`])
//! - **Algorithms**: epsilon-free [`concat`], [`determinize_star`] and UTF-8 label expansion
//!
//! # Example
//!
//! ```
//! use wf_fst::{Automaton, IntervalLabel, Properties, determinize_star, DEFAULT_MAX_STATES};
//!
//! let mut nfa = Automaton::new();
//! nfa.add_states(2);
//! nfa.set_start(0);
//! nfa.add_range(0, IntervalLabel::new(b'a'.into(), b'z'.into()), 1);
//! nfa.add_range(0, IntervalLabel::scalar(b'q'.into()), 1);
//! nfa.set_final(1, true);
//!
//! let dfa = determinize_star(&nfa, DEFAULT_MAX_STATES).unwrap();
//! assert!(dfa.properties(Properties::I_DETERMINISTIC, true).contains(Properties::I_DETERMINISTIC));
//! ```

#![warn(missing_docs)]

mod automaton;
mod concat;
mod determinize;
pub mod dot;
mod error;
mod label;
mod properties;
pub mod utf8;
mod weight;

pub use automaton::{Automaton, StateId, Transition};
pub use concat::concat;
pub use determinize::{DEFAULT_MAX_STATES, DETERMINIZED, determinize_star};
pub use error::FstError;
pub use label::{
    EPSILON, IntervalLabel, Label, MAX_CODEPOINT, NO_LABEL, display_label, pack, scalar_label,
    unpack,
};
pub use properties::{Properties, compute_properties};
pub use weight::{BooleanWeight, intersect, union};
