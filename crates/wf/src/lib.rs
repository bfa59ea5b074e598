//! wf: wildcard patterns over UTF-8 text.
//!
//! The `wf` binary classifies `%`/`_` wildcard patterns, compiles them into deterministic byte
//! automata, tests strings against them and uses them to search term dictionaries. The heavy
//! lifting lives in the `wf-wildcard`, `wf-matcher` and `wf-fst` crates; this crate only wires
//! them to the command line.

#![warn(missing_docs)]

pub mod cli;
