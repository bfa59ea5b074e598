//! Wildcard patterns over UTF-8 text.
//!
//! Patterns use `%` for any sequence of codepoints, `_` for exactly one codepoint and `\` to
//! make the next codepoint literal. Two entry points:
//!
//! - [`classify`] inspects a pattern without building anything, so that terms and prefixes can
//!   be served by cheaper lookups
//! - [`compile`] builds a deterministic automaton over UTF-8 bytes
//!
//! [`WildcardPlan`] combines both.
//!
//! # Example
//!
//! ```
//! use wf_wildcard::{WildcardKind, classify, compile};
//!
//! assert_eq!(classify(b"foo%"), WildcardKind::Prefix);
//!
//! let fst = compile(b"%c%");
//! assert!(wf_matcher::accept(&fst, b"abc"));
//! assert!(!wf_matcher::accept(&fst, b"ab"));
//! ```

#![warn(missing_docs)]

mod compile;
mod error;
pub mod fragment;
mod kind;
mod plan;

pub use compile::{CompileOptions, compile, compile_str, compile_with, try_compile};
pub use error::CompileError;
pub use kind::{ANY_CHAR, ANY_STRING, ESCAPE, WildcardKind, classify};
pub use plan::{WildcardPlan, literal_prefix};
