//! Matchers over interval-labelled automata.
//!
//! A [`Matcher`] answers "which arcs leaving this state match this label?" during automaton
//! traversal or composition. The base implementation, [`SortedRangeMatcher`], searches a state's
//! sorted interval arcs. Combinators wrap another matcher to change what matches:
//!
//! - [`Explicit`] hides implicit epsilon self-loops
//! - [`Sigma`] lets a special label match anything
//! - [`Rho`] lets a special label match whatever has no explicit arc
//! - [`Phi`] follows failure arcs until a match is found
//! - [`MultiEps`] treats extra labels as non-consuming
//!
//! [`ByteDfa`] turns a byte automaton into a dense table implementing
//! [`tantivy_fst::Automaton`], for term dictionary searches.

#![warn(missing_docs)]

mod byte_dfa;
mod error;
mod explicit;
mod factory;
mod matcher;
mod multi_eps;
mod phi;
mod rewrite;
mod rho;
mod sigma;
mod sorted_range;
mod walk;

pub use byte_dfa::{ByteDfa, SINK};
pub use error::MatchError;
pub use explicit::Explicit;
pub use factory::{Composition, make_matcher};
pub use matcher::{
    CopyMode, FstHandle, MatchType, Matcher, MatcherFlags, REQUIRE_PRIORITY, TryMatcher,
};
pub use multi_eps::{MultiEps, MultiEpsFlags};
pub use phi::Phi;
pub use rewrite::{RewriteMode, Rewriter};
pub use rho::Rho;
pub use sigma::Sigma;
pub use sorted_range::SortedRangeMatcher;
pub use walk::{accept, accept_with};
pub use wf_config::DEFAULT_BINARY_SEARCH_THRESHOLD;
