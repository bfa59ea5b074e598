//! Matcher error types.

use thiserror::Error;
use wf_fst::{Label, StateId};

use crate::matcher::MatchType;

/// Misuse detected by a matcher.
///
/// Matchers record the first error and keep reporting it; see [`crate::Matcher::error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Label 0 is epsilon and cannot serve as a special label.
    #[error("0 cannot be used as the {role} label")]
    ReservedLabel {
        /// Which special label was configured.
        role: &'static str,
    },

    /// The special label itself was passed to `find`.
    #[error("find({label}) is not allowed: {label} is the {role} label")]
    SpecialLabelQuery {
        /// Which special label was searched for.
        role: &'static str,
        /// The offending label.
        label: Label,
    },

    /// More than one phi arc leaves a state.
    #[error("non-deterministic phi transitions at state {state}")]
    NonDeterministicPhi {
        /// State with several phi arcs.
        state: StateId,
    },

    /// The matcher cannot match on the requested side.
    #[error("match type {0} is not supported")]
    UnsupportedMatchType(MatchType),

    /// Arcs are not sorted on the matched side.
    #[error("arcs are not sorted on the {0} side")]
    Unsorted(MatchType),
}
