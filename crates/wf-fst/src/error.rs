//! Error types for automaton algorithms.

use thiserror::Error;

use crate::{automaton::StateId, label::Label};

/// Errors reported by automaton algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FstError {
    /// Determinization would need more states than allowed.
    #[error("determinization exceeded the limit of {limit} states")]
    TooManyStates {
        /// The configured state limit.
        limit: usize,
    },

    /// The algorithm only supports acceptors.
    #[error("automaton is not an acceptor")]
    NotAcceptor,

    /// An arc label does not fit the byte alphabet.
    #[error("arc label {label:#x} at state {state} is not a byte range")]
    NotByteRange {
        /// State owning the arc.
        state: StateId,
        /// Offending packed label.
        label: Label,
    },

    /// Overlapping intervals leave the same state.
    #[error("state {state} has overlapping transitions")]
    NonDeterministic {
        /// State owning the arcs.
        state: StateId,
    },
}
