//! Error types for wildcard compilation.

use thiserror::Error;
use wf_fst::FstError;

/// Reasons a wildcard pattern cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The pattern is not valid UTF-8.
    #[error("invalid UTF-8 sequence at byte {position}")]
    InvalidUtf8 {
        /// Byte offset of the malformed sequence.
        position: usize,
    },

    /// The pattern contains U+0000, which collides with the epsilon label.
    #[error("U+0000 at byte {position} is outside the matchable alphabet")]
    ReservedCodepoint {
        /// Byte offset of the codepoint.
        position: usize,
    },

    /// Determinization of the concatenated fragments failed.
    #[error("failed to determinize wildcard automaton: {0}")]
    Determinize(#[from] FstError),
}

impl CompileError {
    /// Byte offset in the pattern where the error occurred, if it is tied to one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidUtf8 { position } | Self::ReservedCodepoint { position } => {
                Some(*position)
            }
            Self::Determinize(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_position() {
        let err = CompileError::InvalidUtf8 { position: 3 };
        assert_eq!(err.to_string(), "invalid UTF-8 sequence at byte 3");
        assert_eq!(err.position(), Some(3));

        let err = CompileError::from(FstError::TooManyStates { limit: 8 });
        assert!(err.to_string().contains("limit of 8 states"));
        assert_eq!(err.position(), None);
    }
}
