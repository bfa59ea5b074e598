//! Boolean weights.
//!
//! Automata built here are unweighted: a weight only records whether a path or final state is
//! part of the language. `Invalid` stands for "no weight" and is absorbing.

use std::fmt;

/// A two-valued semiring with an explicit invalid element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BooleanWeight {
    /// Not in the language (semiring zero).
    #[default]
    Rejecting,
    /// In the language (semiring one).
    Accepting,
    /// No weight; the result of an undefined operation.
    Invalid,
}

impl BooleanWeight {
    /// Semiring zero.
    pub const fn zero() -> Self {
        Self::Rejecting
    }

    /// Semiring one.
    pub const fn one() -> Self {
        Self::Accepting
    }

    /// The invalid weight.
    pub const fn no_weight() -> Self {
        Self::Invalid
    }

    /// Whether this is a proper member of the semiring.
    pub const fn is_member(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Whether this weight marks acceptance.
    pub const fn is_accepting(self) -> bool {
        matches!(self, Self::Accepting)
    }
}

impl From<bool> for BooleanWeight {
    fn from(value: bool) -> Self {
        if value { Self::Accepting } else { Self::Rejecting }
    }
}

impl fmt::Display for BooleanWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Rejecting => "0",
            Self::Accepting => "1",
            Self::Invalid => "BadNumber",
        };
        f.write_str(text)
    }
}

/// Semiring plus: logical OR.
pub const fn union(lhs: BooleanWeight, rhs: BooleanWeight) -> BooleanWeight {
    match (lhs, rhs) {
        (BooleanWeight::Invalid, _) | (_, BooleanWeight::Invalid) => BooleanWeight::Invalid,
        (BooleanWeight::Accepting, _) | (_, BooleanWeight::Accepting) => BooleanWeight::Accepting,
        _ => BooleanWeight::Rejecting,
    }
}

/// Semiring times: logical AND.
pub const fn intersect(lhs: BooleanWeight, rhs: BooleanWeight) -> BooleanWeight {
    match (lhs, rhs) {
        (BooleanWeight::Invalid, _) | (_, BooleanWeight::Invalid) => BooleanWeight::Invalid,
        (BooleanWeight::Accepting, BooleanWeight::Accepting) => BooleanWeight::Accepting,
        _ => BooleanWeight::Rejecting,
    }
}

#[cfg(test)]
mod tests {
    use super::{BooleanWeight::*, *};

    #[test]
    fn union_table() {
        assert_eq!(union(Rejecting, Rejecting), Rejecting);
        assert_eq!(union(Rejecting, Accepting), Accepting);
        assert_eq!(union(Accepting, Accepting), Accepting);
        assert_eq!(union(Invalid, Accepting), Invalid);
    }

    #[test]
    fn intersect_table() {
        assert_eq!(intersect(Accepting, Accepting), Accepting);
        assert_eq!(intersect(Accepting, Rejecting), Rejecting);
        assert_eq!(intersect(Rejecting, Rejecting), Rejecting);
        assert_eq!(intersect(Rejecting, Invalid), Invalid);
    }

    #[test]
    fn membership() {
        assert!(BooleanWeight::zero().is_member());
        assert!(BooleanWeight::one().is_member());
        assert!(!BooleanWeight::no_weight().is_member());
        assert_eq!(BooleanWeight::from(true), Accepting);
        assert_eq!(BooleanWeight::default(), Rejecting);
    }
}
