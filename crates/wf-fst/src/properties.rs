//! Automaton property bits.

use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use crate::{
    automaton::Automaton,
    label::{EPSILON, IntervalLabel, Label},
};

/// A set of automaton (or matcher) property bits.
///
/// Most properties come in true/false pairs so that "unknown" can be told apart from "false".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Properties(u64);

impl Properties {
    /// No bits.
    pub const EMPTY: Self = Self(0);
    /// The automaton or matcher is in an error state.
    pub const ERROR: Self = Self(1 << 0);
    /// Input and output labels coincide on every arc.
    pub const ACCEPTOR: Self = Self(1 << 1);
    /// Some arc has differing input and output labels.
    pub const NOT_ACCEPTOR: Self = Self(1 << 2);
    /// Input intervals leaving each state are pairwise disjoint.
    pub const I_DETERMINISTIC: Self = Self(1 << 3);
    /// Some state has overlapping input intervals.
    pub const NON_I_DETERMINISTIC: Self = Self(1 << 4);
    /// Output intervals leaving each state are pairwise disjoint.
    pub const O_DETERMINISTIC: Self = Self(1 << 5);
    /// Some state has overlapping output intervals.
    pub const NON_O_DETERMINISTIC: Self = Self(1 << 6);
    /// Some arc carries an epsilon label.
    pub const EPSILONS: Self = Self(1 << 7);
    /// No arc carries an epsilon label.
    pub const NO_EPSILONS: Self = Self(1 << 8);
    /// Arcs are sorted by input label at every state.
    pub const I_LABEL_SORTED: Self = Self(1 << 9);
    /// Some state has arcs out of input-label order.
    pub const NOT_I_LABEL_SORTED: Self = Self(1 << 10);
    /// Arcs are sorted by output label at every state.
    pub const O_LABEL_SORTED: Self = Self(1 << 11);
    /// Some state has arcs out of output-label order.
    pub const NOT_O_LABEL_SORTED: Self = Self(1 << 12);
    /// Some weight is neither zero nor one.
    pub const WEIGHTED: Self = Self(1 << 13);
    /// All weights are zero or one.
    pub const UNWEIGHTED: Self = Self(1 << 14);

    /// Every bit computed by [`compute_properties`].
    pub const ALL: Self = Self((1 << 15) - 1);

    /// Raw bit representation.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Builds a property set from raw bits.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any bit of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Properties {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Properties {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Properties {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Properties {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Properties {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Properties, &str); 15] = [
            (Properties::ERROR, "error"),
            (Properties::ACCEPTOR, "acceptor"),
            (Properties::NOT_ACCEPTOR, "not-acceptor"),
            (Properties::I_DETERMINISTIC, "i-deterministic"),
            (Properties::NON_I_DETERMINISTIC, "non-i-deterministic"),
            (Properties::O_DETERMINISTIC, "o-deterministic"),
            (Properties::NON_O_DETERMINISTIC, "non-o-deterministic"),
            (Properties::EPSILONS, "epsilons"),
            (Properties::NO_EPSILONS, "no-epsilons"),
            (Properties::I_LABEL_SORTED, "i-label-sorted"),
            (Properties::NOT_I_LABEL_SORTED, "not-i-label-sorted"),
            (Properties::O_LABEL_SORTED, "o-label-sorted"),
            (Properties::NOT_O_LABEL_SORTED, "not-o-label-sorted"),
            (Properties::WEIGHTED, "weighted"),
            (Properties::UNWEIGHTED, "unweighted"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(" "))
    }
}

/// Whether a sequence of labels is non-decreasing.
fn is_sorted(labels: impl Iterator<Item = Label>) -> bool {
    let mut prev = None;
    for label in labels {
        if prev.is_some_and(|p| p > label) {
            return false;
        }
        prev = Some(label);
    }
    true
}

/// Whether the intervals denoted by a set of labels are pairwise disjoint.
fn is_disjoint(labels: impl Iterator<Item = Label>) -> bool {
    let mut ranges: Vec<IntervalLabel> = labels.map(IntervalLabel::unpack).collect();
    ranges.sort_unstable();
    ranges.windows(2).all(|pair| pair[0].max < pair[1].min)
}

/// Computes every property of `fst` from scratch and returns the bits selected by `mask`.
///
/// One pass over the arcs, plus a sort per state for the determinism checks.
pub fn compute_properties(fst: &Automaton, mask: Properties) -> Properties {
    let mut acceptor = true;
    let mut epsilons = false;
    let mut i_sorted = true;
    let mut o_sorted = true;
    let mut i_deterministic = true;
    let mut o_deterministic = true;
    let mut weighted = false;

    for state in fst.state_ids() {
        let arcs = fst.transitions(state);
        if !fst.final_weight(state).is_member() {
            weighted = true;
        }
        for arc in arcs {
            acceptor &= arc.ilabel == arc.olabel;
            epsilons |= arc.ilabel == EPSILON || arc.olabel == EPSILON;
            weighted |= !arc.weight.is_accepting();
        }
        i_sorted &= is_sorted(arcs.iter().map(|a| a.ilabel));
        o_sorted &= is_sorted(arcs.iter().map(|a| a.olabel));
        if mask.intersects(Properties::I_DETERMINISTIC | Properties::NON_I_DETERMINISTIC) {
            i_deterministic &= is_disjoint(arcs.iter().map(|a| a.ilabel));
        }
        if mask.intersects(Properties::O_DETERMINISTIC | Properties::NON_O_DETERMINISTIC) {
            o_deterministic &= is_disjoint(arcs.iter().map(|a| a.olabel));
        }
    }

    let pick = |flag: bool, yes: Properties, no: Properties| if flag { yes } else { no };
    let props = pick(acceptor, Properties::ACCEPTOR, Properties::NOT_ACCEPTOR)
        | pick(epsilons, Properties::EPSILONS, Properties::NO_EPSILONS)
        | pick(
            i_sorted,
            Properties::I_LABEL_SORTED,
            Properties::NOT_I_LABEL_SORTED,
        )
        | pick(
            o_sorted,
            Properties::O_LABEL_SORTED,
            Properties::NOT_O_LABEL_SORTED,
        )
        | pick(
            i_deterministic,
            Properties::I_DETERMINISTIC,
            Properties::NON_I_DETERMINISTIC,
        )
        | pick(
            o_deterministic,
            Properties::O_DETERMINISTIC,
            Properties::NON_O_DETERMINISTIC,
        )
        | pick(weighted, Properties::WEIGHTED, Properties::UNWEIGHTED);

    props & mask
}
