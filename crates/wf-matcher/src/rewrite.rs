//! Label rewriting shared by the fallback combinators.

use wf_fst::{Automaton, IntervalLabel, Label, Properties, Transition, scalar_label};

use crate::matcher::MatchType;

/// Which arc labels a fallback combinator replaces with the requested label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteMode {
    /// Both sides for acceptors, the matched side otherwise.
    #[default]
    Auto,
    /// Both sides.
    Always,
    /// The matched side only.
    Never,
}

/// Replaces a special label on fallback arcs.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter {
    /// The special label (sigma, rho or phi).
    special: Label,
    /// Rewrite every side carrying the special label, not just the matched one.
    both: bool,
    /// Side matched on.
    match_type: MatchType,
}

/// Whether an arc label carries the scalar `special`.
fn carries(label: Label, special: Label) -> bool {
    label >= 0 && IntervalLabel::unpack(label).contains(special)
}

impl Rewriter {
    /// Creates a rewriter; `Auto` checks whether `fst` is an acceptor.
    pub fn new(fst: &Automaton, special: Label, mode: RewriteMode, match_type: MatchType) -> Self {
        let both = match mode {
            RewriteMode::Always => true,
            RewriteMode::Never => false,
            RewriteMode::Auto => {
                let mask = Properties::ACCEPTOR | Properties::NOT_ACCEPTOR;
                let known = fst.properties(mask, false);
                let props = if known.intersects(mask) {
                    known
                } else {
                    fst.properties(mask, true)
                };
                props.contains(Properties::ACCEPTOR)
            }
        };
        Self {
            special,
            both,
            match_type,
        }
    }

    /// Whether both sides are rewritten.
    pub fn rewrites_both(&self) -> bool {
        self.both
    }

    /// Returns `arc` with the special label replaced by the scalar `label`.
    pub fn apply(&self, mut arc: Transition, label: Label) -> Transition {
        let replacement = scalar_label(label);
        if self.both {
            if carries(arc.ilabel, self.special) {
                arc.ilabel = replacement;
            }
            if carries(arc.olabel, self.special) {
                arc.olabel = replacement;
            }
        } else if self.match_type == MatchType::Output {
            arc.olabel = replacement;
        } else {
            arc.ilabel = replacement;
        }
        arc
    }

    /// Clears the property bits a rewrite can invalidate.
    pub fn properties(&self, props: Properties) -> Properties {
        if self.match_type == MatchType::None {
            return props;
        }
        let unstable = Properties::I_DETERMINISTIC
            | Properties::NON_I_DETERMINISTIC
            | Properties::O_DETERMINISTIC
            | Properties::NON_O_DETERMINISTIC
            | Properties::I_LABEL_SORTED
            | Properties::NOT_I_LABEL_SORTED
            | Properties::O_LABEL_SORTED
            | Properties::NOT_O_LABEL_SORTED;
        if self.both {
            props & !unstable
        } else {
            props & !(unstable | Properties::ACCEPTOR | Properties::NOT_ACCEPTOR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_fst::{BooleanWeight, pack};

    const SPECIAL: Label = 0x11_0000;

    fn acceptor() -> Automaton {
        let mut fst = Automaton::new();
        fst.add_states(2);
        fst.add_range(0, IntervalLabel::scalar(SPECIAL as u32), 1);
        fst
    }

    #[test]
    fn auto_rewrites_both_sides_of_acceptors() {
        let fst = acceptor();
        let rw = Rewriter::new(&fst, SPECIAL, RewriteMode::Auto, MatchType::Input);
        assert!(rw.rewrites_both());
        let arc = rw.apply(fst.transitions(0)[0], 0x61);
        assert_eq!((arc.ilabel, arc.olabel), (pack(0x61, 0x61), pack(0x61, 0x61)));
    }

    #[test]
    fn never_rewrites_matched_side_only() {
        let fst = acceptor();
        let rw = Rewriter::new(&fst, SPECIAL, RewriteMode::Never, MatchType::Output);
        let arc = rw.apply(
            Transition::new(pack(1, 1), pack(2, 2), BooleanWeight::one(), 1),
            5,
        );
        assert_eq!((arc.ilabel, arc.olabel), (pack(1, 1), pack(5, 5)));
        assert!(!rw.properties(Properties::ACCEPTOR).contains(Properties::ACCEPTOR));
    }

    #[test]
    fn always_leaves_non_special_side() {
        let fst = acceptor();
        let rw = Rewriter::new(&fst, SPECIAL, RewriteMode::Always, MatchType::Input);
        let arc = rw.apply(
            Transition::new(scalar_label(SPECIAL), pack(3, 3), BooleanWeight::one(), 1),
            9,
        );
        assert_eq!((arc.ilabel, arc.olabel), (pack(9, 9), pack(3, 3)));
    }
}
