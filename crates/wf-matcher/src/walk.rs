//! Running byte strings through an automaton.

use wf_config::DEFAULT_BINARY_SEARCH_THRESHOLD;
use wf_fst::{Automaton, Label, NO_LABEL};

use crate::{explicit::Explicit, matcher::Matcher, sorted_range::SortedRangeMatcher};

/// Whether the deterministic byte automaton `fst` accepts `input`.
///
/// An automaton without a start state accepts nothing.
pub fn accept(fst: &Automaton, input: &[u8]) -> bool {
    let mut matcher = Explicit::new(SortedRangeMatcher::new(
        fst,
        DEFAULT_BINARY_SEARCH_THRESHOLD,
    ));
    accept_with(&mut matcher, input)
}

/// Runs `input` through any matcher, following the first real match for each byte.
///
/// Implicit matches are skipped and acceptance uses the matcher's own final weight, so fallback
/// arcs and phi final-state chasing apply. Byte 0 is looked up like any other byte, so it
/// follows an arc whose interval starts at 0.
pub fn accept_with(matcher: &mut dyn Matcher, input: &[u8]) -> bool {
    let Some(mut state) = matcher.automaton().start() else {
        return false;
    };
    for &byte in input {
        matcher.set_state(state);
        if !matcher.find(Label::from(byte)) {
            return false;
        }
        loop {
            if matcher.done() {
                return false;
            }
            let arc = matcher.value();
            if arc.ilabel != NO_LABEL && arc.olabel != NO_LABEL {
                state = arc.next;
                break;
            }
            matcher.next();
        }
    }
    matcher.final_weight(state).is_accepting()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_fst::IntervalLabel;

    #[test]
    fn walks_byte_ranges() {
        let mut fst = Automaton::new();
        fst.add_states(3);
        fst.set_start(0);
        fst.add_range(0, IntervalLabel::new(u32::from(b'a'), u32::from(b'f')), 1);
        fst.add_range(1, IntervalLabel::scalar(u32::from(b'!')), 2);
        fst.set_final(2, true);
        fst.sort_arcs();

        assert!(accept(&fst, b"c!"));
        assert!(!accept(&fst, b"g!"));
        assert!(!accept(&fst, b"c"));
        assert!(!accept(&fst, b"c!!"));
        assert!(!accept(&Automaton::new(), b""));
    }

    #[test]
    fn nul_needs_an_arc_covering_zero() {
        let mut fst = Automaton::new();
        fst.add_states(1);
        fst.set_start(0);
        fst.set_final(0, true);
        fst.add_range(0, IntervalLabel::new(1, 255), 0);
        assert!(accept(&fst, b"abc"));
        assert!(!accept(&fst, b"a\0c"));

        let mut any = Automaton::new();
        any.add_states(1);
        any.set_start(0);
        any.set_final(0, true);
        any.add_range(0, IntervalLabel::new(0, 255), 0);
        assert!(accept(&any, b"a\0c"));
        assert!(accept(&any, b"\0\xFF\x80"));
    }
}
