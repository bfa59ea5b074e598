//! Single-token automata that a wildcard is assembled from.
//!
//! Fragments are labelled with byte ranges. Codepoint fragments are expanded to their UTF-8
//! encodings as they are built; `%` loops over raw bytes, so it also spans bytes that are not
//! valid UTF-8.

use wf_fst::{Automaton, IntervalLabel, MAX_CODEPOINT, utf8::expand_labels};

/// Every byte value.
pub const ANY_BYTE: IntervalLabel = IntervalLabel { min: 0, max: 0xFF };

/// Every codepoint.
pub const ANY_CODEPOINT: IntervalLabel = IntervalLabel {
    min: 0,
    max: MAX_CODEPOINT,
};

/// Accepts only the empty string.
pub fn make_empty_string() -> Automaton {
    let mut fst = Automaton::new();
    let s = fst.add_state();
    fst.set_start(s);
    fst.set_final(s, true);
    fst
}

/// Accepts any byte string: one accepting state looping on every byte.
pub fn make_any_string() -> Automaton {
    let mut fst = make_empty_string();
    fst.add_range(0, ANY_BYTE, 0);
    fst
}

/// Accepts the UTF-8 encoding of exactly one codepoint from `range`.
pub fn make_range(range: IntervalLabel) -> Automaton {
    let mut fst = Automaton::new();
    let start = fst.add_state();
    let end = fst.add_state();
    fst.set_start(start);
    fst.set_final(end, true);
    fst.add_range(start, range, end);
    expand_labels(&mut fst);
    fst
}

/// Accepts exactly one codepoint of any encoded length.
pub fn make_any_char() -> Automaton {
    make_range(ANY_CODEPOINT)
}

/// Accepts exactly `ch`.
pub fn make_char(ch: char) -> Automaton {
    make_range(IntervalLabel::scalar(u32::from(ch)))
}
