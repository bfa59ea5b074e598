//! UTF-8 helpers: codepoint decoding, codepoint-range to byte-range splitting, and expansion
//! of codepoint-labelled automata into byte-labelled ones.

use std::{collections::BTreeMap, str};

use regex_syntax::utf8::{Utf8Range, Utf8Sequence, Utf8Sequences};

use crate::{
    automaton::{Automaton, StateId},
    label::{IntervalLabel, MAX_CODEPOINT},
};

/// First UTF-16 surrogate codepoint.
const SURROGATE_MIN: u32 = 0xD800;
/// Last UTF-16 surrogate codepoint.
const SURROGATE_MAX: u32 = 0xDFFF;

/// Encoded length announced by a lead byte, or 0 if the byte cannot start a sequence.
pub const fn codepoint_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

/// Decodes the codepoint at the start of `bytes`, returning it with its encoded length.
///
/// Returns `None` for a zero-length lead byte, a sequence overrunning the buffer, or any other
/// malformed encoding.
pub fn next_codepoint(bytes: &[u8]) -> Option<(char, usize)> {
    let len = codepoint_len(*bytes.first()?);
    if len == 0 || len > bytes.len() {
        return None;
    }
    let ch = str::from_utf8(&bytes[..len]).ok()?.chars().next()?;
    Some((ch, len))
}

/// Iterator over the codepoints of a byte string.
///
/// Yields `Ok((offset, char))` for each codepoint and `Err(offset)` once at the first malformed
/// sequence, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    /// Input bytes.
    bytes: &'a [u8],
    /// Offset of the next codepoint.
    offset: usize,
    /// Set once a malformed sequence has been reported.
    failed: bool,
}

/// Iterates over the codepoints of `bytes`.
pub fn codepoints(bytes: &[u8]) -> Codepoints<'_> {
    Codepoints {
        bytes,
        offset: 0,
        failed: false,
    }
}

impl Iterator for Codepoints<'_> {
    type Item = Result<(usize, char), usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }
        let offset = self.offset;
        match next_codepoint(&self.bytes[offset..]) {
            Some((ch, len)) => {
                self.offset += len;
                Some(Ok((offset, ch)))
            }
            None => {
                self.failed = true;
                Some(Err(offset))
            }
        }
    }
}

/// Clamps a codepoint interval to Unicode scalar values.
///
/// Bounds inside the surrogate block move outwards; surrogates strictly inside the interval are
/// skipped by the splitter. `None` if nothing is left.
fn scalar_bounds(range: IntervalLabel) -> Option<(char, char)> {
    let mut lo = range.min;
    let mut hi = range.max.min(MAX_CODEPOINT);
    if (SURROGATE_MIN..=SURROGATE_MAX).contains(&lo) {
        lo = SURROGATE_MAX + 1;
    }
    if (SURROGATE_MIN..=SURROGATE_MAX).contains(&hi) {
        hi = SURROGATE_MIN - 1;
    }
    if lo > hi {
        return None;
    }
    Some((char::from_u32(lo)?, char::from_u32(hi)?))
}

/// The UTF-8 byte-range sequences encoding every scalar value in `range`, in ascending order.
pub fn byte_sequences(range: IntervalLabel) -> impl Iterator<Item = Utf8Sequence> {
    scalar_bounds(range)
        .into_iter()
        .flat_map(|(lo, hi)| Utf8Sequences::new(lo, hi))
}

/// Byte interval of one position in a UTF-8 sequence.
fn byte_interval(range: Utf8Range) -> IntervalLabel {
    IntervalLabel::new(range.start.into(), range.end.into())
}

/// Rewrites a codepoint-labelled acceptor into one labelled with UTF-8 byte ranges.
///
/// Each codepoint arc becomes a chain of byte-range arcs through fresh intermediate states.
/// Chains leaving the same state share prefixes, so a deterministic input stays deterministic.
/// Arcs of every state are sorted afterwards.
pub fn expand_labels(fst: &mut Automaton) {
    let original = fst.num_states() as StateId;
    for state in 0..original {
        let arcs = fst.take_transitions(state);
        let mut nodes: BTreeMap<(StateId, Utf8Range), StateId> = BTreeMap::new();

        for arc in arcs {
            for sequence in byte_sequences(arc.input_range()) {
                let Some((last, prefix)) = sequence.as_slice().split_last() else {
                    continue;
                };
                let mut node = state;
                for &step in prefix {
                    let parent = node;
                    node = match nodes.get(&(parent, step)) {
                        Some(&child) => child,
                        None => {
                            let child = fst.add_state();
                            fst.add_range(parent, byte_interval(step), child);
                            nodes.insert((parent, step), child);
                            child
                        }
                    };
                }
                fst.add_range(node, byte_interval(*last), arc.next);
            }
        }
    }
    fst.sort_arcs();
}
