//! Dense transition tables for term dictionary traversal.

use std::collections::VecDeque;

use tantivy_fst::Automaton as TermAutomaton;
use wf_fst::{Automaton, FstError, StateId};

/// Dead state: no accepted string continues from here.
pub const SINK: u32 = u32::MAX;

/// Number of columns per state.
const ALPHABET: usize = 256;

/// A byte automaton compiled into a 256-column table.
///
/// States that cannot reach a final state are dropped, so [`SINK`] doubles as the "no match
/// possible" answer used to prune term dictionary traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteDfa {
    /// Row-major `state * 256 + byte` table of successors.
    table: Vec<u32>,
    /// Acceptance per state.
    finals: Vec<bool>,
    /// Start state, or [`SINK`] for the empty language.
    start: u32,
}

/// States from which some final state is reachable.
fn co_reachable(fst: &Automaton) -> Vec<bool> {
    let n = fst.num_states();
    let mut reverse: Vec<Vec<StateId>> = vec![Vec::new(); n];
    for state in fst.state_ids() {
        for arc in fst.transitions(state) {
            reverse[arc.next as usize].push(state);
        }
    }

    let mut live = vec![false; n];
    let mut queue: VecDeque<StateId> = fst.state_ids().filter(|&s| fst.is_final(s)).collect();
    for &s in &queue {
        live[s as usize] = true;
    }
    while let Some(state) = queue.pop_front() {
        for &prev in &reverse[state as usize] {
            if !live[prev as usize] {
                live[prev as usize] = true;
                queue.push_back(prev);
            }
        }
    }
    live
}

impl ByteDfa {
    /// Builds the table for a deterministic acceptor labelled with byte ranges.
    ///
    /// Fails on transducers, on labels outside `[0, 255]` and on overlapping arcs.
    pub fn new(fst: &Automaton) -> Result<Self, FstError> {
        let Some(start) = fst.start() else {
            return Ok(Self::empty());
        };

        let live = co_reachable(fst);
        let mut ids = vec![SINK; fst.num_states()];
        let mut count = 0u32;
        for state in fst.state_ids() {
            if live[state as usize] {
                ids[state as usize] = count;
                count += 1;
            }
        }

        let mut table = vec![SINK; count as usize * ALPHABET];
        let mut finals = vec![false; count as usize];
        for state in fst.state_ids() {
            let mut seen = [false; ALPHABET];
            let id = ids[state as usize];
            for arc in fst.transitions(state) {
                if arc.ilabel != arc.olabel {
                    return Err(FstError::NotAcceptor);
                }
                let range = arc.input_range();
                if arc.ilabel < 0 || range.max as usize >= ALPHABET {
                    return Err(FstError::NotByteRange {
                        state,
                        label: arc.ilabel,
                    });
                }
                for byte in range.min as usize..=range.max as usize {
                    if seen[byte] {
                        return Err(FstError::NonDeterministic { state });
                    }
                    seen[byte] = true;
                    if id != SINK {
                        table[id as usize * ALPHABET + byte] = ids[arc.next as usize];
                    }
                }
            }
            if id != SINK {
                finals[id as usize] = fst.is_final(state);
            }
        }

        Ok(Self {
            table,
            finals,
            start: ids[start as usize],
        })
    }

    /// The table of the empty language.
    pub fn empty() -> Self {
        Self {
            table: Vec::new(),
            finals: Vec::new(),
            start: SINK,
        }
    }

    /// Number of live states.
    pub fn num_states(&self) -> usize {
        self.finals.len()
    }

    /// The start state, or [`SINK`].
    pub fn start_state(&self) -> u32 {
        self.start
    }

    /// Successor of `state` on `byte`.
    pub fn step(&self, state: u32, byte: u8) -> u32 {
        if state == SINK {
            return SINK;
        }
        self.table[state as usize * ALPHABET + usize::from(byte)]
    }

    /// Whether `state` accepts.
    pub fn is_final(&self, state: u32) -> bool {
        state != SINK && self.finals[state as usize]
    }

    /// Whether `input` is accepted.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut state = self.start;
        for &byte in input {
            state = self.step(state, byte);
            if state == SINK {
                return false;
            }
        }
        self.is_final(state)
    }
}

impl TermAutomaton for ByteDfa {
    type State = u32;

    fn start(&self) -> Self::State {
        self.start
    }

    fn is_match(&self, state: &Self::State) -> bool {
        self.is_final(*state)
    }

    fn can_match(&self, state: &Self::State) -> bool {
        *state != SINK
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        self.step(*state, byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_fst::{BooleanWeight, IntervalLabel, Transition};

    /// `ab` or `a[x-z]`, with a dead branch on `q`.
    fn sample() -> Automaton {
        let mut fst = Automaton::new();
        fst.add_states(4);
        fst.set_start(0);
        fst.add_range(0, IntervalLabel::scalar(u32::from(b'a')), 1);
        fst.add_range(0, IntervalLabel::scalar(u32::from(b'q')), 3);
        fst.add_range(1, IntervalLabel::scalar(u32::from(b'b')), 2);
        fst.add_range(1, IntervalLabel::new(u32::from(b'x'), u32::from(b'z')), 2);
        fst.set_final(2, true);
        fst
    }

    #[test]
    fn prunes_dead_states() {
        let dfa = ByteDfa::new(&sample()).unwrap();
        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.step(dfa.start_state(), b'q'), SINK);
        assert!(!dfa.can_match(&dfa.step(dfa.start_state(), b'q')));
        assert!(dfa.accepts(b"ab"));
        assert!(dfa.accepts(b"ay"));
        assert!(!dfa.accepts(b"a"));
        assert!(!dfa.accepts(b"q"));
        assert!(!dfa.accepts(b"abb"));
    }

    #[test]
    fn drives_term_automaton_interface() {
        let dfa = ByteDfa::new(&sample()).unwrap();
        let mut state = TermAutomaton::start(&dfa);
        for &b in b"az" {
            state = dfa.accept(&state, b);
        }
        assert!(dfa.is_match(&state));
    }

    #[test]
    fn rejects_malformed_input() {
        let mut fst = sample();
        fst.add_range(1, IntervalLabel::new(u32::from(b'y'), 300), 2);
        assert!(matches!(
            ByteDfa::new(&fst),
            Err(FstError::NotByteRange { state: 1, .. })
        ));

        let mut fst = sample();
        fst.add_range(1, IntervalLabel::scalar(u32::from(b'b')), 0);
        assert_eq!(
            ByteDfa::new(&fst),
            Err(FstError::NonDeterministic { state: 1 })
        );

        let mut fst = sample();
        fst.add_arc(
            0,
            Transition::new(1, 2, BooleanWeight::one(), 1),
        );
        assert_eq!(ByteDfa::new(&fst), Err(FstError::NotAcceptor));
    }

    #[test]
    fn full_byte_range_includes_nul() {
        let mut fst = Automaton::new();
        fst.add_states(1);
        fst.set_start(0);
        fst.set_final(0, true);
        fst.add_range(0, IntervalLabel::new(0, 0xFF), 0);
        let dfa = ByteDfa::new(&fst).unwrap();
        assert!(dfa.accepts(b""));
        assert!(dfa.accepts(b"a\0\xFF"));
    }

    #[test]
    fn empty_language() {
        let dfa = ByteDfa::new(&Automaton::new()).unwrap();
        assert_eq!(dfa.start_state(), SINK);
        assert!(!dfa.accepts(b""));
        assert_eq!(dfa, ByteDfa::empty());
    }
}
