//! Mutable automaton container.
//!
//! The automaton is a single arena: states are dense integer ids and arcs name their
//! destination by id, so automata can be cloned or moved freely and never reference each other.

use crate::{
    label::{IntervalLabel, Label},
    properties::{Properties, compute_properties},
    weight::BooleanWeight,
};

/// State identifier, dense from 0.
pub type StateId = u32;

/// An outgoing arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Input label (packed interval).
    pub ilabel: Label,
    /// Output label (packed interval).
    pub olabel: Label,
    /// Arc weight.
    pub weight: BooleanWeight,
    /// Destination state.
    pub next: StateId,
}

impl Transition {
    /// Creates an arc.
    pub const fn new(ilabel: Label, olabel: Label, weight: BooleanWeight, next: StateId) -> Self {
        Self {
            ilabel,
            olabel,
            weight,
            next,
        }
    }

    /// Creates an acceptor arc over `range` with weight one.
    pub const fn range(range: IntervalLabel, next: StateId) -> Self {
        let label = range.pack();
        Self::new(label, label, BooleanWeight::one(), next)
    }

    /// The input interval.
    pub const fn input_range(&self) -> IntervalLabel {
        IntervalLabel::unpack(self.ilabel)
    }

    /// The output interval.
    pub const fn output_range(&self) -> IntervalLabel {
        IntervalLabel::unpack(self.olabel)
    }
}

/// A single state: final weight and outgoing arcs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct State {
    /// `Rejecting` for non-final states.
    final_weight: BooleanWeight,
    /// Outgoing arcs.
    transitions: Vec<Transition>,
}

/// An owned, mutable finite-state automaton.
///
/// An automaton without a start state accepts nothing; callers treat such an automaton (and in
/// particular one with zero states) as "matches nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    /// State arena.
    states: Vec<State>,
    /// Distinguished start state.
    start: Option<StateId>,
    /// Known property bits.
    properties: Properties,
}

/// Converts a state id into an arena index.
const fn index(state: StateId) -> usize {
    state as usize
}

impl Automaton {
    /// Creates an automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the automaton has no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Number of arcs leaving `state`.
    pub fn num_arcs(&self, state: StateId) -> usize {
        self.states[index(state)].transitions.len()
    }

    /// Total number of arcs.
    pub fn total_arcs(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// The start state, if any.
    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    /// Sets the start state.
    pub fn set_start(&mut self, state: StateId) {
        debug_assert!(index(state) < self.states.len(), "start {state} out of range");
        self.start = Some(state);
        self.invalidate();
    }

    /// Iterates over all state ids in order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + use<> {
        (0..self.states.len()).map(|i| i as StateId)
    }

    /// Adds a non-final state without arcs.
    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State::default());
        self.invalidate();
        id
    }

    /// Adds `count` states.
    pub fn add_states(&mut self, count: usize) {
        self.states
            .resize_with(self.states.len() + count, State::default);
        self.invalidate();
    }

    /// Appends an arc to `state`.
    pub fn add_arc(&mut self, state: StateId, arc: Transition) {
        debug_assert!(
            index(arc.next) < self.states.len(),
            "arc target {} out of range",
            arc.next
        );
        self.states[index(state)].transitions.push(arc);
        self.invalidate();
    }

    /// Appends an acceptor arc over `range`.
    pub fn add_range(&mut self, state: StateId, range: IntervalLabel, next: StateId) {
        self.add_arc(state, Transition::range(range, next));
    }

    /// Marks `state` final (weight one) or non-final.
    pub fn set_final(&mut self, state: StateId, is_final: bool) {
        self.set_final_weight(state, BooleanWeight::from(is_final));
    }

    /// Sets the final weight of `state`.
    pub fn set_final_weight(&mut self, state: StateId, weight: BooleanWeight) {
        self.states[index(state)].final_weight = weight;
        self.invalidate();
    }

    /// Final weight of `state`; `Rejecting` for non-final states.
    pub fn final_weight(&self, state: StateId) -> BooleanWeight {
        self.states[index(state)].final_weight
    }

    /// Whether `state` is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_weight(state).is_accepting()
    }

    /// Arcs leaving `state`, in stored order.
    pub fn transitions(&self, state: StateId) -> &[Transition] {
        &self.states[index(state)].transitions
    }

    /// Removes and returns the arcs leaving `state`.
    pub fn take_transitions(&mut self, state: StateId) -> Vec<Transition> {
        self.invalidate();
        std::mem::take(&mut self.states[index(state)].transitions)
    }

    /// Sorts the arcs of one state by input label (ties by output label, then target).
    pub fn sort_state(&mut self, state: StateId) {
        self.states[index(state)]
            .transitions
            .sort_unstable_by_key(|a| (a.ilabel, a.olabel, a.next));
        self.invalidate();
    }

    /// Sorts the arcs of every state by input label.
    pub fn sort_arcs(&mut self) {
        for state in &mut self.states {
            state
                .transitions
                .sort_unstable_by_key(|a| (a.ilabel, a.olabel, a.next));
        }
        self.invalidate();
        self.properties |= Properties::I_LABEL_SORTED;
    }

    /// Removes all states.
    pub fn clear(&mut self) {
        self.states.clear();
        self.start = None;
        self.properties = Properties::EMPTY;
    }

    /// Returns property bits selected by `mask`.
    ///
    /// With `compute` the bits are derived from the current arcs; otherwise only bits that are
    /// already known are returned. The error bit is always reported.
    pub fn properties(&self, mask: Properties, compute: bool) -> Properties {
        let known = self.properties & (mask | Properties::ERROR);
        if compute {
            compute_properties(self, mask) | known
        } else {
            known
        }
    }

    /// Records known property bits: bits in `mask` are replaced by those in `props`.
    pub fn set_properties(&mut self, props: Properties, mask: Properties) {
        self.properties = (self.properties & !mask) | (props & mask);
    }

    /// Drops every known property except the error bit.
    fn invalidate(&mut self) {
        self.properties &= Properties::ERROR;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `0 -[a]-> 1 -[b-c]-> 2(final)`.
    fn small() -> Automaton {
        let mut fst = Automaton::new();
        fst.add_states(3);
        fst.set_start(0);
        fst.add_range(0, IntervalLabel::scalar(u32::from(b'a')), 1);
        fst.add_range(1, IntervalLabel::new(u32::from(b'b'), u32::from(b'c')), 2);
        fst.set_final(2, true);
        fst
    }

    #[test]
    fn basic_accessors() {
        let fst = small();
        assert_eq!(fst.num_states(), 3);
        assert_eq!(fst.total_arcs(), 2);
        assert_eq!(fst.start(), Some(0));
        assert!(fst.is_final(2));
        assert!(!fst.is_final(0));
        assert_eq!(fst.num_arcs(1), 1);
        assert_eq!(fst.transitions(1)[0].input_range().max, u32::from(b'c'));
    }

    #[test]
    fn empty_automaton() {
        let fst = Automaton::new();
        assert!(fst.is_empty());
        assert_eq!(fst.start(), None);
        assert_eq!(fst.state_ids().count(), 0);
    }

    #[test]
    fn sort_arcs_orders_by_label() {
        let mut fst = Automaton::new();
        fst.add_states(2);
        fst.add_range(0, IntervalLabel::scalar(20), 1);
        fst.add_range(0, IntervalLabel::new(1, 5), 1);
        fst.add_range(0, IntervalLabel::scalar(10), 1);
        fst.sort_arcs();

        let mins: Vec<u32> = fst.transitions(0).iter().map(|a| a.input_range().min).collect();
        assert_eq!(mins, vec![1, 10, 20]);
        assert!(
            fst.properties(Properties::I_LABEL_SORTED, false)
                .contains(Properties::I_LABEL_SORTED)
        );
    }

    #[test]
    fn mutation_invalidates_known_properties() {
        let mut fst = small();
        fst.set_properties(Properties::ACCEPTOR, Properties::ACCEPTOR);
        assert_eq!(
            fst.properties(Properties::ACCEPTOR, false),
            Properties::ACCEPTOR
        );
        fst.add_state();
        assert!(fst.properties(Properties::ACCEPTOR, false).is_empty());
        assert_eq!(
            fst.properties(Properties::ACCEPTOR, true),
            Properties::ACCEPTOR
        );
    }

    #[test]
    fn error_bit_survives_mutation() {
        let mut fst = small();
        fst.set_properties(Properties::ERROR, Properties::ERROR);
        fst.add_state();
        assert!(fst.properties(Properties::EMPTY, false).contains(Properties::ERROR));
    }

    #[test]
    fn clone_is_independent() {
        let fst = small();
        let mut copy = fst.clone();
        copy.set_final(0, true);
        assert!(!fst.is_final(0));
        assert!(copy.is_final(0));
    }
}
