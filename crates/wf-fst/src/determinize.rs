//! Subset-construction determinization over interval labels.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::{
    automaton::{Automaton, StateId},
    error::FstError,
    label::{EPSILON, IntervalLabel},
    properties::Properties,
    weight::{BooleanWeight, union},
};

/// Default bound on the number of states a determinization may create.
pub const DEFAULT_MAX_STATES: usize = 1 << 16;

/// Properties guaranteed for every automaton produced by [`determinize_star`].
pub const DETERMINIZED: Properties = Properties::from_bits(
    Properties::ACCEPTOR.bits()
        | Properties::I_DETERMINISTIC.bits()
        | Properties::O_DETERMINISTIC.bits()
        | Properties::I_LABEL_SORTED.bits()
        | Properties::O_LABEL_SORTED.bits()
        | Properties::NO_EPSILONS.bits()
        | Properties::UNWEIGHTED.bits(),
);

/// Epsilon closure of a set of states, sorted and deduplicated.
fn closure(nfa: &Automaton, seeds: impl IntoIterator<Item = StateId>) -> Vec<StateId> {
    let mut stack: Vec<StateId> = seeds.into_iter().collect();
    let mut seen: Vec<StateId> = Vec::with_capacity(stack.len());
    while let Some(state) = stack.pop() {
        if seen.contains(&state) {
            continue;
        }
        seen.push(state);
        stack.extend(
            nfa.transitions(state)
                .iter()
                .filter(|a| a.ilabel == EPSILON)
                .map(|a| a.next),
        );
    }
    seen.sort_unstable();
    seen
}

/// Splits the non-epsilon arcs leaving `subset` into disjoint intervals, each paired with the
/// sorted set of states it reaches. Adjacent intervals reaching the same set are merged.
fn split_transitions(nfa: &Automaton, subset: &[StateId]) -> Vec<(IntervalLabel, Vec<StateId>)> {
    let arcs: Vec<(IntervalLabel, StateId)> = subset
        .iter()
        .flat_map(|&s| nfa.transitions(s))
        .filter(|a| a.ilabel != EPSILON)
        .map(|a| (a.input_range(), a.next))
        .collect();

    let mut bounds: Vec<u64> = arcs
        .iter()
        .flat_map(|(r, _)| [u64::from(r.min), u64::from(r.max) + 1])
        .collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut out: Vec<(IntervalLabel, Vec<StateId>)> = Vec::new();
    for pair in bounds.windows(2) {
        let (lo, hi) = (pair[0], pair[1] - 1);
        let mut targets: Vec<StateId> = arcs
            .iter()
            .filter(|(r, _)| u64::from(r.min) <= lo && lo <= u64::from(r.max))
            .map(|(_, next)| *next)
            .collect();
        if targets.is_empty() {
            continue;
        }
        targets.sort_unstable();
        targets.dedup();

        if let Some((last, last_targets)) = out.last_mut()
            && u64::from(last.max) + 1 == lo
            && *last_targets == targets
        {
            last.max = hi as u32;
            continue;
        }
        out.push((IntervalLabel::new(lo as u32, hi as u32), targets));
    }
    out
}

/// Determinizes an acceptor that may contain epsilon arcs.
///
/// Arcs are interval-labelled, so overlapping intervals leaving one subset are split into
/// disjoint pieces. The result has no epsilons, its arcs are sorted and pairwise disjoint at
/// every state, and state 0 is the start state. An input without a start state yields an empty
/// automaton.
///
/// Fails with [`FstError::TooManyStates`] when the subset construction would need more than
/// `max_states` states, and with [`FstError::NotAcceptor`] for transducers.
pub fn determinize_star(nfa: &Automaton, max_states: usize) -> Result<Automaton, FstError> {
    if !nfa
        .properties(Properties::ACCEPTOR, true)
        .contains(Properties::ACCEPTOR)
    {
        return Err(FstError::NotAcceptor);
    }

    let mut dfa = Automaton::new();
    let Some(start) = nfa.start() else {
        return Ok(dfa);
    };

    let mut ids: HashMap<Vec<StateId>, StateId> = HashMap::new();
    let mut queue: VecDeque<(StateId, Vec<StateId>)> = VecDeque::new();

    let start_set = closure(nfa, [start]);
    let start_id = dfa.add_state();
    dfa.set_start(start_id);
    ids.insert(start_set.clone(), start_id);
    queue.push_back((start_id, start_set));

    while let Some((id, subset)) = queue.pop_front() {
        let weight = subset
            .iter()
            .fold(BooleanWeight::zero(), |w, &s| union(w, nfa.final_weight(s)));
        dfa.set_final_weight(id, weight);

        for (range, targets) in split_transitions(nfa, &subset) {
            let targets = closure(nfa, targets);
            let next = match ids.get(&targets) {
                Some(&next) => next,
                None => {
                    if dfa.num_states() >= max_states {
                        debug!(
                            "determinization stopped at {} states (limit {max_states})",
                            dfa.num_states()
                        );
                        return Err(FstError::TooManyStates { limit: max_states });
                    }
                    let next = dfa.add_state();
                    ids.insert(targets.clone(), next);
                    queue.push_back((next, targets));
                    next
                }
            };
            dfa.add_range(id, range, next);
        }
    }

    dfa.set_properties(DETERMINIZED, Properties::ALL);
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Transition, properties::compute_properties};

    /// Runs a deterministic automaton over scalar labels.
    fn run(dfa: &Automaton, input: &[u32]) -> bool {
        let Some(mut state) = dfa.start() else {
            return false;
        };
        for &c in input {
            let Some(arc) = dfa
                .transitions(state)
                .iter()
                .find(|a| a.input_range().contains(i64::from(c)))
            else {
                return false;
            };
            state = arc.next;
        }
        dfa.is_final(state)
    }

    #[test]
    fn splits_overlapping_ranges() {
        // 0 -[1-100]-> 1, 0 -[50]-> 2, both final
        let mut nfa = Automaton::new();
        nfa.add_states(3);
        nfa.set_start(0);
        nfa.add_range(0, IntervalLabel::new(1, 100), 1);
        nfa.add_range(0, IntervalLabel::scalar(50), 2);
        nfa.add_range(2, IntervalLabel::scalar(7), 2);
        nfa.set_final(1, true);
        nfa.set_final(2, true);

        let dfa = determinize_star(&nfa, DEFAULT_MAX_STATES).unwrap();
        let props = compute_properties(&dfa, Properties::ALL);
        assert!(props.contains(DETERMINIZED));
        assert_eq!(dfa.num_arcs(0), 3);
        assert!(run(&dfa, &[49]));
        assert!(run(&dfa, &[50, 7, 7]));
        assert!(!run(&dfa, &[49, 7]));
        assert!(!run(&dfa, &[101]));
    }

    #[test]
    fn follows_epsilon_closure() {
        // 0 -eps-> 1 -[5]-> 2(final), 0 -[6]-> 2
        let mut nfa = Automaton::new();
        nfa.add_states(3);
        nfa.set_start(0);
        nfa.add_arc(0, Transition::new(EPSILON, EPSILON, BooleanWeight::one(), 1));
        nfa.add_range(1, IntervalLabel::scalar(5), 2);
        nfa.add_range(0, IntervalLabel::scalar(6), 2);
        nfa.set_final(2, true);

        let dfa = determinize_star(&nfa, DEFAULT_MAX_STATES).unwrap();
        assert!(run(&dfa, &[5]));
        assert!(run(&dfa, &[6]));
        assert!(!run(&dfa, &[]));
        assert!(
            compute_properties(&dfa, Properties::NO_EPSILONS).contains(Properties::NO_EPSILONS)
        );
    }

    #[test]
    fn merges_adjacent_ranges_with_same_target() {
        let mut nfa = Automaton::new();
        nfa.add_states(2);
        nfa.set_start(0);
        nfa.add_range(0, IntervalLabel::new(1, 10), 1);
        nfa.add_range(0, IntervalLabel::new(11, 20), 1);
        nfa.set_final(1, true);

        let dfa = determinize_star(&nfa, DEFAULT_MAX_STATES).unwrap();
        assert_eq!(dfa.transitions(0).len(), 1);
        assert_eq!(dfa.transitions(0)[0].input_range(), IntervalLabel::new(1, 20));
    }

    #[test]
    fn state_limit_is_reported() {
        let mut nfa = Automaton::new();
        nfa.add_states(4);
        nfa.set_start(0);
        for s in 0..3 {
            nfa.add_range(s, IntervalLabel::scalar(1), s + 1);
        }
        nfa.set_final(3, true);

        assert_eq!(
            determinize_star(&nfa, 2),
            Err(FstError::TooManyStates { limit: 2 })
        );
    }

    #[test]
    fn rejects_transducers() {
        let mut nfa = Automaton::new();
        nfa.add_states(2);
        nfa.set_start(0);
        nfa.add_arc(0, Transition::new(1, 2, BooleanWeight::one(), 1));
        assert_eq!(
            determinize_star(&nfa, DEFAULT_MAX_STATES),
            Err(FstError::NotAcceptor)
        );
    }

    #[test]
    fn no_start_yields_empty() {
        let mut nfa = Automaton::new();
        nfa.add_state();
        let dfa = determinize_star(&nfa, DEFAULT_MAX_STATES).unwrap();
        assert!(dfa.is_empty());
    }
}
