//! Concatenation.

use crate::{
    automaton::{Automaton, StateId, Transition},
    weight::intersect,
};

/// Prepends `prefix` to `suffix`, leaving in `suffix` an automaton for `L(prefix) · L(suffix)`.
///
/// No epsilon arcs are introduced: every final state of the copied prefix receives the arcs of
/// the suffix start state and inherits its finality. The work is linear in the size of `prefix`
/// (plus the suffix start fan-out per prefix final state), so building a concatenation of many
/// fragments by repeated prepending stays linear overall.
///
/// If either operand has no start state the result accepts nothing.
pub fn concat(prefix: &Automaton, suffix: &mut Automaton) {
    let (Some(prefix_start), Some(suffix_start)) = (prefix.start(), suffix.start()) else {
        suffix.clear();
        return;
    };

    let offset = suffix.num_states() as StateId;
    let entry: Vec<Transition> = suffix.transitions(suffix_start).to_vec();
    let entry_weight = suffix.final_weight(suffix_start);

    // arcs of the copy may point forward, so every target must exist first
    suffix.add_states(prefix.num_states());
    for state in prefix.state_ids() {
        let copy = state + offset;
        for arc in prefix.transitions(state) {
            suffix.add_arc(
                copy,
                Transition {
                    next: arc.next + offset,
                    ..*arc
                },
            );
        }

        let weight = prefix.final_weight(state);
        if weight.is_accepting() {
            for arc in &entry {
                suffix.add_arc(
                    copy,
                    Transition {
                        weight: intersect(weight, arc.weight),
                        ..*arc
                    },
                );
            }
            suffix.set_final_weight(copy, intersect(weight, entry_weight));
            suffix.sort_state(copy);
        }
    }

    suffix.set_start(prefix_start + offset);
}
