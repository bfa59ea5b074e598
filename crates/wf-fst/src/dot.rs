//! Graphviz rendering.

use crate::{automaton::Automaton, label::display_label};

/// Renders `fst` in Graphviz `dot` syntax.
///
/// Final states are drawn as double circles; the start state gets a bold outline. Acceptor arcs
/// show a single label, transducer arcs show `ilabel:olabel`.
pub fn to_dot(fst: &Automaton) -> String {
    let mut out = String::from("digraph automaton {\n  rankdir = LR;\n");
    for state in fst.state_ids() {
        let shape = if fst.is_final(state) {
            "doublecircle"
        } else {
            "circle"
        };
        let style = if fst.start() == Some(state) {
            ", style = bold"
        } else {
            ""
        };
        out.push_str(&format!("  {state} [shape = {shape}{style}];\n"));
    }
    for state in fst.state_ids() {
        for arc in fst.transitions(state) {
            let label = if arc.ilabel == arc.olabel {
                display_label(arc.ilabel)
            } else {
                format!("{}:{}", display_label(arc.ilabel), display_label(arc.olabel))
            };
            out.push_str(&format!(
                "  {state} -> {} [label = \"{label}\"];\n",
                arc.next
            ));
        }
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::IntervalLabel;

    #[test]
    fn renders_states_and_arcs() {
        let mut fst = Automaton::new();
        fst.add_states(2);
        fst.set_start(0);
        fst.add_range(0, IntervalLabel::new(0x61, 0x62), 1);
        fst.set_final(1, true);

        let dot = to_dot(&fst);
        assert!(dot.starts_with("digraph automaton {"));
        assert!(dot.contains("0 [shape = circle, style = bold];"));
        assert!(dot.contains("1 [shape = doublecircle];"));
        assert!(dot.contains("0 -> 1 [label = \"0x61-0x62\"];"));
    }
}
