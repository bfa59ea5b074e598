//! Phi (failure transition) matching.

use wf_fst::{
    Automaton, BooleanWeight, EPSILON, Label, NO_LABEL, Properties, StateId, Transition,
    intersect,
};

use crate::{
    error::MatchError,
    matcher::{
        CopyMode, MatchType, Matcher, MatcherFlags, REQUIRE_PRIORITY, record_error, with_error,
    },
    rewrite::{RewriteMode, Rewriter},
};

/// Follows arcs carrying `phi_label` whenever a label has no direct match, retrying at the
/// destination until a match is found or no phi arc is left.
///
/// The caller sees the arc finally matched, with the weights of the traversed phi arcs folded
/// in. In `phi_loop` mode a phi self-loop matches the requested label; otherwise it ends the
/// search without a match, as does a longer phi cycle. Each state may have at most one phi arc.
#[derive(Debug, Clone)]
pub struct Phi<M> {
    /// Wrapped matcher.
    inner: M,
    /// The phi label, or [`NO_LABEL`] when disabled.
    phi_label: Label,
    /// Whether a phi self-loop matches the requested label.
    phi_loop: bool,
    /// Rewrites a matched phi self-loop.
    rewriter: Rewriter,
    /// Side matched on.
    match_type: MatchType,
    /// State the caller positioned the matcher at.
    state: Option<StateId>,
    /// Whether phi arcs are followed at this state.
    has_phi: bool,
    /// Label a matched phi self-loop stands in for, or `NO_LABEL`.
    phi_match: Label,
    /// Product of the weights of the phi arcs followed by the last `find`.
    phi_weight: BooleanWeight,
    /// Sticky error.
    error: Option<MatchError>,
}

impl<M: Matcher> Phi<M> {
    /// Wraps `inner`. A `phi_label` of 0 is rejected: the matcher enters the error state and
    /// behaves like `inner`.
    pub fn new(inner: M, phi_label: Label, phi_loop: bool, mode: RewriteMode) -> Self {
        let mut error = None;
        let mut match_type = inner.match_type(false);
        if match_type == MatchType::Unknown {
            match_type = inner.match_type(true);
        }
        if match_type == MatchType::Both {
            record_error(&mut error, MatchError::UnsupportedMatchType(match_type));
            match_type = MatchType::None;
        }
        let phi_label = if phi_label == EPSILON {
            record_error(&mut error, MatchError::ReservedLabel { role: "phi" });
            NO_LABEL
        } else {
            phi_label
        };
        let rewriter = Rewriter::new(inner.automaton(), phi_label, mode, match_type);
        Self {
            inner,
            phi_label,
            phi_loop,
            rewriter,
            match_type,
            state: None,
            has_phi: false,
            phi_match: NO_LABEL,
            phi_weight: BooleanWeight::one(),
            error,
        }
    }

    /// The configured phi label.
    pub fn phi_label(&self) -> Label {
        self.phi_label
    }
}

impl<M: Matcher> Matcher for Phi<M> {
    fn automaton(&self) -> &Automaton {
        self.inner.automaton()
    }

    fn match_type(&self, test: bool) -> MatchType {
        self.inner.match_type(test)
    }

    fn set_state(&mut self, state: StateId) {
        self.state = Some(state);
        self.inner.set_state(state);
        self.has_phi = self.phi_label != NO_LABEL;
    }

    fn find(&mut self, label: Label) -> bool {
        debug_assert!(self.state.is_some(), "find called before set_state");
        let Some(start) = self.state else {
            return false;
        };
        if self.phi_label != NO_LABEL && label == self.phi_label {
            record_error(
                &mut self.error,
                MatchError::SpecialLabelQuery { role: "phi", label },
            );
            return false;
        }
        self.inner.set_state(start);
        self.phi_match = NO_LABEL;
        self.phi_weight = BooleanWeight::one();

        if !self.has_phi || label == EPSILON || label == NO_LABEL {
            return self.inner.find(label);
        }

        let mut state = start;
        let mut hops = 0;
        while !self.inner.find(label) {
            if !self.inner.find(self.phi_label) {
                return false;
            }
            let phi_arc = self.inner.value();
            if phi_arc.next == state {
                if !self.phi_loop {
                    return false;
                }
                self.phi_match = label;
                return true;
            }
            hops += 1;
            if hops > self.inner.automaton().num_states() {
                // phi cycle without a match
                return false;
            }
            self.phi_weight = intersect(self.phi_weight, phi_arc.weight);
            self.inner.next();
            if !self.inner.done() {
                record_error(&mut self.error, MatchError::NonDeterministicPhi { state });
            }
            state = phi_arc.next;
            self.inner.set_state(state);
        }
        true
    }

    fn done(&self) -> bool {
        self.inner.done()
    }

    fn value(&self) -> Transition {
        let mut arc = self.inner.value();
        if self.phi_match == NO_LABEL && self.phi_weight == BooleanWeight::one() {
            return arc;
        }
        arc.weight = intersect(self.phi_weight, arc.weight);
        if self.phi_match != NO_LABEL {
            arc = self.rewriter.apply(arc, self.phi_match);
        }
        arc
    }

    fn next(&mut self) {
        self.inner.next();
    }

    fn final_weight(&mut self, state: StateId) -> BooleanWeight {
        let weight = self.inner.final_weight(state);
        if self.phi_label == NO_LABEL || weight != BooleanWeight::zero() {
            return weight;
        }

        let mut weight = BooleanWeight::one();
        let mut state = state;
        let mut hops = 0;
        self.inner.set_state(state);
        while self.inner.final_weight(state) == BooleanWeight::zero() {
            if !self.inner.find(self.phi_label) {
                break;
            }
            let phi_arc = self.inner.value();
            weight = intersect(weight, phi_arc.weight);
            hops += 1;
            if phi_arc.next == state || hops > self.inner.automaton().num_states() {
                return BooleanWeight::zero();
            }
            state = phi_arc.next;
            self.inner.set_state(state);
        }
        intersect(weight, self.inner.final_weight(state))
    }

    fn priority(&mut self, state: StateId) -> isize {
        if self.phi_label == NO_LABEL {
            return self.inner.priority(state);
        }
        self.set_state(state);
        if self.has_phi {
            REQUIRE_PRIORITY
        } else {
            self.inner.priority(state)
        }
    }

    fn properties(&self, props: Properties) -> Properties {
        let props = with_error(self.inner.properties(props), self.error.as_ref());
        self.rewriter.properties(props)
    }

    fn flags(&self) -> MatcherFlags {
        if self.phi_label == NO_LABEL || self.match_type == MatchType::None {
            self.inner.flags()
        } else {
            self.inner.flags() | MatcherFlags::REQUIRE_MATCH
        }
    }

    fn error(&self) -> Option<&MatchError> {
        self.error.as_ref().or_else(|| self.inner.error())
    }

    fn copy(&self, mode: CopyMode) -> Self {
        Self {
            inner: self.inner.copy(mode),
            phi_label: self.phi_label,
            phi_loop: self.phi_loop,
            rewriter: self.rewriter,
            match_type: self.match_type,
            state: None,
            has_phi: false,
            phi_match: NO_LABEL,
            phi_weight: BooleanWeight::one(),
            error: self.error.clone(),
        }
    }
}
