//! Rho ("the rest") matching.

use wf_fst::{Automaton, BooleanWeight, EPSILON, Label, NO_LABEL, Properties, StateId, Transition};

use crate::{
    error::MatchError,
    matcher::{
        CopyMode, MatchType, Matcher, MatcherFlags, REQUIRE_PRIORITY, record_error, with_error,
    },
    rewrite::{RewriteMode, Rewriter},
};

/// Treats arcs carrying `rho_label` as matching every label without an explicit arc.
///
/// Unlike [`Sigma`](crate::Sigma), the rho arc is offered only when the direct search fails.
#[derive(Debug, Clone)]
pub struct Rho<M> {
    /// Wrapped matcher.
    inner: M,
    /// The rho label, or [`NO_LABEL`] when disabled.
    rho_label: Label,
    /// Rewrites the rho arc.
    rewriter: Rewriter,
    /// Side matched on.
    match_type: MatchType,
    /// Current state.
    state: Option<StateId>,
    /// Whether the current state has a rho arc.
    has_rho: bool,
    /// The label the current rho arc stands in for, or `NO_LABEL` for direct matches.
    rho_match: Label,
    /// Sticky error.
    error: Option<MatchError>,
}

impl<M: Matcher> Rho<M> {
    /// Wraps `inner`. A `rho_label` of 0 is rejected: the matcher enters the error state and
    /// behaves like `inner`.
    pub fn new(inner: M, rho_label: Label, mode: RewriteMode) -> Self {
        let mut error = None;
        let mut match_type = inner.match_type(false);
        if match_type == MatchType::Unknown {
            match_type = inner.match_type(true);
        }
        if match_type == MatchType::Both {
            record_error(&mut error, MatchError::UnsupportedMatchType(match_type));
            match_type = MatchType::None;
        }
        let rho_label = if rho_label == EPSILON {
            record_error(&mut error, MatchError::ReservedLabel { role: "rho" });
            NO_LABEL
        } else {
            rho_label
        };
        let rewriter = Rewriter::new(inner.automaton(), rho_label, mode, match_type);
        Self {
            inner,
            rho_label,
            rewriter,
            match_type,
            state: None,
            has_rho: false,
            rho_match: NO_LABEL,
            error,
        }
    }

    /// The configured rho label.
    pub fn rho_label(&self) -> Label {
        self.rho_label
    }
}

impl<M: Matcher> Matcher for Rho<M> {
    fn automaton(&self) -> &Automaton {
        self.inner.automaton()
    }

    fn match_type(&self, test: bool) -> MatchType {
        self.inner.match_type(test)
    }

    fn set_state(&mut self, state: StateId) {
        if self.state == Some(state) {
            return;
        }
        self.state = Some(state);
        self.inner.set_state(state);
        self.has_rho = self.rho_label != NO_LABEL && self.inner.find(self.rho_label);
    }

    fn find(&mut self, label: Label) -> bool {
        if self.rho_label != NO_LABEL && label == self.rho_label {
            record_error(
                &mut self.error,
                MatchError::SpecialLabelQuery { role: "rho", label },
            );
            return false;
        }
        if self.inner.find(label) {
            self.rho_match = NO_LABEL;
            true
        } else if self.has_rho
            && label != EPSILON
            && label != NO_LABEL
            && self.inner.find(self.rho_label)
        {
            self.rho_match = label;
            true
        } else {
            false
        }
    }

    fn done(&self) -> bool {
        self.inner.done()
    }

    fn value(&self) -> Transition {
        let arc = self.inner.value();
        if self.rho_match == NO_LABEL {
            arc
        } else {
            self.rewriter.apply(arc, self.rho_match)
        }
    }

    fn next(&mut self) {
        self.inner.next();
    }

    fn final_weight(&mut self, state: StateId) -> BooleanWeight {
        self.inner.final_weight(state)
    }

    fn priority(&mut self, state: StateId) -> isize {
        if self.rho_label == NO_LABEL {
            return self.inner.priority(state);
        }
        self.set_state(state);
        if self.has_rho {
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
        if self.rho_label == NO_LABEL || self.match_type == MatchType::None {
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
            rho_label: self.rho_label,
            rewriter: self.rewriter,
            match_type: self.match_type,
            state: None,
            has_rho: false,
            rho_match: NO_LABEL,
            error: self.error.clone(),
        }
    }
}
