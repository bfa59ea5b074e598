//! Sigma ("any symbol") matching.

use wf_fst::{Automaton, BooleanWeight, EPSILON, Label, NO_LABEL, Properties, StateId, Transition};

use crate::{
    error::MatchError,
    matcher::{
        CopyMode, MatchType, Matcher, MatcherFlags, REQUIRE_PRIORITY, record_error, with_error,
    },
    rewrite::{RewriteMode, Rewriter},
};

/// Treats arcs carrying `sigma_label` as matching any label.
///
/// Real matches come first; afterwards, for non-epsilon labels, the sigma arc is offered once
/// more, rewritten to the requested label. When no real match exists the sigma arc is the only
/// match.
#[derive(Debug, Clone)]
pub struct Sigma<M> {
    /// Wrapped matcher.
    inner: M,
    /// The sigma label, or [`NO_LABEL`] when disabled.
    sigma_label: Label,
    /// Rewrites the sigma arc.
    rewriter: Rewriter,
    /// Side matched on, `None` after a construction error.
    match_type: MatchType,
    /// Current state.
    state: Option<StateId>,
    /// Whether the current state has a sigma arc.
    has_sigma: bool,
    /// Label requested by the last `find`.
    match_label: Label,
    /// The label the current sigma arc stands in for, or `NO_LABEL` for real matches.
    sigma_match: Label,
    /// Sticky error.
    error: Option<MatchError>,
}

impl<M: Matcher> Sigma<M> {
    /// Wraps `inner`. A `sigma_label` of 0 is rejected: the matcher enters the error state and
    /// behaves like `inner`.
    pub fn new(inner: M, sigma_label: Label, mode: RewriteMode) -> Self {
        let mut error = None;
        let mut match_type = inner.match_type(false);
        if match_type == MatchType::Unknown {
            match_type = inner.match_type(true);
        }
        if match_type == MatchType::Both {
            record_error(&mut error, MatchError::UnsupportedMatchType(match_type));
            match_type = MatchType::None;
        }
        let sigma_label = if sigma_label == EPSILON {
            record_error(&mut error, MatchError::ReservedLabel { role: "sigma" });
            NO_LABEL
        } else {
            sigma_label
        };
        let rewriter = Rewriter::new(inner.automaton(), sigma_label, mode, match_type);
        Self {
            inner,
            sigma_label,
            rewriter,
            match_type,
            state: None,
            has_sigma: false,
            match_label: NO_LABEL,
            sigma_match: NO_LABEL,
            error,
        }
    }

    /// The configured sigma label.
    pub fn sigma_label(&self) -> Label {
        self.sigma_label
    }
}

impl<M: Matcher> Matcher for Sigma<M> {
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
        self.has_sigma = self.sigma_label != NO_LABEL && self.inner.find(self.sigma_label);
    }

    fn find(&mut self, label: Label) -> bool {
        self.match_label = label;
        if self.sigma_label != NO_LABEL && label == self.sigma_label {
            record_error(
                &mut self.error,
                MatchError::SpecialLabelQuery {
                    role: "sigma",
                    label,
                },
            );
            return false;
        }
        if self.inner.find(label) {
            self.sigma_match = NO_LABEL;
            true
        } else if self.has_sigma
            && label != EPSILON
            && label != NO_LABEL
            && self.inner.find(self.sigma_label)
        {
            self.sigma_match = label;
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
        if self.sigma_match == NO_LABEL {
            arc
        } else {
            self.rewriter.apply(arc, self.sigma_match)
        }
    }

    fn next(&mut self) {
        self.inner.next();
        if self.inner.done()
            && self.has_sigma
            && self.sigma_match == NO_LABEL
            && self.match_label > 0
        {
            self.inner.find(self.sigma_label);
            self.sigma_match = self.match_label;
        }
    }

    fn final_weight(&mut self, state: StateId) -> BooleanWeight {
        self.inner.final_weight(state)
    }

    fn priority(&mut self, state: StateId) -> isize {
        if self.sigma_label == NO_LABEL {
            return self.inner.priority(state);
        }
        self.set_state(state);
        if self.has_sigma {
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
        if self.sigma_label == NO_LABEL || self.match_type == MatchType::None {
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
            sigma_label: self.sigma_label,
            rewriter: self.rewriter,
            match_type: self.match_type,
            state: None,
            has_sigma: false,
            match_label: NO_LABEL,
            sigma_match: NO_LABEL,
            error: self.error.clone(),
        }
    }
}
