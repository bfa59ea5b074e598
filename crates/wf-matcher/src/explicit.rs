//! Filter hiding implicit matches.

use wf_fst::{Automaton, BooleanWeight, Label, NO_LABEL, Properties, StateId, Transition};

use crate::{
    error::MatchError,
    matcher::{CopyMode, MatchType, Matcher, MatcherFlags},
};

/// Skips matches whose label on the matched side is [`NO_LABEL`], such as the implicit epsilon
/// self-loop, so callers only see arcs that exist in the automaton.
#[derive(Debug, Clone)]
pub struct Explicit<M> {
    /// Wrapped matcher.
    inner: M,
    /// Side whose label is inspected.
    match_type: MatchType,
}

impl<M: Matcher> Explicit<M> {
    /// Wraps `inner`.
    pub fn new(inner: M) -> Self {
        let match_type = match inner.match_type(false) {
            MatchType::Unknown => inner.match_type(true),
            known => known,
        };
        Self { inner, match_type }
    }

    /// The wrapped matcher.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Advances the inner matcher past implicit matches.
    fn skip_implicit(&mut self) {
        while !self.inner.done() && self.match_type.label(&self.inner.value()) == NO_LABEL {
            self.inner.next();
        }
    }
}

impl<M: Matcher> Matcher for Explicit<M> {
    fn automaton(&self) -> &Automaton {
        self.inner.automaton()
    }

    fn match_type(&self, test: bool) -> MatchType {
        self.inner.match_type(test)
    }

    fn set_state(&mut self, state: StateId) {
        self.inner.set_state(state);
    }

    fn find(&mut self, label: Label) -> bool {
        self.inner.find(label);
        self.skip_implicit();
        !self.inner.done()
    }

    fn done(&self) -> bool {
        self.inner.done()
    }

    fn value(&self) -> Transition {
        self.inner.value()
    }

    fn next(&mut self) {
        self.inner.next();
        self.skip_implicit();
    }

    fn final_weight(&mut self, state: StateId) -> BooleanWeight {
        self.inner.final_weight(state)
    }

    fn priority(&mut self, state: StateId) -> isize {
        self.inner.priority(state)
    }

    fn properties(&self, props: Properties) -> Properties {
        self.inner.properties(props)
    }

    fn flags(&self) -> MatcherFlags {
        self.inner.flags()
    }

    fn error(&self) -> Option<&MatchError> {
        self.inner.error()
    }

    fn copy(&self, mode: CopyMode) -> Self {
        Self {
            inner: self.inner.copy(mode),
            match_type: self.match_type,
        }
    }
}
