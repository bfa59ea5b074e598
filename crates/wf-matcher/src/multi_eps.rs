//! Extra non-consuming labels.

use std::{
    collections::BTreeSet,
    ops::{BitOr, BitOrAssign, Bound},
};

use wf_fst::{Automaton, BooleanWeight, EPSILON, Label, NO_LABEL, Properties, StateId, Transition};

use crate::{
    error::MatchError,
    matcher::{CopyMode, MatchType, Matcher, MatcherFlags, record_error, with_error},
};

/// Behaviour switches for [`MultiEps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MultiEpsFlags(u8);

impl MultiEpsFlags {
    /// No switches.
    pub const EMPTY: Self = Self(0);
    /// `find(label)` for a configured label returns an implicit self-loop.
    pub const LOOP: Self = Self(1);
    /// `find(NO_LABEL)` also returns arcs of every configured label.
    pub const LIST: Self = Self(2);

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MultiEpsFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MultiEpsFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Where a `find(NO_LABEL)` enumeration stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Not enumerating configured labels.
    Off,
    /// Returning the arcs of this configured label.
    Label(Label),
    /// Configured labels are exhausted; returning real epsilon arcs.
    Epsilons,
}

/// Treats a configured set of labels as non-consuming, in addition to epsilon.
///
/// With [`MultiEpsFlags::LIST`], `find(NO_LABEL)` yields the arcs of each configured label that
/// matches at the current state, one label at a time in ascending order, followed by the real
/// epsilon arcs. With [`MultiEpsFlags::LOOP`], `find(label)` for a configured label yields a
/// single implicit self-loop.
#[derive(Debug, Clone)]
pub struct MultiEps<M> {
    /// Wrapped matcher.
    inner: M,
    /// Behaviour switches.
    flags: MultiEpsFlags,
    /// Configured non-consuming labels.
    labels: BTreeSet<Label>,
    /// Current state.
    state: Option<StateId>,
    /// Position of a `find(NO_LABEL)` enumeration.
    cursor: Cursor,
    /// Whether the implicit self-loop is the current match.
    current_loop: bool,
    /// Whether matches are exhausted.
    done: bool,
    /// Sticky error.
    error: Option<MatchError>,
}

impl<M: Matcher> MultiEps<M> {
    /// Wraps `inner` with no configured labels.
    pub fn new(inner: M, flags: MultiEpsFlags) -> Self {
        Self {
            inner,
            flags,
            labels: BTreeSet::new(),
            state: None,
            cursor: Cursor::Off,
            current_loop: false,
            done: true,
            error: None,
        }
    }

    /// Wraps `inner` with the given labels.
    pub fn with_labels(
        inner: M,
        flags: MultiEpsFlags,
        labels: impl IntoIterator<Item = Label>,
    ) -> Self {
        let mut matcher = Self::new(inner, flags);
        for label in labels {
            matcher.add_label(label);
        }
        matcher
    }

    /// Adds a non-consuming label. Epsilon and `NO_LABEL` are rejected.
    pub fn add_label(&mut self, label: Label) {
        if label == EPSILON || label == NO_LABEL {
            record_error(&mut self.error, MatchError::ReservedLabel { role: "multi-eps" });
            return;
        }
        self.labels.insert(label);
    }

    /// Removes a non-consuming label.
    pub fn remove_label(&mut self, label: Label) {
        self.labels.remove(&label);
    }

    /// Removes every non-consuming label.
    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    /// Configured labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels.iter().copied()
    }

    /// Finds the first configured label after `after` with a match, falling back to the real
    /// epsilon arcs once the labels run out.
    fn advance(&mut self, after: Bound<Label>) -> bool {
        for &label in self.labels.range((after, Bound::Unbounded)) {
            if self.inner.find(label) {
                self.cursor = Cursor::Label(label);
                return true;
            }
        }
        self.cursor = Cursor::Epsilons;
        self.inner.find(NO_LABEL)
    }
}

impl<M: Matcher> Matcher for MultiEps<M> {
    fn automaton(&self) -> &Automaton {
        self.inner.automaton()
    }

    fn match_type(&self, test: bool) -> MatchType {
        self.inner.match_type(test)
    }

    fn set_state(&mut self, state: StateId) {
        self.state = Some(state);
        self.inner.set_state(state);
        self.cursor = Cursor::Off;
        self.current_loop = false;
        self.done = true;
    }

    fn find(&mut self, label: Label) -> bool {
        self.cursor = Cursor::Off;
        self.current_loop = false;
        let found = if label == EPSILON {
            self.inner.find(EPSILON)
        } else if label == NO_LABEL {
            if self.flags.contains(MultiEpsFlags::LIST) {
                self.advance(Bound::Unbounded)
            } else {
                self.inner.find(NO_LABEL)
            }
        } else if self.flags.contains(MultiEpsFlags::LOOP) && self.labels.contains(&label) {
            self.current_loop = true;
            true
        } else {
            self.inner.find(label)
        };
        self.done = !found;
        found
    }

    fn done(&self) -> bool {
        self.done
    }

    fn value(&self) -> Transition {
        match self.state {
            Some(state) if self.current_loop => self.inner.match_type(false).implicit_loop(state),
            _ => self.inner.value(),
        }
    }

    fn next(&mut self) {
        if self.current_loop {
            self.current_loop = false;
            self.done = true;
            return;
        }
        self.inner.next();
        self.done = self.inner.done();
        if self.done
            && let Cursor::Label(label) = self.cursor
        {
            self.done = !self.advance(Bound::Excluded(label));
        }
    }

    fn final_weight(&mut self, state: StateId) -> BooleanWeight {
        self.inner.final_weight(state)
    }

    fn priority(&mut self, state: StateId) -> isize {
        self.inner.priority(state)
    }

    fn properties(&self, props: Properties) -> Properties {
        with_error(self.inner.properties(props), self.error.as_ref())
    }

    fn flags(&self) -> MatcherFlags {
        self.inner.flags()
    }

    fn error(&self) -> Option<&MatchError> {
        self.error.as_ref().or_else(|| self.inner.error())
    }

    fn copy(&self, mode: CopyMode) -> Self {
        Self {
            inner: self.inner.copy(mode),
            flags: self.flags,
            labels: self.labels.clone(),
            state: None,
            cursor: Cursor::Off,
            current_loop: false,
            done: true,
            error: self.error.clone(),
        }
    }
}
