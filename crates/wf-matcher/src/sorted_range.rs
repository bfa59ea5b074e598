//! Exact and lower-bound search over a state's sorted interval arcs.

use wf_fst::{
    Automaton, BooleanWeight, IntervalLabel, Label, NO_LABEL, Properties, StateId, Transition,
};

use crate::{
    error::MatchError,
    matcher::{CopyMode, FstHandle, MatchType, Matcher, MatcherFlags, record_error, with_error},
};

/// Matches scalar labels against the interval labels of a state's sorted arcs.
///
/// Labels below the threshold are located with a linear scan that stops at the first interval
/// starting past the label; labels at or above it with a binary search for the leftmost interval
/// whose upper bound reaches the label. Binary search assumes the intervals at a state are
/// disjoint, which holds for deterministic automata. Construction debug-asserts that the
/// automaton is not already known to be nondeterministic on the matched side.
#[derive(Debug, Clone)]
pub struct SortedRangeMatcher<'a> {
    /// Automaton being matched.
    fst: FstHandle<'a>,
    /// Side compared against.
    match_type: MatchType,
    /// Query labels at or above this use binary search.
    threshold: Label,
    /// Current state; `None` until `set_state`.
    state: Option<StateId>,
    /// Cursor into the current state's arcs.
    pos: usize,
    /// Label being searched for.
    match_label: Label,
    /// Whether the implicit epsilon self-loop is the current match.
    current_loop: bool,
    /// `false` after `lower_bound`: iteration then runs to the last arc.
    exact_match: bool,
    /// Sticky error.
    error: Option<MatchError>,
}

impl<'a> SortedRangeMatcher<'a> {
    /// Creates an input-side matcher.
    pub fn new(fst: impl Into<FstHandle<'a>>, threshold: Label) -> Self {
        Self::with_match_type(fst, MatchType::Input, threshold)
    }

    /// Creates a matcher on the given side. Only `Input` and `Output` are supported; anything
    /// else leaves the matcher in the error state with match type `None`.
    pub fn with_match_type(
        fst: impl Into<FstHandle<'a>>,
        match_type: MatchType,
        threshold: Label,
    ) -> Self {
        let fst = fst.into();
        let mut error = None;
        let match_type = match match_type {
            MatchType::Input | MatchType::Output => {
                let (unsorted, nondeterministic) = match match_type {
                    MatchType::Output => (
                        Properties::NOT_O_LABEL_SORTED,
                        Properties::NON_O_DETERMINISTIC,
                    ),
                    _ => (
                        Properties::NOT_I_LABEL_SORTED,
                        Properties::NON_I_DETERMINISTIC,
                    ),
                };
                debug_assert!(
                    !fst.properties(nondeterministic, false)
                        .contains(nondeterministic),
                    "sorted range matcher over a nondeterministic automaton"
                );
                if fst.properties(unsorted, false).contains(unsorted) {
                    record_error(&mut error, MatchError::Unsorted(match_type));
                }
                match_type
            }
            other => {
                record_error(&mut error, MatchError::UnsupportedMatchType(other));
                MatchType::None
            }
        };
        Self {
            fst,
            match_type,
            threshold,
            state: None,
            pos: 0,
            match_label: NO_LABEL,
            current_loop: false,
            exact_match: true,
            error,
        }
    }

    /// The binary search threshold.
    pub fn threshold(&self) -> Label {
        self.threshold
    }

    /// Positions the cursor at the first arc whose interval ends at or after `label` and
    /// disables exact filtering, so iteration visits every remaining arc. Returns the position.
    pub fn lower_bound(&mut self, label: Label) -> usize {
        self.exact_match = false;
        self.current_loop = false;
        if self.error.is_some() {
            self.match_label = NO_LABEL;
            self.pos = self.arcs().len();
            return self.pos;
        }
        self.match_label = label;
        self.search();
        self.pos
    }

    /// Cursor position within the current state's arcs.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Arcs of the current state.
    fn arcs(&self) -> &[Transition] {
        match self.state {
            Some(state) => self.fst.transitions(state),
            None => &[],
        }
    }

    /// Interval of the arc at `pos` on the matched side.
    fn range_at(&self, pos: usize) -> IntervalLabel {
        IntervalLabel::unpack(self.match_type.label(&self.arcs()[pos]))
    }

    /// Positions the cursor for `match_label` and reports an exact hit.
    fn search(&mut self) -> bool {
        if self.match_label >= self.threshold {
            self.binary_search()
        } else {
            self.linear_search()
        }
    }

    /// Scans left to right, stopping once intervals start past the label.
    fn linear_search(&mut self) -> bool {
        let label = self.match_label;
        let n = self.arcs().len();
        self.pos = 0;
        while self.pos < n {
            let range = self.range_at(self.pos);
            if range.contains(label) {
                return true;
            }
            if Label::from(range.min) > label {
                return false;
            }
            self.pos += 1;
        }
        false
    }

    /// Finds the leftmost arc whose upper bound reaches the label.
    fn binary_search(&mut self) -> bool {
        let label = self.match_label;
        let side = self.match_type;
        let arcs = self.arcs();
        let pos =
            arcs.partition_point(|arc| Label::from(IntervalLabel::unpack(side.label(arc)).max) < label);
        let found = pos < arcs.len() && IntervalLabel::unpack(side.label(&arcs[pos])).contains(label);
        self.pos = pos;
        found
    }

    /// Whether the arc at `pos` matches the current label.
    fn matches_at(&self, pos: usize) -> bool {
        self.range_at(pos).contains(self.match_label)
    }
}

impl Matcher for SortedRangeMatcher<'_> {
    fn automaton(&self) -> &Automaton {
        &self.fst
    }

    fn match_type(&self, test: bool) -> MatchType {
        let (sorted, unsorted) = match self.match_type {
            MatchType::Input => (Properties::I_LABEL_SORTED, Properties::NOT_I_LABEL_SORTED),
            MatchType::Output => (Properties::O_LABEL_SORTED, Properties::NOT_O_LABEL_SORTED),
            other => return other,
        };
        let props = self.fst.properties(sorted | unsorted, test);
        if props.contains(sorted) {
            self.match_type
        } else if props.contains(unsorted) {
            MatchType::None
        } else {
            MatchType::Unknown
        }
    }

    fn set_state(&mut self, state: StateId) {
        debug_assert!(
            (state as usize) < self.fst.num_states(),
            "state {state} out of range"
        );
        self.state = Some(state);
        self.pos = 0;
        self.current_loop = false;
        self.exact_match = true;
        self.match_label = NO_LABEL;
    }

    fn find(&mut self, label: Label) -> bool {
        debug_assert!(self.state.is_some(), "find called before set_state");
        self.exact_match = true;
        if self.error.is_some() {
            self.current_loop = false;
            self.match_label = NO_LABEL;
            self.pos = self.arcs().len();
            return false;
        }
        self.current_loop = label == 0;
        self.match_label = if label == NO_LABEL { 0 } else { label };
        self.search() || self.current_loop
    }

    fn done(&self) -> bool {
        if self.current_loop {
            return false;
        }
        if self.pos >= self.arcs().len() {
            return true;
        }
        self.exact_match && !self.matches_at(self.pos)
    }

    fn value(&self) -> Transition {
        match self.state {
            Some(state) if self.current_loop => self.match_type.implicit_loop(state),
            _ => self.arcs()[self.pos],
        }
    }

    fn next(&mut self) {
        if self.current_loop {
            self.current_loop = false;
            return;
        }
        self.pos += 1;
        if self.exact_match {
            // overlapping intervals may leave gaps between matches
            let n = self.arcs().len();
            while self.pos < n
                && !self.matches_at(self.pos)
                && Label::from(self.range_at(self.pos).min) <= self.match_label
            {
                self.pos += 1;
            }
        }
    }

    fn final_weight(&mut self, state: StateId) -> BooleanWeight {
        self.fst.final_weight(state)
    }

    fn priority(&mut self, state: StateId) -> isize {
        self.fst.num_arcs(state) as isize
    }

    fn properties(&self, props: Properties) -> Properties {
        with_error(props, self.error.as_ref())
    }

    fn flags(&self) -> MatcherFlags {
        MatcherFlags::EMPTY
    }

    fn error(&self) -> Option<&MatchError> {
        self.error.as_ref()
    }

    fn copy(&self, mode: CopyMode) -> Self {
        Self {
            fst: self.fst.copy(mode),
            match_type: self.match_type,
            threshold: self.threshold,
            state: None,
            pos: 0,
            match_label: NO_LABEL,
            current_loop: false,
            exact_match: true,
            error: self.error.clone(),
        }
    }
}
