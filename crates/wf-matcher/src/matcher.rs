//! The matcher interface shared by every matcher in this crate.

use std::{
    fmt,
    ops::{BitOr, Deref},
    ptr,
    sync::Arc,
};

use log::error;
use wf_fst::{Automaton, BooleanWeight, Label, NO_LABEL, Properties, StateId, Transition};

use crate::error::MatchError;

/// Priority value meaning "this side must drive the composition".
pub const REQUIRE_PRIORITY: isize = -1;

/// Which label of an arc a matcher compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Input labels.
    Input,
    /// Output labels.
    Output,
    /// Both labels; not supported by the sorted matchers.
    Both,
    /// No matching is possible.
    None,
    /// Sortedness could not be determined without computing properties.
    Unknown,
}

impl MatchType {
    /// The label of `arc` on this side. `Output` reads the output label; every other type the
    /// input label.
    pub fn label(self, arc: &Transition) -> Label {
        match self {
            Self::Output => arc.olabel,
            _ => arc.ilabel,
        }
    }

    /// The implicit epsilon self-loop at `state` as seen from this side.
    pub fn implicit_loop(self, state: StateId) -> Transition {
        match self {
            Self::Output => Transition::new(0, NO_LABEL, BooleanWeight::one(), state),
            _ => Transition::new(NO_LABEL, 0, BooleanWeight::one(), state),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Both => "both",
            Self::None => "none",
            Self::Unknown => "unknown",
        })
    }
}

/// Capability flags reported by a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatcherFlags(u32);

impl MatcherFlags {
    /// No flags.
    pub const EMPTY: Self = Self(0);
    /// Every label must be matched through this matcher; set by the fallback combinators.
    pub const REQUIRE_MATCH: Self = Self(1);

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MatcherFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// How [`Matcher::copy`] treats the underlying automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// The copy reads the same automaton storage. Cheap; for reuse on one thread.
    Alias,
    /// The copy owns a fresh deep copy of the automaton.
    Deep,
}

/// Access to the automaton a matcher walks: a borrow or shared ownership.
#[derive(Debug, Clone)]
pub enum FstHandle<'a> {
    /// Borrowed from the caller.
    Borrowed(&'a Automaton),
    /// Owned jointly by matchers that aliased one another.
    Shared(Arc<Automaton>),
}

impl FstHandle<'_> {
    /// Returns a handle for a matcher copy made in `mode`.
    pub fn copy(&self, mode: CopyMode) -> Self {
        match mode {
            CopyMode::Alias => self.clone(),
            CopyMode::Deep => Self::Shared(Arc::new(Automaton::clone(self))),
        }
    }

    /// Whether two handles read the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ptr::eq::<Automaton>(&**self, &**other)
    }
}

impl Deref for FstHandle<'_> {
    type Target = Automaton;

    fn deref(&self) -> &Automaton {
        match self {
            Self::Borrowed(fst) => *fst,
            Self::Shared(fst) => fst.as_ref(),
        }
    }
}

impl<'a> From<&'a Automaton> for FstHandle<'a> {
    fn from(fst: &'a Automaton) -> Self {
        Self::Borrowed(fst)
    }
}

impl From<Arc<Automaton>> for FstHandle<'_> {
    fn from(fst: Arc<Automaton>) -> Self {
        Self::Shared(fst)
    }
}

impl From<Automaton> for FstHandle<'_> {
    fn from(fst: Automaton) -> Self {
        Self::Shared(Arc::new(fst))
    }
}

/// A cursor over the arcs of one automaton state that match a label.
///
/// Usage: [`set_state`](Matcher::set_state), then [`find`](Matcher::find), then iterate with
/// [`done`](Matcher::done), [`value`](Matcher::value) and [`next`](Matcher::next). Query labels
/// are scalars; arcs carry packed intervals and match when their interval contains the label.
/// Label 0 asks for epsilon arcs plus the implicit epsilon self-loop; [`NO_LABEL`] asks for
/// epsilon arcs only.
///
/// Errors never interrupt iteration. A matcher that detects misuse records it, logs it once and
/// reports it through [`error`](Matcher::error) and the [`Properties::ERROR`] bit from then on.
pub trait Matcher {
    /// The automaton being matched.
    fn automaton(&self) -> &Automaton;

    /// The side this matcher matches on. With `test`, sortedness is computed if unknown.
    fn match_type(&self, test: bool) -> MatchType;

    /// Positions the matcher at `state`.
    fn set_state(&mut self, state: StateId);

    /// Looks for arcs matching `label` at the current state.
    fn find(&mut self, label: Label) -> bool;

    /// Whether the current matches are exhausted.
    fn done(&self) -> bool;

    /// The current match. Only meaningful while not [`done`](Matcher::done).
    fn value(&self) -> Transition;

    /// Advances to the next match.
    fn next(&mut self);

    /// Final weight of `state`.
    fn final_weight(&mut self, state: StateId) -> BooleanWeight;

    /// Hint for composition: the number of arcs at `state`, or [`REQUIRE_PRIORITY`].
    fn priority(&mut self, state: StateId) -> isize;

    /// Properties of the matched automaton as seen through this matcher, given `props` of the
    /// underlying automaton.
    fn properties(&self, props: Properties) -> Properties;

    /// Capability flags.
    fn flags(&self) -> MatcherFlags;

    /// The sticky error, if any.
    fn error(&self) -> Option<&MatchError>;

    /// Copies the matcher, sharing or duplicating the automaton as `mode` says. The copy starts
    /// without a current state.
    fn copy(&self, mode: CopyMode) -> Self
    where
        Self: Sized;
}

/// Fail-fast access to [`Matcher::find`].
pub trait TryMatcher: Matcher {
    /// Like [`Matcher::find`], but returns the sticky error instead of a plain `false`.
    fn try_find(&mut self, label: Label) -> Result<bool, MatchError>;
}

impl<M: Matcher + ?Sized> TryMatcher for M {
    fn try_find(&mut self, label: Label) -> Result<bool, MatchError> {
        let found = self.find(label);
        match self.error() {
            Some(err) => Err(err.clone()),
            None => Ok(found),
        }
    }
}

/// Stores `err` unless an earlier error is already recorded.
pub fn record_error(slot: &mut Option<MatchError>, err: MatchError) {
    if slot.is_none() {
        error!("matcher error: {err}");
        *slot = Some(err);
    }
}

/// Adds the error bit to `props` when `err` is set.
pub fn with_error(props: Properties, err: Option<&MatchError>) -> Properties {
    if err.is_some() {
        props | Properties::ERROR
    } else {
        props
    }
}
