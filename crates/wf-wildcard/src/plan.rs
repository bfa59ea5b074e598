//! Query preparation: picks the cheapest evaluation strategy for a pattern.

use log::debug;
use wf_fst::Automaton;
use wf_matcher::accept;

use crate::{
    compile::{CompileOptions, try_compile},
    kind::{WildcardKind, classify},
};

/// Returns the unescaped literal text before the first unescaped `%` or `_`.
///
/// For `Term` and `Prefix` patterns this is the term or prefix itself. Operates on bytes, which
/// is safe because the wildcard syntax is ASCII and never appears inside a multi-byte sequence.
pub fn literal_prefix(pattern: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pattern.len());
    let mut escaped = false;
    for &b in pattern {
        match (b, escaped) {
            (b'\\', false) => {
                escaped = true;
                continue;
            }
            (b'%' | b'_', false) => return out,
            _ => out.push(b),
        }
        escaped = false;
    }
    if escaped {
        out.push(b'\\');
    }
    out
}

/// How a wildcard query should be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardPlan {
    /// The pattern matches nothing.
    Invalid,
    /// Exact lookup of one term.
    Term(Vec<u8>),
    /// Range scan over terms with this prefix.
    Prefix(Vec<u8>),
    /// Every term matches.
    MatchAll,
    /// Intersection with a compiled automaton.
    Automaton(Automaton),
}

impl WildcardPlan {
    /// Classifies `pattern` and compiles it only when no cheaper strategy applies.
    pub fn prepare(pattern: &[u8], options: &CompileOptions) -> Self {
        match classify(pattern) {
            WildcardKind::Invalid => Self::Invalid,
            WildcardKind::Term | WildcardKind::TermEscaped => Self::Term(literal_prefix(pattern)),
            WildcardKind::MatchAll => Self::MatchAll,
            WildcardKind::Prefix | WildcardKind::PrefixEscaped => {
                Self::Prefix(literal_prefix(pattern))
            }
            WildcardKind::Wildcard => match try_compile(pattern, options) {
                Ok(fst) => Self::Automaton(fst),
                Err(err) => {
                    debug!("wildcard plan falls back to invalid: {err}");
                    Self::Invalid
                }
            },
        }
    }

    /// Short name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Term(_) => "term",
            Self::Prefix(_) => "prefix",
            Self::MatchAll => "match_all",
            Self::Automaton(_) => "automaton",
        }
    }

    /// Whether `term` is matched under this plan.
    pub fn matches(&self, term: &[u8]) -> bool {
        match self {
            Self::Invalid => false,
            Self::Term(expected) => expected == term,
            Self::Prefix(prefix) => term.starts_with(prefix),
            Self::MatchAll => true,
            Self::Automaton(fst) => accept(fst, term),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_extraction() {
        assert_eq!(literal_prefix(b"foo%"), b"foo");
        assert_eq!(literal_prefix(br"f\%o%%"), b"f%o");
        assert_eq!(literal_prefix(br"a\\"), br"a\");
        assert_eq!(literal_prefix(br"a\"), br"a\");
        assert_eq!(literal_prefix(b"ab_c"), b"ab");
        assert_eq!(literal_prefix(b"%x"), b"");
        assert_eq!(literal_prefix("é%".as_bytes()), "é".as_bytes());
    }

    #[test]
    fn plans_follow_classification() {
        let options = CompileOptions::default();
        assert_eq!(
            WildcardPlan::prepare(br"a\_b", &options),
            WildcardPlan::Term(b"a_b".to_vec())
        );
        assert_eq!(
            WildcardPlan::prepare(b"ab%%", &options),
            WildcardPlan::Prefix(b"ab".to_vec())
        );
        assert_eq!(WildcardPlan::prepare(b"%%", &options), WildcardPlan::MatchAll);
        assert_eq!(WildcardPlan::prepare(&[0xFF], &options), WildcardPlan::Invalid);
        assert_eq!(WildcardPlan::prepare(b"a_", &options).name(), "automaton");
    }

    #[test]
    fn plan_membership() {
        let options = CompileOptions::default();
        let prefix = WildcardPlan::prepare(b"ab%", &options);
        assert!(prefix.matches(b"ab"));
        assert!(prefix.matches(b"abc"));
        assert!(!prefix.matches(b"a"));

        let fst = WildcardPlan::prepare(b"%b_", &options);
        assert!(fst.matches(b"abc"));
        assert!(fst.matches("bé".as_bytes()));
        assert!(!fst.matches(b"ab"));

        assert!(!WildcardPlan::Invalid.matches(b""));
        assert!(WildcardPlan::MatchAll.matches(b""));
    }

    #[test]
    fn plan_compile_failure_is_invalid() {
        let options = CompileOptions { max_states: 1 };
        assert_eq!(WildcardPlan::prepare(b"a_", &options), WildcardPlan::Invalid);
    }
}
