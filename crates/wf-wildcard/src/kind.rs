//! Cheap classification of wildcard patterns.

use std::fmt;

use serde::Serialize;
use wf_fst::utf8::codepoints;

/// Matches any sequence of codepoints, including the empty one.
pub const ANY_STRING: char = '%';
/// Matches exactly one codepoint.
pub const ANY_CHAR: char = '_';
/// Makes the following codepoint literal.
pub const ESCAPE: char = '\\';

/// The shape of a wildcard pattern, as far as query planning is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardKind {
    /// Malformed UTF-8 or a codepoint outside the alphabet.
    Invalid,
    /// A literal term without escapes.
    Term,
    /// A literal term written with at least one escape.
    TermEscaped,
    /// Only `%`: matches every string.
    MatchAll,
    /// A literal prefix followed by a run of `%`.
    Prefix,
    /// A prefix written with at least one escape.
    PrefixEscaped,
    /// Anything else; needs a compiled automaton.
    Wildcard,
}

impl WildcardKind {
    /// Short lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Term => "term",
            Self::TermEscaped => "term_escaped",
            Self::MatchAll => "match_all",
            Self::Prefix => "prefix",
            Self::PrefixEscaped => "prefix_escaped",
            Self::Wildcard => "wildcard",
        }
    }

    /// Whether the pattern denotes a single literal term.
    pub fn is_term(self) -> bool {
        matches!(self, Self::Term | Self::TermEscaped)
    }

    /// Whether the pattern denotes a literal prefix.
    pub fn is_prefix(self) -> bool {
        matches!(self, Self::Prefix | Self::PrefixEscaped)
    }
}

impl fmt::Display for WildcardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `pattern` without building an automaton.
///
/// The scan walks codepoints and stops early on malformed UTF-8, on U+0000 and on the first
/// unescaped `_`. A trailing lone `\` is a literal backslash.
pub fn classify(pattern: &[u8]) -> WildcardKind {
    let mut escaped = false;
    let mut seen_escaped = false;
    let mut num_chars = 0usize;
    let mut num_match_any_string = 0usize;
    let mut num_adjacent_match_any_string = 0usize;

    for item in codepoints(pattern) {
        let Ok((_, ch)) = item else {
            return WildcardKind::Invalid;
        };
        if ch == '\0' {
            return WildcardKind::Invalid;
        }
        num_chars += 1;

        escaped = match (ch, escaped) {
            (ANY_STRING, false) => {
                num_match_any_string += 1;
                num_adjacent_match_any_string += 1;
                false
            }
            (ANY_CHAR, false) => return WildcardKind::Wildcard,
            (ESCAPE, false) => {
                num_adjacent_match_any_string = 0;
                true
            }
            (_, true) => {
                seen_escaped = true;
                num_adjacent_match_any_string = 0;
                false
            }
            (_, false) => {
                num_adjacent_match_any_string = 0;
                false
            }
        };
    }

    if num_match_any_string == 0 {
        if seen_escaped {
            WildcardKind::TermEscaped
        } else {
            WildcardKind::Term
        }
    } else if num_match_any_string == num_chars {
        WildcardKind::MatchAll
    } else if num_match_any_string == num_adjacent_match_any_string {
        if seen_escaped {
            WildcardKind::PrefixEscaped
        } else {
            WildcardKind::Prefix
        }
    } else {
        WildcardKind::Wildcard
    }
}
