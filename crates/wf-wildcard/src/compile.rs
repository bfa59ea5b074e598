//! Wildcard compilation into UTF-8 byte automata.

use log::debug;
use wf_fst::{
    Automaton, DEFAULT_MAX_STATES, DETERMINIZED, Properties, concat, determinize_star,
    utf8::codepoints,
};

use crate::{
    error::CompileError,
    fragment::{make_any_char, make_any_string, make_char, make_empty_string},
    kind::{ANY_CHAR, ANY_STRING, ESCAPE},
};

/// Knobs for [`try_compile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Upper bound on determinized states before compilation gives up.
    pub max_states: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

/// A lexical unit of a wildcard pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Unescaped `%`; runs are collapsed into one.
    AnyString,
    /// Unescaped `_`.
    AnyChar,
    /// Any other codepoint, escaped or not.
    Literal(char),
}

/// Splits `pattern` into tokens, resolving escapes.
fn tokenize(pattern: &[u8]) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut escaped = false;

    for item in codepoints(pattern) {
        let (position, ch) = item.map_err(|position| CompileError::InvalidUtf8 { position })?;
        if ch == '\0' {
            return Err(CompileError::ReservedCodepoint { position });
        }

        let token = match (ch, escaped) {
            (ESCAPE, false) => {
                escaped = true;
                continue;
            }
            (ANY_STRING, false) if tokens.last() == Some(&Token::AnyString) => continue,
            (ANY_STRING, false) => Token::AnyString,
            (ANY_CHAR, false) => Token::AnyChar,
            (ch, _) => Token::Literal(ch),
        };
        escaped = false;
        tokens.push(token);
    }

    if escaped {
        tokens.push(Token::Literal(ESCAPE));
    }
    Ok(tokens)
}

/// Compiles `pattern` into a deterministic automaton over bytes.
///
/// Literals and `_` are UTF-8 encoded per fragment, so the concatenated automaton and its
/// determinization work on bytes throughout and `%` can match any byte, valid UTF-8 or not.
/// The result is input-label sorted, deterministic, epsilon-free and an unweighted acceptor.
/// Its start state is 0 unless the pattern accepts nothing.
pub fn try_compile(pattern: &[u8], options: &CompileOptions) -> Result<Automaton, CompileError> {
    let tokens = tokenize(pattern)?;

    let mut nfa = make_empty_string();
    for token in tokens.iter().rev() {
        let fragment = match *token {
            Token::AnyString => make_any_string(),
            Token::AnyChar => make_any_char(),
            Token::Literal(ch) => make_char(ch),
        };
        concat(&fragment, &mut nfa);
    }

    let mut dfa = determinize_star(&nfa, options.max_states)?;
    dfa.set_properties(DETERMINIZED, Properties::ALL);
    Ok(dfa)
}

/// Compiles `pattern` with default options.
///
/// Never fails: malformed UTF-8, U+0000 and determinization failures all produce an automaton
/// without states, which matches nothing.
pub fn compile(pattern: &[u8]) -> Automaton {
    compile_with(pattern, &CompileOptions::default())
}

/// Like [`compile`], with explicit options.
pub fn compile_with(pattern: &[u8], options: &CompileOptions) -> Automaton {
    try_compile(pattern, options).unwrap_or_else(|err| {
        debug!(
            "wildcard {:?} compiles to the empty automaton: {err}",
            String::from_utf8_lossy(pattern)
        );
        Automaton::new()
    })
}

/// Compiles a native string pattern.
pub fn compile_str(pattern: &str) -> Automaton {
    compile(pattern.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_escapes_and_runs() {
        use Token::*;
        assert_eq!(
            tokenize(br"a%%\%_\\").unwrap(),
            vec![Literal('a'), AnyString, Literal('%'), AnyChar, Literal('\\')]
        );
        assert_eq!(tokenize(br"a\").unwrap(), vec![Literal('a'), Literal('\\')]);
        assert_eq!(tokenize(b"%%%").unwrap(), vec![AnyString]);
        // an escaped `%` breaks a run
        assert_eq!(
            tokenize(br"%\%%").unwrap(),
            vec![AnyString, Literal('%'), AnyString]
        );
    }

    #[test]
    fn tokenize_reports_positions() {
        assert_eq!(
            tokenize(b"ab\xFF"),
            Err(CompileError::InvalidUtf8 { position: 2 })
        );
        assert_eq!(
            tokenize(b"a\0"),
            Err(CompileError::ReservedCodepoint { position: 1 })
        );
    }

    #[test]
    fn empty_pattern_accepts_empty_string() {
        let fst = compile(b"");
        assert_eq!(fst.num_states(), 1);
        assert!(fst.is_final(0));
        assert_eq!(fst.total_arcs(), 0);
    }

    #[test]
    fn literal_is_a_chain() {
        let fst = compile(b"abc");
        assert_eq!(fst.num_states(), 4);
        assert_eq!(fst.total_arcs(), 3);
    }

    #[test]
    fn state_limit_fails_compilation() {
        let options = CompileOptions { max_states: 2 };
        assert!(matches!(
            try_compile(b"abc", &options),
            Err(CompileError::Determinize(_))
        ));
        assert!(compile_with(b"abc", &options).is_empty());
    }

    #[test]
    fn malformed_input_is_empty() {
        assert!(compile(&[b'a', 0xC3]).is_empty());
        assert!(compile(b"\0").is_empty());
        assert!(!compile_str("%").is_empty());
    }
}
