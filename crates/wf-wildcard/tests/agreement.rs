//! Matchers, byte tables and query plans agree with each other over compiled wildcards.

#![allow(clippy::tests_outside_test_module)]

use wf_fst::{Automaton, IntervalLabel, Label, StateId};
use wf_matcher::{
    ByteDfa, DEFAULT_BINARY_SEARCH_THRESHOLD, Matcher, SortedRangeMatcher, accept,
};
use wf_wildcard::{CompileOptions, WildcardKind, WildcardPlan, classify, compile, compile_str};

/// Patterns covering literals, ranges of multi-byte codepoints and loops.
const PATTERNS: [&str; 8] = [
    "abc",
    "a%",
    "%a%b%",
    "_",
    "é_%",
    "%\u{10FFFF}",
    "日_本%",
    "x\\%y_",
];

/// Targets of every arc at `state` whose interval contains `label`, in arc order.
fn naive(fst: &Automaton, state: StateId, label: Label) -> Vec<StateId> {
    fst.transitions(state)
        .iter()
        .filter(|arc| arc.input_range().contains(label))
        .map(|arc| arc.next)
        .collect()
}

/// Targets reported by a sorted-range matcher for `label` at `state`.
fn found(m: &mut SortedRangeMatcher<'_>, state: StateId, label: Label) -> Vec<StateId> {
    m.set_state(state);
    let mut out = Vec::new();
    if m.find(label) {
        while !m.done() {
            out.push(m.value().next);
            m.next();
        }
    }
    out
}

/// Compares every state and every label in `labels` for the three search strategies.
fn assert_agrees(fst: &Automaton, labels: impl Iterator<Item = Label> + Clone, name: &str) {
    for threshold in [0, DEFAULT_BINARY_SEARCH_THRESHOLD, Label::MAX] {
        let mut m = SortedRangeMatcher::new(fst, threshold);
        for state in fst.state_ids() {
            for label in labels.clone() {
                assert_eq!(
                    found(&mut m, state, label),
                    naive(fst, state, label),
                    "{name}: state {state}, label {label:#x}, threshold {threshold}"
                );
            }
        }
        assert!(m.error().is_none());
    }
}

#[test]
fn sorted_range_agrees_with_scan_on_compiled_patterns() {
    for pattern in PATTERNS {
        let fst = compile_str(pattern);
        assert_agrees(&fst, 1..=2048, pattern);
    }
}

#[test]
fn sorted_range_agrees_with_scan_on_wide_fan_out() {
    // 300 disjoint codepoint ranges leaving one state, plus gaps between them
    let mut fst = Automaton::new();
    fst.add_states(2);
    fst.set_start(0);
    fst.set_final(1, true);
    for i in 0..300u32 {
        let min = 1 + i * 7;
        fst.add_range(0, IntervalLabel::new(min, min + 3), 1);
    }
    fst.add_range(0, IntervalLabel::new(0x1_0000, 0x10_FFFF), 1);
    fst.sort_arcs();

    let labels = (1..=2200).chain([0xFFFF, 0x1_0000, 0x5_0000, 0x10_FFFF]);
    assert_agrees(&fst, labels, "fan-out");
}

#[test]
fn byte_table_agrees_with_matcher_walk() {
    let inputs = [
        "", "a", "abc", "abcd", "ab", "aXbY", "é", "éz", "éz日", "日本", "日x本", "日x本rest",
        "x%y", "x%yz", "xay", "\u{10FFFF}", "q\u{10FFFF}", "🦀",
    ];
    for pattern in PATTERNS {
        let fst = compile_str(pattern);
        let dfa = ByteDfa::new(&fst).unwrap();
        for input in inputs {
            assert_eq!(
                dfa.accepts(input.as_bytes()),
                accept(&fst, input.as_bytes()),
                "{pattern} vs {input:?}"
            );
        }
        // stray bytes outside UTF-8
        for input in [&b"\xff"[..], b"a\x80", b"\xe6\x97", b"\0", b"a\0b"] {
            assert_eq!(dfa.accepts(input), accept(&fst, input), "{pattern} vs {input:?}");
        }
    }
}

/// Byte strings outside the UTF-8 happy path: NUL, stray continuation and lead bytes, surrogate
/// encodings, truncated sequences.
const ODD_TERMS: [&[u8]; 14] = [
    b"",
    b"\0",
    b"a\0b",
    b"\xff",
    b"\xc3",
    b"\xed\xa0\x80",
    b"foo",
    b"fo",
    b"foo\0",
    b"foo\x80",
    b"foo\xff\xfe",
    b"foobar",
    b"xfoo",
    b"\xe6\x97\xa5\xe6",
];

#[test]
fn cheap_plans_agree_with_compiled_automata_on_any_bytes() {
    let options = CompileOptions::default();
    let cases = [
        ("%", WildcardKind::MatchAll),
        ("%%%", WildcardKind::MatchAll),
        ("foo%", WildcardKind::Prefix),
        ("fo%%", WildcardKind::Prefix),
        ("f\\%o%", WildcardKind::PrefixEscaped),
        ("\u{65e5}%", WildcardKind::Prefix),
        ("foo", WildcardKind::Term),
        ("a\\_b", WildcardKind::TermEscaped),
    ];
    for (pattern, kind) in cases {
        assert_eq!(classify(pattern.as_bytes()), kind, "{pattern}");
        let plan = WildcardPlan::prepare(pattern.as_bytes(), &options);
        assert_ne!(plan.name(), "automaton", "{pattern}");
        let fst = compile(pattern.as_bytes());
        let dfa = ByteDfa::new(&fst).unwrap();
        for term in ODD_TERMS {
            let expected = plan.matches(term);
            assert_eq!(accept(&fst, term), expected, "{pattern} vs {term:x?}");
            assert_eq!(dfa.accepts(term), expected, "{pattern} vs {term:x?} (table)");
        }
    }
}

#[test]
fn match_all_accepts_every_short_byte_string() {
    let fst = compile(b"%");
    for a in 0..=u8::MAX {
        assert!(accept(&fst, &[a]), "{a:#x}");
        assert!(accept(&fst, &[b'x', a, 0]), "{a:#x}");
    }
}
