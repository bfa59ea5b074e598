//! Implementation of `wf classify`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use wf_wildcard::{WildcardKind, classify, literal_prefix};

use crate::cli::{
    args::ClassifyCommand,
    output::{JsonClassification, print_json},
};

/// Classifies one pattern.
fn describe(pattern: &str) -> JsonClassification {
    let kind = classify(pattern.as_bytes());
    let literal = (kind.is_term() || kind.is_prefix()).then(|| {
        String::from_utf8_lossy(&literal_prefix(pattern.as_bytes())).into_owned()
    });
    JsonClassification {
        pattern: pattern.to_string(),
        kind,
        literal,
    }
}

/// Prints the kind of every pattern and, for terms and prefixes, the literal text.
pub fn run(cmd: &ClassifyCommand) -> ExitCode {
    let rows: Vec<JsonClassification> = cmd
        .patterns
        .iter()
        .map(String::as_str)
        .map(describe)
        .collect();
    if cmd.json {
        return print_json(&rows);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Pattern", "Kind", "Literal"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.pattern),
            Cell::new(row.kind.as_str()),
            Cell::new(row.literal.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");

    if rows.iter().any(|r| r.kind == WildcardKind::Invalid) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_unescaped() {
        let row = describe(r"a\%b%");
        assert_eq!(row.kind, WildcardKind::PrefixEscaped);
        assert_eq!(row.literal.as_deref(), Some("a%b"));

        let row = describe("%x_");
        assert_eq!(row.kind, WildcardKind::Wildcard);
        assert_eq!(row.literal, None);
    }
}
