//! CLI integration tests for wf commands.
//!
//! These focus on exit codes and the parts of the output scripts rely on.

// Integration tests sit outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to run `wf` inside `dir` with HOME isolated to it, so no global config leaks in.
fn wf_in(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("wf").unwrap();
    cmd.current_dir(dir).env("HOME", dir);
    cmd
}

/// Parses stdout of a successful run as JSON.
fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

mod classify {
    use super::*;

    #[test]
    fn reports_each_kind() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["classify", "abc", "foo%", "%", "a_c", r"a\%"])
            .assert()
            .success()
            .stdout(predicate::str::contains("term"))
            .stdout(predicate::str::contains("prefix"))
            .stdout(predicate::str::contains("match_all"))
            .stdout(predicate::str::contains("wildcard"))
            .stdout(predicate::str::contains("term_escaped"));
    }

    #[test]
    fn json_includes_literals() {
        let dir = temp_dir();
        let value = json_output(wf_in(dir.path()).args(["classify", "--json", r"f\_o%", "%x"]));
        assert_eq!(value[0]["kind"], "prefix_escaped");
        assert_eq!(value[0]["literal"], "f_o");
        assert_eq!(value[1]["kind"], "wildcard");
        assert!(value[1]["literal"].is_null());
    }

    #[test]
    fn ignores_broken_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".wf.toml"), "not toml [").unwrap();
        wf_in(dir.path()).args(["classify", "a%"]).assert().success();
    }
}

mod compile {
    use super::*;

    #[test]
    fn prints_table_and_summary() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["compile", "%c%"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(start)"))
            .stdout(predicate::str::contains("'c'"))
            .stdout(predicate::str::contains("wildcard:"));
    }

    #[test]
    fn dot_output() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["compile", "--dot", "a_"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("digraph"));
    }

    #[test]
    fn json_output_describes_automaton() {
        let dir = temp_dir();
        let value = json_output(wf_in(dir.path()).args(["compile", "--json", "ab"]));
        assert_eq!(value["pattern"], "ab");
        assert_eq!(value["kind"], "term");
        assert_eq!(value["start"], 0);
        assert_eq!(value["states"], 3);
        assert_eq!(value["transitions"].as_array().unwrap().len(), 2);
        assert_eq!(value["finals"], serde_json::json!([2]));
    }

    #[test]
    fn state_limit_failure() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["compile", "--max-states", "2", "%a%b%c%"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot compile"));
    }

    #[test]
    fn state_limit_from_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".wf.toml"), "[compiler]\nmax_states = 2\n").unwrap();
        wf_in(dir.path())
            .args(["compile", "%a%b%c%"])
            .assert()
            .failure();
        wf_in(dir.path())
            .args(["compile", "--max-states", "1000", "%a%b%c%"])
            .assert()
            .success();
    }
}

mod matching {
    use super::*;

    #[test]
    fn exit_status_reflects_result() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["match", "%c%", "abc", "c", "xcx"])
            .assert()
            .success()
            .stdout(predicate::str::contains("xcx\tmatch"));

        wf_in(dir.path())
            .args(["match", "%c%", "abc", "ab"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("ab\tno match"));
    }

    #[test]
    fn any_char_is_one_codepoint() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["match", "-q", "日_本", "日x本", "日語本"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
        wf_in(dir.path())
            .args(["match", "-q", "日_本", "日xy本"])
            .assert()
            .failure();
    }

    #[test]
    fn cheap_plans_match_too() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["match", "foo%", "foo", "food"])
            .assert()
            .success();
        wf_in(dir.path())
            .args(["match", r"50\%", "50%"])
            .assert()
            .success();
        wf_in(dir.path())
            .args(["match", r"50\%", "500"])
            .assert()
            .failure();
    }

    #[test]
    fn every_configured_stack_agrees() {
        let dir = temp_dir();
        for composition in ["plain", "explicit", "sigma", "rho", "phi", "multi_eps"] {
            fs::write(
                dir.path().join(".wf.toml"),
                format!("[matcher]\ncomposition = \"{composition}\"\nmulti_eps_labels = 7\n"),
            )
            .unwrap();
            wf_in(dir.path())
                .args(["match", "-q", "a%b_", "ab!", "axxbé"])
                .assert()
                .success();
            wf_in(dir.path())
                .args(["match", "-q", "a%b_", "ab"])
                .assert()
                .failure();
        }
    }

    #[test]
    fn explicit_config_file_overrides_discovery() {
        let dir = temp_dir();
        fs::write(dir.path().join(".wf.toml"), "[compiler]\nmax_states = 1\n").unwrap();
        let other = dir.path().join("other.toml");
        fs::write(&other, "[compiler]\nmax_states = 100\n").unwrap();

        wf_in(dir.path())
            .args(["match", "-q", "%a%b%", "xaxb"])
            .assert()
            .failure();
        wf_in(dir.path())
            .args(["match", "-q", "%a%b%", "xaxb", "--config"])
            .arg(&other)
            .assert()
            .success();
    }
}

mod search {
    use super::*;

    /// Writes a term file and returns its path.
    fn terms(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("terms.txt");
        fs::write(&path, "banana\napple\ncherry\nbandana\nband\n日本語\n").unwrap();
        path
    }

    #[test]
    fn streams_matching_terms_in_order() {
        let dir = temp_dir();
        let file = terms(dir.path());
        wf_in(dir.path())
            .arg("search")
            .arg("%an%a")
            .arg(&file)
            .assert()
            .success()
            .stdout("banana\nbandana\n");
    }

    #[test]
    fn prefix_and_limit() {
        let dir = temp_dir();
        let file = terms(dir.path());
        wf_in(dir.path())
            .args(["search", "-n", "2", "ban%"])
            .arg(&file)
            .assert()
            .success()
            .stdout("banana\nband\n");
    }

    #[test]
    fn json_reports_plan() {
        let dir = temp_dir();
        let file = terms(dir.path());
        let value = json_output(wf_in(dir.path()).args(["search", "--json", "%"]).arg(&file));
        assert_eq!(value["plan"], "match_all");
        assert_eq!(value["total"], 6);

        let value = json_output(wf_in(dir.path()).args(["search", "--json", "_本_"]).arg(&file));
        assert_eq!(value["plan"], "automaton");
        assert_eq!(value["terms"], serde_json::json!(["日本語"]));
    }

    #[test]
    fn missing_term_file_fails() {
        let dir = temp_dir();
        wf_in(dir.path())
            .args(["search", "a%", "nope.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to read"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_defaults() {
        let dir = temp_dir();
        wf_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("showing defaults"))
            .stdout(predicate::str::contains("composition = \"explicit\""))
            .stdout(predicate::str::contains("max_states = 65536"));
    }

    #[test]
    fn shows_merged_file_and_warnings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".wf.toml"),
            "[matcher]\ncomposition = \"phi\"\nspecial_label = 97\n",
        )
        .unwrap();
        wf_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("# from .wf.toml"))
            .stdout(predicate::str::contains("composition = \"phi\""))
            .stderr(predicate::str::contains("warning: special label 97"));
    }

    #[test]
    fn invalid_values_fail() {
        let dir = temp_dir();
        fs::write(dir.path().join(".wf.toml"), "[compiler]\nmax_states = 0\n").unwrap();
        wf_in(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }

    #[test]
    fn unknown_keys_fail() {
        let dir = temp_dir();
        fs::write(dir.path().join(".wf.toml"), "[matcher]\nspeed = 3\n").unwrap();
        wf_in(dir.path()).arg("config").assert().failure();
    }
}

#[test]
fn verbose_flag_enables_logging() {
    let dir = temp_dir();
    wf_in(dir.path())
        .args(["-v", "compile", "a_"])
        .assert()
        .success()
        .stderr(predicate::str::contains("info:"));
}
