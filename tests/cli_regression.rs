// Regression tests for the valprint binary: printing and suite titles,
// plus miette diagnostics on bad input.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn valprint() -> Command {
    Command::cargo_bin("valprint").unwrap()
}

#[test]
fn cli_prints_yaml_documents() {
    let expected = "{\n  \"a\": \"1\",\n  \"b\": \"x\",\n  \"c\": \"NaN\",\n  \"nested\": [\n    \"-0\",\n    \"[Function parse]\",\n    \"[TypeError: boom]\",\n    \"/a+b/gi\"\n  ]\n}\n";
    valprint()
        .args(["print", "tests/values/mixed.yaml"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn cli_prints_stdin_with_quotes() {
    valprint()
        .args(["print", "--quote-strings"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout("\"hello\"\n");
}

#[test]
fn cli_prints_json_input() {
    valprint()
        .args(["print", "--json"])
        .write_stdin(r#"{"z": [], "a": -0.0}"#)
        .assert()
        .success()
        .stdout("{\n  \"z\": [],\n  \"a\": \"-0\"\n}\n");
}

#[test]
fn cli_lists_suite_titles() {
    valprint()
        .args(["titles", "tests/fixtures/boolean.yaml"])
        .assert()
        .success()
        .stdout(
            contains("yes  (string form)")
                .and(contains("should cast true to true"))
                .and(contains("should not cast Symbol(foo)"))
                .and(contains("not cast:")),
        );
}

#[test]
fn cli_reports_miette_diagnostics_on_error() {
    valprint()
        .args(["print"])
        .write_stdin("!bogus 1\n")
        .assert()
        .failure()
        .stderr(contains("valprint::fixture").or(contains("help:")));
}

#[test]
fn cli_reports_missing_files() {
    valprint()
        .args(["print", "tests/values/missing.yaml"])
        .assert()
        .failure()
        .stderr(contains("valprint::fixture::io"));
}
