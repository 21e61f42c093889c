//! Suite discovery, loading, filtering and execution.

mod common;

use std::fs;
use std::path::Path;

use valprint::harness::CaseGroup;
use valprint::suite::{
    collect_outcomes, discover_fixture_files, load_suite, run_suite, summarize_outcomes,
    SuiteConfig, SuiteOutcome,
};
use valprint::FixtureError;

const BOOLEAN_SUITE: &str = r#"
schema: boolean
valid:
  - true
  - !case {value: "yes", message: string form, schema: lenient-boolean}
invalid: [1, ~, !undefined ~]
cast:
  - ["true", true]
  - ["no", false, lenient-boolean]
not_cast:
  - !symbol foo
  - maybe
"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn config(root: &Path, filter: Option<&str>) -> SuiteConfig {
    SuiteConfig {
        root: root.to_path_buf(),
        filter: filter.map(str::to_string),
        use_colors: false,
    }
}

#[cfg(test)]
mod discovery_tests {
    use super::*;

    #[test]
    fn test_discovers_yaml_files_sorted() {
        let dir = common::scratch_dir("discover");
        fs::create_dir_all(dir.join("nested")).unwrap();
        write(&dir, "b.yaml", "schema: boolean\n");
        write(&dir, "nested/a.yml", "schema: boolean\n");
        write(&dir, "notes.txt", "ignored");

        let files = discover_fixture_files(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(&dir).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["b.yaml", "nested/a.yml"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let missing = std::env::temp_dir().join("valprint-does-not-exist-at-all");
        assert!(matches!(
            discover_fixture_files(&missing),
            Err(FixtureError::Walk { .. })
        ));
    }
}

#[cfg(test)]
mod execution_tests {
    use super::*;

    #[test]
    fn test_suite_runs_every_group() {
        let dir = common::scratch_dir("run");
        write(&dir, "boolean.yaml", BOOLEAN_SUITE);

        let suite = load_suite(&dir.join("boolean.yaml")).unwrap();
        assert_eq!(suite.name, "boolean");
        assert_eq!(suite.case_count(), 9);

        let results = run_suite(&suite, &common::registry()).unwrap();
        let failures: Vec<_> = results.iter().filter(|r| !r.is_pass()).collect();
        assert!(failures.is_empty(), "{:?}", failures);

        let titles = suite.titles();
        assert_eq!(titles[1], (CaseGroup::Valid, "yes  (string form)".to_string()));
        assert_eq!(titles[4], (CaseGroup::Invalid, "undefined".to_string()));
        assert_eq!(titles[6], (CaseGroup::Cast, "should cast no to false".to_string()));
        assert_eq!(titles[7], (CaseGroup::NotCast, "should not cast Symbol(foo)".to_string()));
    }

    #[test]
    fn test_outcomes_apply_only_and_report_broken_files() {
        let dir = common::scratch_dir("outcomes");
        write(&dir, "a_boolean.yaml", BOOLEAN_SUITE);
        write(&dir, "b_focus.yaml", "schema: number\nonly: true\nvalid: [1, 2.5]\ncast: [['3', 3]]\n");
        write(&dir, "c_broken.yaml", "schema: [not, a, name]\n");

        let outcomes = collect_outcomes(&config(&dir, None), &common::registry());
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(&outcomes[0], SuiteOutcome::Skipped { cases: 9, .. }));
        assert!(matches!(&outcomes[1], SuiteOutcome::Ran { name, .. } if name == "b_focus"));
        assert!(matches!(&outcomes[2], SuiteOutcome::Failed { .. }));

        let summary = summarize_outcomes(&outcomes);
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.skipped, 9);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_filter_and_unknown_schema() {
        let dir = common::scratch_dir("filter");
        write(&dir, "boolean.yaml", BOOLEAN_SUITE);
        write(&dir, "strings.yaml", "schema: string\nvalid: [a]\n");

        let outcomes = collect_outcomes(&config(&dir, Some("STR")), &common::registry());
        assert!(matches!(&outcomes[0], SuiteOutcome::Skipped { .. }));
        match &outcomes[1] {
            SuiteOutcome::Failed { error, .. } => assert!(error.contains("unknown schema 'string'")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_failing_cases_are_counted() {
        let dir = common::scratch_dir("failing");
        write(&dir, "wrong.yaml", "schema: boolean\nvalid: [1]\nnot_cast: ['true']\n");

        let summary = summarize_outcomes(&collect_outcomes(&config(&dir, None), &common::registry()));
        assert_eq!(summary.failed, 2);
        assert!(!summary.is_success());
    }
}
