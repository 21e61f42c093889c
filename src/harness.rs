//! Fixture batches: run valid, invalid and castable values against a schema.
//!
//! Each fixture becomes one case titled with [`print_value`]. Nothing is
//! registered with a test framework; the functions return [`CaseResult`]s
//! for the caller to report or assert on.
//!
//! ```rust,ignore
//! let results = validate_all(&schema, &[Value::from(true).into()], &[Value::from(1).into()]);
//! assert_passed(&results);
//! ```

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error_messages::{
    CAST_FAILURE_PATTERN, CAST_RESULT_MISMATCH, EXPECTED_INVALID, EXPECTED_VALID,
};
use crate::errors::{HarnessError, SchemaError};
use crate::print::print_value;
use crate::schema::{Schema, SchemaRef};
use crate::value::Value;

lazy_static! {
    static ref CAST_FAILURE: Regex = Regex::new(CAST_FAILURE_PATTERN).unwrap();
}

// =============================================================================
// FIXTURES
// =============================================================================

/// A value to validate, with an optional schema override and description.
#[derive(Clone)]
pub struct Fixture {
    pub value: Value,
    pub schema: Option<SchemaRef>,
    pub message: Option<String>,
}

impl Fixture {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            schema: None,
            message: None,
        }
    }

    pub fn with_schema(mut self, schema: SchemaRef) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn title(&self) -> String {
        validation_title(&self.value, self.message.as_deref())
    }
}

impl From<Value> for Fixture {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// A value that should cast to `expected`.
#[derive(Clone)]
pub struct CastFixture {
    pub value: Value,
    pub expected: Value,
    pub schema: Option<SchemaRef>,
}

impl CastFixture {
    pub fn new(value: impl Into<Value>, expected: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            expected: expected.into(),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: SchemaRef) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn title(&self) -> String {
        cast_title(&self.value, &self.expected)
    }
}

// =============================================================================
// RESULTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseGroup {
    Valid,
    Invalid,
    Cast,
    NotCast,
}

impl CaseGroup {
    pub fn label(&self) -> &'static str {
        match self {
            CaseGroup::Valid => "valid:",
            CaseGroup::Invalid => "invalid:",
            CaseGroup::Cast => "cast:",
            CaseGroup::NotCast => "not cast:",
        }
    }
}

impl fmt::Display for CaseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The outcome of a single case.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseResult {
    Pass {
        group: CaseGroup,
        title: String,
    },
    Fail {
        group: CaseGroup,
        title: String,
        reason: String,
        /// Printed expected and actual values, for cast mismatches.
        expected: Option<String>,
        actual: Option<String>,
    },
}

impl CaseResult {
    fn fail(group: CaseGroup, title: String, reason: impl Into<String>) -> Self {
        CaseResult::Fail {
            group,
            title,
            reason: reason.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CaseResult::Pass { .. })
    }

    pub fn group(&self) -> CaseGroup {
        match self {
            CaseResult::Pass { group, .. } | CaseResult::Fail { group, .. } => *group,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CaseResult::Pass { title, .. } | CaseResult::Fail { title, .. } => title,
        }
    }
}

/// Case counts for a batch of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn merge(&mut self, other: Summary) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

pub fn summarize(results: &[CaseResult]) -> Summary {
    let passed = results.iter().filter(|r| r.is_pass()).count();
    Summary {
        passed,
        failed: results.len() - passed,
        skipped: 0,
    }
}

/// Panics with every failing title and reason if any case failed.
pub fn assert_passed(results: &[CaseResult]) {
    let failures: Vec<String> = results
        .iter()
        .filter_map(|r| match r {
            CaseResult::Fail {
                group,
                title,
                reason,
                ..
            } => Some(format!("  {} {}: {}", group, title, reason)),
            CaseResult::Pass { .. } => None,
        })
        .collect();
    if !failures.is_empty() {
        panic!(
            "{} of {} case(s) failed:\n{}",
            failures.len(),
            results.len(),
            failures.join("\n")
        );
    }
}

// =============================================================================
// TITLES
// =============================================================================

/// `<value>`, followed by `  (<message>)` when a message is given.
pub fn validation_title(value: &Value, message: Option<&str>) -> String {
    let printed = print_value(value, false);
    match message {
        Some(message) if !message.is_empty() => format!("{}  ({})", printed, message),
        _ => printed,
    }
}

pub fn cast_title(value: &Value, expected: &Value) -> String {
    format!(
        "should cast {} to {}",
        print_value(value, false),
        print_value(expected, false)
    )
}

pub fn not_cast_title(value: &Value) -> String {
    format!("should not cast {}", print_value(value, false))
}

// =============================================================================
// RUNNERS
// =============================================================================

/// Checks `is_valid` for every fixture: `true` for `valid`, `false` for
/// `invalid`. A fixture's own schema overrides `schema`.
pub fn validate_all(schema: &dyn Schema, valid: &[Fixture], invalid: &[Fixture]) -> Vec<CaseResult> {
    let mut results = run_validations(schema, CaseGroup::Valid, valid, true);
    results.extend(run_validations(schema, CaseGroup::Invalid, invalid, false));
    results
}

fn run_validations(
    default_schema: &dyn Schema,
    group: CaseGroup,
    fixtures: &[Fixture],
    expect_valid: bool,
) -> Vec<CaseResult> {
    fixtures
        .iter()
        .map(|fixture| {
            let schema: &dyn Schema = match &fixture.schema {
                Some(schema) => schema.as_ref(),
                None => default_schema,
            };
            let title = fixture.title();
            match (schema.is_valid(&fixture.value), expect_valid) {
                (actual, expected) if actual == expected => CaseResult::Pass { group, title },
                (_, true) => CaseResult::fail(group, title, EXPECTED_VALID),
                (_, false) => CaseResult::fail(group, title, EXPECTED_INVALID),
            }
        })
        .collect()
}

/// Casts every `valid` fixture and compares the result with strict
/// equality, then requires every `invalid` value to fail casting against
/// `schema`.
pub fn cast_all(schema: &dyn Schema, valid: &[CastFixture], invalid: &[Value]) -> Vec<CaseResult> {
    let mut results: Vec<CaseResult> = valid
        .iter()
        .map(|fixture| {
            let target: &dyn Schema = match &fixture.schema {
                Some(own) => own.as_ref(),
                None => schema,
            };
            run_cast(target, fixture)
        })
        .collect();

    results.extend(invalid.iter().map(|value| {
        let title = not_cast_title(value);
        match cast_and_should_fail(schema, value) {
            Ok(()) => CaseResult::Pass {
                group: CaseGroup::NotCast,
                title,
            },
            Err(err) => CaseResult::fail(CaseGroup::NotCast, title, err.to_string()),
        }
    }));
    results
}

fn run_cast(schema: &dyn Schema, fixture: &CastFixture) -> CaseResult {
    let group = CaseGroup::Cast;
    let title = fixture.title();
    match schema.cast(&fixture.value) {
        Ok(actual) if actual.strict_equals(&fixture.expected) => CaseResult::Pass { group, title },
        Ok(actual) => CaseResult::Fail {
            group,
            title,
            reason: CAST_RESULT_MISMATCH.to_string(),
            expected: Some(print_value(&fixture.expected, true)),
            actual: Some(print_value(&actual, true)),
        },
        Err(err) => CaseResult::fail(group, title, err.to_string()),
    }
}

/// Succeeds only if casting `value` fails with a standard cast error.
pub fn cast_and_should_fail(schema: &dyn Schema, value: &Value) -> Result<(), HarnessError> {
    match schema.cast(value) {
        Ok(result) => Err(HarnessError::CastSucceeded {
            value: print_value(value, true),
            result: print_value(&result, true),
        }),
        Err(err @ SchemaError::Cast { .. }) if CAST_FAILURE.is_match(&err.to_string()) => Ok(()),
        Err(err) => Err(HarnessError::UnexpectedError {
            message: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_append_messages_with_two_spaces() {
        let value = Value::from("x");
        assert_eq!(validation_title(&value, None), "x");
        assert_eq!(validation_title(&value, Some("")), "x");
        assert_eq!(validation_title(&value, Some("why")), "x  (why)");
        assert_eq!(
            cast_title(&Value::from("1"), &Value::from(1)),
            "should cast 1 to 1"
        );
        assert_eq!(not_cast_title(&Value::Null), "should not cast null");
    }

    #[test]
    fn summarize_counts_failures() {
        let results = vec![
            CaseResult::Pass {
                group: CaseGroup::Valid,
                title: "a".into(),
            },
            CaseResult::fail(CaseGroup::Invalid, "b".into(), "nope"),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn cast_failure_pattern_is_case_insensitive() {
        assert!(CAST_FAILURE.is_match(
            "the VALUE of field could not be cast to a value that satisfies the schema type"
        ));
        assert!(!CAST_FAILURE.is_match("could not be cast"));
    }
}
