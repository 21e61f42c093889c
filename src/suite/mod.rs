//! YAML fixture suites.
//!
//! A suite file names a schema and lists fixtures for it. Suites are
//! discovered under a root directory, run against a [`SchemaRegistry`] the
//! caller fills, and reported with colored PASS/FAIL/SKIP lines.
//!
//! # Suite Format
//!
//! ```yaml
//! name: boolean            # optional, defaults to the file stem
//! schema: boolean          # a name registered in the SchemaRegistry
//! skip: false              # optional
//! only: false              # optional
//! valid:
//!   - true
//!   - !case {value: "yes", message: string form, schema: lenient-boolean}
//! invalid: [1, ~, !undefined ~]
//! cast:
//!   - ["true", true]
//!   - ["0", false, lenient-boolean]
//! not_cast:
//!   - !symbol foo
//! ```
//!
//! See [`yaml`] for the value tags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value as Yaml;

use crate::error_messages::{SKIP_FILTERED, SKIP_MARKED, SKIP_NOT_ONLY};
use crate::errors::FixtureError;
use crate::harness::{
    cast_all, cast_title, not_cast_title, validate_all, validation_title, CaseGroup, CaseResult,
    CastFixture, Fixture, Summary, summarize,
};
use crate::schema::{SchemaRef, SchemaRegistry};
use crate::value::Value;

pub mod discovery;
pub mod report;
pub mod yaml;

pub use discovery::discover_fixture_files;
pub use report::report_outcomes;

use yaml::{describe, field, string_field, tag_name, value_from_yaml, CASE_TAG};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for suite discovery and reporting.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub root: PathBuf,
    /// Case-insensitive substring a suite name must contain.
    pub filter: Option<String>,
    pub use_colors: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("tests/fixtures"),
            filter: None,
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const YELLOW: &str = "\x1b[33m";

impl SuiteConfig {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

// =============================================================================
// SUITE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuiteDocument {
    name: Option<String>,
    schema: String,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    only: bool,
    #[serde(default)]
    valid: Vec<Yaml>,
    #[serde(default)]
    invalid: Vec<Yaml>,
    #[serde(default)]
    cast: Vec<Yaml>,
    #[serde(default)]
    not_cast: Vec<Yaml>,
}

/// A validation fixture as written in a suite; the schema is still a name.
#[derive(Debug, Clone)]
pub struct SuiteFixture {
    pub value: Value,
    pub message: Option<String>,
    pub schema: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SuiteCast {
    pub value: Value,
    pub expected: Value,
    pub schema: Option<String>,
}

/// One parsed suite file.
#[derive(Debug, Clone)]
pub struct FixtureSuite {
    pub name: String,
    pub file: PathBuf,
    pub schema: String,
    pub skip: bool,
    pub only: bool,
    pub valid: Vec<SuiteFixture>,
    pub invalid: Vec<SuiteFixture>,
    pub cast: Vec<SuiteCast>,
    pub not_cast: Vec<Value>,
}

impl FixtureSuite {
    /// Parses suite text. `file` names the suite when it has no `name` and
    /// labels parse diagnostics.
    pub fn parse(file: &Path, content: &str) -> Result<Self, FixtureError> {
        let label = file.display().to_string();
        let doc: SuiteDocument =
            serde_yaml::from_str(content).map_err(|e| FixtureError::parse(&label, content, e))?;

        let name = doc.name.unwrap_or_else(|| {
            file.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or(label)
        });

        Ok(Self {
            name,
            file: file.to_path_buf(),
            schema: doc.schema,
            skip: doc.skip,
            only: doc.only,
            valid: collect(doc.valid, fixture_entry)?,
            invalid: collect(doc.invalid, fixture_entry)?,
            cast: collect(doc.cast, cast_entry)?,
            not_cast: collect(doc.not_cast, value_from_yaml)?,
        })
    }

    pub fn case_count(&self) -> usize {
        self.valid.len() + self.invalid.len() + self.cast.len() + self.not_cast.len()
    }

    /// The titles the suite's cases will carry, in run order.
    pub fn titles(&self) -> Vec<(CaseGroup, String)> {
        let validation = |group: CaseGroup, fixtures: &[SuiteFixture]| {
            fixtures
                .iter()
                .map(|f| (group, validation_title(&f.value, f.message.as_deref())))
                .collect::<Vec<_>>()
        };

        let mut titles = validation(CaseGroup::Valid, &self.valid);
        titles.extend(validation(CaseGroup::Invalid, &self.invalid));
        titles.extend(
            self.cast
                .iter()
                .map(|c| (CaseGroup::Cast, cast_title(&c.value, &c.expected))),
        );
        titles.extend(
            self.not_cast
                .iter()
                .map(|v| (CaseGroup::NotCast, not_cast_title(v))),
        );
        titles
    }
}

fn collect<T>(
    entries: Vec<Yaml>,
    convert: impl Fn(Yaml) -> Result<T, FixtureError>,
) -> Result<Vec<T>, FixtureError> {
    entries.into_iter().map(convert).collect()
}

fn fixture_entry(yaml: Yaml) -> Result<SuiteFixture, FixtureError> {
    match yaml {
        Yaml::Tagged(tagged) if tag_name(&tagged.tag) == CASE_TAG => {
            let Yaml::Mapping(fields) = tagged.value else {
                return Err(FixtureError::InvalidTagged {
                    tag: CASE_TAG.to_string(),
                    reason: "expected a mapping with 'value'".to_string(),
                });
            };
            Ok(SuiteFixture {
                value: field(&fields, "value")
                    .map(value_from_yaml)
                    .transpose()?
                    .unwrap_or_default(),
                message: string_field(&fields, "message"),
                schema: string_field(&fields, "schema"),
            })
        }
        other => Ok(SuiteFixture {
            value: value_from_yaml(other)?,
            message: None,
            schema: None,
        }),
    }
}

fn cast_entry(yaml: Yaml) -> Result<SuiteCast, FixtureError> {
    match yaml {
        Yaml::Sequence(items) if items.len() == 2 || items.len() == 3 => {
            let mut items = items.into_iter();
            let value = value_from_yaml(items.next().unwrap_or(Yaml::Null))?;
            let expected = value_from_yaml(items.next().unwrap_or(Yaml::Null))?;
            let schema = match items.next() {
                None => None,
                Some(Yaml::String(name)) => Some(name),
                Some(other) => {
                    return Err(FixtureError::MalformedCast {
                        reason: format!("schema name must be a string, found {}", describe(&other)),
                    })
                }
            };
            Ok(SuiteCast {
                value,
                expected,
                schema,
            })
        }
        Yaml::Tagged(tagged) if tag_name(&tagged.tag) == CASE_TAG => {
            let Yaml::Mapping(fields) = tagged.value else {
                return Err(FixtureError::MalformedCast {
                    reason: "a !case cast must be a mapping".to_string(),
                });
            };
            let expected = field(&fields, "expected").ok_or_else(|| FixtureError::MalformedCast {
                reason: "missing 'expected'".to_string(),
            })?;
            Ok(SuiteCast {
                value: field(&fields, "value")
                    .map(value_from_yaml)
                    .transpose()?
                    .unwrap_or_default(),
                expected: value_from_yaml(expected)?,
                schema: string_field(&fields, "schema"),
            })
        }
        other => Err(FixtureError::MalformedCast {
            reason: format!("expected [value, expected], found {}", describe(&other)),
        }),
    }
}

/// Load and parse a suite file.
pub fn load_suite(path: &Path) -> Result<FixtureSuite, FixtureError> {
    let content = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FixtureSuite::parse(path, &content)
}

// =============================================================================
// EXECUTION
// =============================================================================

/// The result of handling one suite file.
#[derive(Debug, Clone)]
pub enum SuiteOutcome {
    Ran {
        file: String,
        name: String,
        results: Vec<CaseResult>,
    },
    Skipped {
        file: String,
        name: String,
        cases: usize,
        reason: String,
    },
    /// The suite could not be loaded or refers to an unknown schema.
    Failed { file: String, error: String },
}

impl SuiteOutcome {
    pub fn summary(&self) -> Summary {
        match self {
            SuiteOutcome::Ran { results, .. } => summarize(results),
            SuiteOutcome::Skipped { cases, .. } => Summary {
                skipped: *cases,
                ..Summary::default()
            },
            SuiteOutcome::Failed { .. } => Summary {
                failed: 1,
                ..Summary::default()
            },
        }
    }
}

pub fn summarize_outcomes(outcomes: &[SuiteOutcome]) -> Summary {
    let mut summary = Summary::default();
    for outcome in outcomes {
        summary.merge(outcome.summary());
    }
    summary
}

/// Runs every case of a suite.
pub fn run_suite(
    suite: &FixtureSuite,
    registry: &SchemaRegistry,
) -> Result<Vec<CaseResult>, FixtureError> {
    let schema = resolve_schema(registry, suite, &suite.schema)?;

    let fixtures = |entries: &[SuiteFixture]| -> Result<Vec<Fixture>, FixtureError> {
        entries
            .iter()
            .map(|entry| {
                let mut fixture = Fixture::new(entry.value.clone());
                fixture.message = entry.message.clone();
                fixture.schema = override_schema(registry, suite, entry.schema.as_deref())?;
                Ok(fixture)
            })
            .collect()
    };
    let valid = fixtures(&suite.valid)?;
    let invalid = fixtures(&suite.invalid)?;
    let casts = suite
        .cast
        .iter()
        .map(|entry| {
            let mut fixture = CastFixture::new(entry.value.clone(), entry.expected.clone());
            fixture.schema = override_schema(registry, suite, entry.schema.as_deref())?;
            Ok(fixture)
        })
        .collect::<Result<Vec<_>, FixtureError>>()?;

    let mut results = validate_all(schema.as_ref(), &valid, &invalid);
    results.extend(cast_all(schema.as_ref(), &casts, &suite.not_cast));
    Ok(results)
}

fn resolve_schema(
    registry: &SchemaRegistry,
    suite: &FixtureSuite,
    name: &str,
) -> Result<SchemaRef, FixtureError> {
    registry
        .get(name)
        .ok_or_else(|| FixtureError::UnknownSchema {
            suite: suite.name.clone(),
            schema: name.to_string(),
        })
}

fn override_schema(
    registry: &SchemaRegistry,
    suite: &FixtureSuite,
    name: Option<&str>,
) -> Result<Option<SchemaRef>, FixtureError> {
    name.map(|name| resolve_schema(registry, suite, name))
        .transpose()
}

/// Helper for suite skipping logic.
pub fn skip_reason(suite: &FixtureSuite, has_only: bool, filter: Option<&str>) -> Option<String> {
    if has_only && !suite.only {
        return Some(SKIP_NOT_ONLY.to_string());
    }
    if suite.skip {
        return Some(SKIP_MARKED.to_string());
    }
    if let Some(f) = filter {
        if !suite.name.to_lowercase().contains(&f.to_lowercase()) {
            return Some(SKIP_FILTERED.replace("{}", f));
        }
    }
    None
}

/// Discovers, loads and runs every suite under `config.root`.
pub fn collect_outcomes(config: &SuiteConfig, registry: &SchemaRegistry) -> Vec<SuiteOutcome> {
    let files = match discover_fixture_files(&config.root) {
        Ok(files) => files,
        Err(err) => {
            return vec![SuiteOutcome::Failed {
                file: config.root.display().to_string(),
                error: error_chain(&err),
            }]
        }
    };

    let loaded: Vec<(String, Result<FixtureSuite, FixtureError>)> = files
        .iter()
        .map(|path| (path.display().to_string(), load_suite(path)))
        .collect();
    let has_only = loaded
        .iter()
        .any(|(_, suite)| suite.as_ref().is_ok_and(|s| s.only));

    loaded
        .into_iter()
        .map(|(file, suite)| {
            let suite = match suite {
                Ok(suite) => suite,
                Err(err) => {
                    return SuiteOutcome::Failed {
                        file,
                        error: error_chain(&err),
                    }
                }
            };
            if let Some(reason) = skip_reason(&suite, has_only, config.filter.as_deref()) {
                return SuiteOutcome::Skipped {
                    file,
                    cases: suite.case_count(),
                    name: suite.name,
                    reason,
                };
            }
            match run_suite(&suite, registry) {
                Ok(results) => SuiteOutcome::Ran {
                    file,
                    name: suite.name,
                    results,
                },
                Err(err) => SuiteOutcome::Failed {
                    file,
                    error: error_chain(&err),
                },
            }
        })
        .collect()
}

/// Runs all suites, prints the report and returns the case counts.
pub fn run_all_suites(config: &SuiteConfig, registry: &SchemaRegistry) -> Summary {
    let outcomes = collect_outcomes(config, registry);
    report_outcomes(&outcomes, config);
    summarize_outcomes(&outcomes)
}

/// An error's message followed by its sources, separated by `: `.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite(text: &str) -> FixtureSuite {
        FixtureSuite::parse(Path::new("fixtures/boolean.yaml"), text).unwrap()
    }

    #[test]
    fn name_defaults_to_file_stem() {
        let parsed = suite("schema: boolean\nvalid: [true]\n");
        assert_eq!(parsed.name, "boolean");
        assert_eq!(parsed.case_count(), 1);
    }

    #[test]
    fn case_entries_carry_messages_and_overrides() {
        let parsed = suite(
            "schema: boolean\nvalid:\n  - !case {value: 'yes', message: string form, schema: lenient}\n",
        );
        let entry = &parsed.valid[0];
        assert_eq!(entry.message.as_deref(), Some("string form"));
        assert_eq!(entry.schema.as_deref(), Some("lenient"));
        assert_eq!(
            parsed.titles(),
            vec![(CaseGroup::Valid, "yes  (string form)".to_string())]
        );
    }

    #[test]
    fn cast_entries_accept_pairs_and_triples() {
        let parsed = suite("schema: boolean\ncast:\n  - ['true', true]\n  - ['0', false, other]\n");
        assert_eq!(parsed.cast.len(), 2);
        assert_eq!(parsed.cast[1].schema.as_deref(), Some("other"));
        let err = FixtureSuite::parse(Path::new("x.yaml"), "schema: b\ncast: [[1]]\n").unwrap_err();
        assert!(matches!(err, FixtureError::MalformedCast { .. }));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = FixtureSuite::parse(Path::new("x.yaml"), "schema: b\nvalidd: []\n").unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }));
    }

    #[test]
    fn skip_rules_follow_only_then_skip_then_filter() {
        let mut parsed = suite("schema: boolean\n");
        assert_eq!(skip_reason(&parsed, true, None).as_deref(), Some(SKIP_NOT_ONLY));
        parsed.skip = true;
        assert_eq!(skip_reason(&parsed, false, None).as_deref(), Some(SKIP_MARKED));
        parsed.skip = false;
        assert_eq!(skip_reason(&parsed, false, Some("BOOL")), None);
        assert!(skip_reason(&parsed, false, Some("string")).is_some());
    }

    #[test]
    fn unknown_schema_is_reported() {
        let parsed = suite("schema: missing\nvalid: [1]\n");
        let err = run_suite(&parsed, &SchemaRegistry::new()).unwrap_err();
        assert!(matches!(err, FixtureError::UnknownSchema { ref schema, .. } if schema == "missing"));
    }
}
