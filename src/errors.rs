//! Error types for schemas, the fixture harness and fixture suites.
//!
//! Every error is a `thiserror` enum that also derives `miette::Diagnostic`,
//! so the CLI can render codes, help text and source snippets.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error_messages::DEFAULT_VALUE_PATH;
use crate::print::print_value;
use crate::value::Value;

/// Failures reported by a [`crate::schema::Schema`].
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error(
        "The value of {path} could not be cast to a value that satisfies the schema type: \"{type_name}\".\n\nattempted value: {attempted}"
    )]
    #[diagnostic(code(valprint::schema::cast))]
    Cast {
        path: String,
        type_name: String,
        /// The rejected value, already printed.
        attempted: String,
    },

    #[error("{message}")]
    #[diagnostic(code(valprint::schema::invalid))]
    Invalid { message: String },
}

impl SchemaError {
    /// A cast failure for a top-level value.
    pub fn cast(type_name: impl Into<String>, value: &Value) -> Self {
        Self::cast_at(DEFAULT_VALUE_PATH, type_name, value)
    }

    pub fn cast_at(path: impl Into<String>, type_name: impl Into<String>, value: &Value) -> Self {
        SchemaError::Cast {
            path: path.into(),
            type_name: type_name.into(),
            attempted: print_value(value, true),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        SchemaError::Invalid {
            message: message.into(),
        }
    }
}

/// Why a cast-should-fail check did not hold.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("Expected {value} to fail casting, but it cast to {result}")]
    #[diagnostic(code(valprint::harness::cast_succeeded))]
    CastSucceeded { value: String, result: String },

    #[error("Cast failed with an unexpected error: {message}")]
    #[diagnostic(
        code(valprint::harness::unexpected_error),
        help("cast failures must be SchemaError::Cast with the standard message")
    )]
    UnexpectedError { message: String },
}

/// Failures while reading fixture suites or value documents.
#[derive(Debug, Error, Diagnostic)]
pub enum FixtureError {
    #[error("Failed to read '{}'", .path.display())]
    #[diagnostic(code(valprint::fixture::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk fixture directory '{}'", .root.display())]
    #[diagnostic(code(valprint::fixture::walk))]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to parse YAML document")]
    #[diagnostic(code(valprint::fixture::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON document")]
    #[diagnostic(code(valprint::fixture::json))]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown value tag '!{tag}'")]
    #[diagnostic(
        code(valprint::fixture::unknown_tag),
        help("supported tags: !undefined !nan !neg_zero !inf !neg_inf !date !function !symbol !error !regexp")
    )]
    UnknownTag { tag: String },

    #[error("Invalid payload for '!{tag}': {reason}")]
    #[diagnostic(code(valprint::fixture::invalid_tagged))]
    InvalidTagged { tag: String, reason: String },

    #[error("Mapping keys must be strings, numbers or booleans, found {found}")]
    #[diagnostic(code(valprint::fixture::invalid_key))]
    InvalidKey { found: String },

    #[error("Malformed cast fixture: {reason}")]
    #[diagnostic(
        code(valprint::fixture::malformed_cast),
        help("write cast fixtures as [value, expected] or [value, expected, schema]")
    )]
    MalformedCast { reason: String },

    #[error("Suite '{suite}' refers to unknown schema '{schema}'")]
    #[diagnostic(code(valprint::fixture::unknown_schema))]
    UnknownSchema { suite: String, schema: String },
}

impl FixtureError {
    /// Wraps a YAML error with the document it came from, pointing at the
    /// failure location when the parser reports one.
    pub fn parse(name: impl AsRef<str>, content: &str, source: serde_yaml::Error) -> Self {
        let span = source
            .location()
            .map(|location| SourceSpan::from((location.index(), 0)));
        FixtureError::Parse {
            src: NamedSource::new(name, content.to_string()),
            span,
            source,
        }
    }
}
