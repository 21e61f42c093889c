//! Diagnostic value printing and schema fixture harnesses.
//!
//! [`print_value`] renders any [`Value`] as a short, readable string for
//! test titles and failure messages. The [`harness`] runs batches of
//! fixtures against a caller-supplied [`Schema`], and [`suite`] loads those
//! batches from YAML files.

pub mod category;
pub mod cli;
pub mod error_messages;
pub mod errors;
pub mod harness;
pub mod print;
pub mod schema;
pub mod suite;
pub mod value;

pub use crate::category::{classify, ValueCategory};
pub use crate::errors::{FixtureError, HarnessError, SchemaError};
pub use crate::harness::{cast_all, cast_and_should_fail, validate_all, CaseResult, CastFixture, Fixture};
pub use crate::print::{print_value, print_value_with, PrintOptions};
pub use crate::schema::{Schema, SchemaRef, SchemaRegistry};
pub use crate::value::Value;
