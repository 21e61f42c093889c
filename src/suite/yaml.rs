//! Conversion from YAML documents to [`Value`]s.
//!
//! Plain YAML maps onto the obvious variants (`~` is `Null`, `.nan` and
//! `.inf` are numbers). Everything else is spelled with a tag:
//!
//! ```yaml
//! - !undefined
//! - !neg_zero
//! - !date 2020-01-02T03:04:05Z
//! - !function parse
//! - !symbol ~
//! - !error {name: TypeError, message: boom}
//! - !regexp {source: "a+b", flags: gi}
//! ```

use serde_yaml::{Mapping, Value as Yaml};

use crate::errors::FixtureError;
use crate::print::number::number_to_string;
use crate::value::{DateValue, ErrorValue, FunctionValue, RegExpValue, SymbolValue, Value};

/// Tag marking a detailed fixture entry rather than a value.
pub(crate) const CASE_TAG: &str = "case";

/// Converts a parsed YAML value.
///
/// # Examples
///
/// ```rust
/// use valprint::suite::yaml::value_from_yaml;
/// use valprint::print::print_value;
/// let yaml = serde_yaml::from_str("- !undefined ~\n- !neg_zero ~\n- .nan\n").unwrap();
/// let value = value_from_yaml(yaml).unwrap();
/// assert_eq!(print_value(&value, false), "[\n  \"undefined\",\n  \"-0\",\n  \"NaN\"\n]");
/// ```
pub fn value_from_yaml(yaml: Yaml) -> Result<Value, FixtureError> {
    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(b)),
        Yaml::Number(n) => Ok(Value::Number(n.as_f64().unwrap_or(f64::NAN))),
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Sequence(items) => Ok(Value::array(
            items
                .into_iter()
                .map(value_from_yaml)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Yaml::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                entries.push((key_text(key)?, value_from_yaml(value)?));
            }
            Ok(Value::object(entries))
        }
        Yaml::Tagged(tagged) => {
            let tag = tag_name(&tagged.tag);
            tagged_value(&tag, tagged.value)
        }
    }
}

/// Parses a whole document. `name` labels parse diagnostics.
pub fn value_from_document(name: &str, content: &str) -> Result<Value, FixtureError> {
    let yaml: Yaml =
        serde_yaml::from_str(content).map_err(|e| FixtureError::parse(name, content, e))?;
    value_from_yaml(yaml)
}

pub(crate) fn tag_name(tag: &serde_yaml::value::Tag) -> String {
    tag.to_string().trim_start_matches('!').to_string()
}

fn key_text(key: Yaml) -> Result<String, FixtureError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(number_to_string(n.as_f64().unwrap_or(f64::NAN))),
        other => Err(FixtureError::InvalidKey {
            found: describe(&other).to_string(),
        }),
    }
}

fn tagged_value(tag: &str, payload: Yaml) -> Result<Value, FixtureError> {
    let invalid = |reason: &str| FixtureError::InvalidTagged {
        tag: tag.to_string(),
        reason: reason.to_string(),
    };

    match tag {
        "undefined" => Ok(Value::Undefined),
        "nan" => Ok(Value::Number(f64::NAN)),
        "neg_zero" => Ok(Value::Number(-0.0)),
        "inf" => Ok(Value::Number(f64::INFINITY)),
        "neg_inf" => Ok(Value::Number(f64::NEG_INFINITY)),
        "date" => match payload {
            Yaml::String(text) => Ok(DateValue::parse(&text).into()),
            Yaml::Number(n) => Ok(DateValue::from_millis(n.as_f64().unwrap_or(f64::NAN)).into()),
            Yaml::Null => Ok(DateValue::invalid().into()),
            _ => Err(invalid("expected RFC 3339 text or epoch milliseconds")),
        },
        "function" => match payload {
            Yaml::String(name) => Ok(FunctionValue::new(name).into()),
            Yaml::Null => Ok(FunctionValue::anonymous().into()),
            _ => Err(invalid("expected a function name")),
        },
        "symbol" => match payload {
            Yaml::String(description) => Ok(SymbolValue::new(Some(&description)).into()),
            Yaml::Null => Ok(SymbolValue::new(None).into()),
            _ => Err(invalid("expected a description")),
        },
        "error" => match payload {
            Yaml::String(message) => Ok(ErrorValue::new("Error", message).into()),
            Yaml::Mapping(fields) => {
                let name = string_field(&fields, "name").unwrap_or_else(|| "Error".to_string());
                let message = string_field(&fields, "message").unwrap_or_default();
                Ok(ErrorValue::new(name, message).into())
            }
            _ => Err(invalid("expected a message or {name, message}")),
        },
        "regexp" => match payload {
            Yaml::String(source) => Ok(RegExpValue::new(source, "").into()),
            Yaml::Mapping(fields) => {
                let source = string_field(&fields, "source")
                    .ok_or_else(|| invalid("missing 'source'"))?;
                let flags = string_field(&fields, "flags").unwrap_or_default();
                Ok(RegExpValue::new(source, flags).into())
            }
            _ => Err(invalid("expected a pattern or {source, flags}")),
        },
        _ => Err(FixtureError::UnknownTag {
            tag: tag.to_string(),
        }),
    }
}

pub(crate) fn field(mapping: &Mapping, key: &str) -> Option<Yaml> {
    mapping.get(key).cloned()
}

pub(crate) fn string_field(mapping: &Mapping, key: &str) -> Option<String> {
    mapping.get(key).and_then(Yaml::as_str).map(str::to_owned)
}

pub(crate) fn describe(yaml: &Yaml) -> &'static str {
    match yaml {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a sequence",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}
