//! # Shared Test Schemas
//!
//! Small schemas the integration tests drive the harness with. They only
//! implement enough coercion to exercise pass and fail paths.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use valprint::schema::{Schema, SchemaRef, SchemaRegistry};
use valprint::value::Value;
use valprint::SchemaError;

/// Accepts booleans; casts "true"/"false" and 1/0.
pub struct BooleanSchema;

impl Schema for BooleanSchema {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn is_valid(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn cast(&self, value: &Value) -> Result<Value, SchemaError> {
        match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if s == "true" => Ok(Value::Bool(true)),
            Value::String(s) if s == "false" => Ok(Value::Bool(false)),
            Value::Number(n) if *n == 1.0 => Ok(Value::Bool(true)),
            Value::Number(n) if *n == 0.0 => Ok(Value::Bool(false)),
            other => Err(SchemaError::cast(self.type_name(), other)),
        }
    }
}

/// Accepts booleans and their string spellings, including "yes"/"no".
pub struct LenientBooleanSchema;

impl Schema for LenientBooleanSchema {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.cast(value).is_ok()
    }

    fn cast(&self, value: &Value) -> Result<Value, SchemaError> {
        match value {
            Value::String(s) if s == "yes" => Ok(Value::Bool(true)),
            Value::String(s) if s == "no" => Ok(Value::Bool(false)),
            other => BooleanSchema.cast(other),
        }
    }
}

/// Finite numbers; casts numeric strings.
pub struct NumberSchema;

impl Schema for NumberSchema {
    fn type_name(&self) -> &str {
        "number"
    }

    fn is_valid(&self, value: &Value) -> bool {
        matches!(value, Value::Number(n) if !n.is_nan())
    }

    fn cast(&self, value: &Value) -> Result<Value, SchemaError> {
        match value {
            Value::Number(n) if !n.is_nan() => Ok(Value::Number(*n)),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| SchemaError::cast(self.type_name(), value)),
            other => Err(SchemaError::cast(self.type_name(), other)),
        }
    }
}

/// Casts everything to the same value, so "should not cast" always fails.
pub struct PermissiveSchema;

impl Schema for PermissiveSchema {
    fn type_name(&self) -> &str {
        "mixed"
    }

    fn is_valid(&self, _value: &Value) -> bool {
        true
    }

    fn cast(&self, value: &Value) -> Result<Value, SchemaError> {
        Ok(value.clone())
    }
}

/// Fails every cast with a non-cast error.
pub struct BrokenSchema;

impl Schema for BrokenSchema {
    fn type_name(&self) -> &str {
        "broken"
    }

    fn is_valid(&self, _value: &Value) -> bool {
        false
    }

    fn cast(&self, _value: &Value) -> Result<Value, SchemaError> {
        Err(SchemaError::invalid("transform exploded"))
    }
}

pub fn boolean() -> SchemaRef {
    Arc::new(BooleanSchema)
}

pub fn registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .register("boolean", Arc::new(BooleanSchema))
        .register("lenient-boolean", Arc::new(LenientBooleanSchema))
        .register("number", Arc::new(NumberSchema));
    registry
}

/// A fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("valprint-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
