//! Classification of values into printing categories.
//!
//! The printer never inspects a [`Value`] directly. It asks [`classify`] for
//! a [`Classified`] view and matches on it exhaustively, so a new value kind
//! cannot slip through without a rendering rule.

use std::fmt;

use crate::value::{
    ArrayRef, DateValue, ErrorValue, FunctionValue, ObjectRef, RegExpValue, SymbolValue, Value,
};

/// The mutually exclusive printing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    Nullish,
    Boolean,
    Number,
    String,
    Function,
    Symbol,
    Date,
    Error,
    RegExp,
    Composite,
}

impl ValueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueCategory::Nullish => "Nullish",
            ValueCategory::Boolean => "Boolean",
            ValueCategory::Number => "Number",
            ValueCategory::String => "String",
            ValueCategory::Function => "Function",
            ValueCategory::Symbol => "Symbol",
            ValueCategory::Date => "Date",
            ValueCategory::Error => "Error",
            ValueCategory::RegExp => "RegExp",
            ValueCategory::Composite => "Composite",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two nullish values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullish {
    Undefined,
    Null,
}

/// A value that renders without recursion, borrowing its payload.
#[derive(Debug, Clone, Copy)]
pub enum Leaf<'a> {
    Nullish(Nullish),
    Boolean(bool),
    Number(f64),
    String(&'a str),
    Function(&'a FunctionValue),
    Symbol(&'a SymbolValue),
    Date(&'a DateValue),
    Error(&'a ErrorValue),
    RegExp(&'a RegExpValue),
}

/// A structured value whose children are rendered recursively.
#[derive(Debug, Clone, Copy)]
pub enum Composite<'a> {
    Array(&'a ArrayRef),
    Object(&'a ObjectRef),
}

#[derive(Debug, Clone, Copy)]
pub enum Classified<'a> {
    Leaf(Leaf<'a>),
    Composite(Composite<'a>),
}

impl Classified<'_> {
    pub fn category(&self) -> ValueCategory {
        match self {
            Classified::Leaf(Leaf::Nullish(_)) => ValueCategory::Nullish,
            Classified::Leaf(Leaf::Boolean(_)) => ValueCategory::Boolean,
            Classified::Leaf(Leaf::Number(_)) => ValueCategory::Number,
            Classified::Leaf(Leaf::String(_)) => ValueCategory::String,
            Classified::Leaf(Leaf::Function(_)) => ValueCategory::Function,
            Classified::Leaf(Leaf::Symbol(_)) => ValueCategory::Symbol,
            Classified::Leaf(Leaf::Date(_)) => ValueCategory::Date,
            Classified::Leaf(Leaf::Error(_)) => ValueCategory::Error,
            Classified::Leaf(Leaf::RegExp(_)) => ValueCategory::RegExp,
            Classified::Composite(_) => ValueCategory::Composite,
        }
    }
}

impl Value {
    pub fn category(&self) -> ValueCategory {
        classify(self).category()
    }
}

/// Classifies a value for printing.
///
/// Each variant of [`Value`] maps to exactly one category, so the
/// renderer never inspects a value's runtime type.
///
/// # Examples
///
/// ```rust
/// use valprint::category::{classify, ValueCategory};
/// use valprint::value::Value;
/// assert_eq!(classify(&Value::Null).category(), ValueCategory::Nullish);
/// assert_eq!(classify(&Value::array([])).category(), ValueCategory::Composite);
/// assert_eq!(classify(&Value::error("RangeError", "too big")).category(), ValueCategory::Error);
/// ```
pub fn classify(value: &Value) -> Classified<'_> {
    let leaf = match value {
        Value::Undefined => Leaf::Nullish(Nullish::Undefined),
        Value::Null => Leaf::Nullish(Nullish::Null),
        Value::Bool(b) => Leaf::Boolean(*b),
        Value::Number(n) => Leaf::Number(*n),
        Value::String(s) => Leaf::String(s),
        Value::Function(function) => Leaf::Function(function),
        Value::Symbol(symbol) => Leaf::Symbol(symbol),
        Value::Date(date) => Leaf::Date(date),
        Value::Error(error) => Leaf::Error(error),
        Value::RegExp(regexp) => Leaf::RegExp(regexp),
        Value::Array(array) => return Classified::Composite(Composite::Array(array)),
        Value::Object(object) => return Classified::Composite(Composite::Object(object)),
    };
    Classified::Leaf(leaf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_lands_in_one_category() {
        let cases = [
            (Value::Undefined, ValueCategory::Nullish),
            (Value::Null, ValueCategory::Nullish),
            (Value::Bool(false), ValueCategory::Boolean),
            (Value::Number(f64::NAN), ValueCategory::Number),
            (Value::from("x"), ValueCategory::String),
            (Value::function("f"), ValueCategory::Function),
            (Value::symbol(None), ValueCategory::Symbol),
            (Value::date(f64::NAN), ValueCategory::Date),
            (Value::error("Error", "boom"), ValueCategory::Error),
            (Value::regexp("a", ""), ValueCategory::RegExp),
            (Value::array([]), ValueCategory::Composite),
            (Value::Object(ObjectRef::new()), ValueCategory::Composite),
        ];
        for (value, expected) in cases {
            assert_eq!(value.category(), expected, "{:?}", value);
        }
    }

    #[test]
    fn error_payload_is_borrowed_from_the_value() {
        let value = Value::error("RangeError", "too big");
        match classify(&value) {
            Classified::Leaf(Leaf::Error(error)) => assert_eq!(error.name, "RangeError"),
            other => panic!("expected an error leaf, got {:?}", other),
        }
    }
}
