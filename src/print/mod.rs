//! The value printer.
//!
//! [`print_value`] turns any [`Value`] into a bounded, readable string for
//! test titles and failure messages. Leaves go through a single
//! classification step; arrays and objects are serialized as indented JSON
//! with every nested leaf rendered the same way.
//!
//! Printing never fails. Cyclic composites print the [`CIRCULAR`] marker
//! where the cycle closes, and composites nested deeper than [`MAX_DEPTH`]
//! print [`DEPTH_LIMIT`].

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::category::{classify, Classified, Leaf, Nullish};
use crate::value::{DateValue, SymbolValue, Value};

pub mod number;
mod structured;

pub use number::print_number;
pub use structured::{CIRCULAR, DEPTH_LIMIT, MAX_DEPTH};

lazy_static! {
    static ref SYMBOL_TEXT: Regex = Regex::new(r"^Symbol\((.*)\)(.*)$").unwrap();
}

/// Printer settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintOptions {
    /// Wrap string leaves in double quotes.
    pub quote_strings: bool,
}

impl PrintOptions {
    pub fn quoted() -> Self {
        Self {
            quote_strings: true,
        }
    }
}

/// Prints a value for diagnostics.
///
/// # Examples
///
/// ```rust
/// use valprint::print::print_value;
/// use valprint::value::Value;
/// assert_eq!(print_value(&Value::from(-0.0), false), "-0");
/// assert_eq!(print_value(&Value::from("abc"), true), "\"abc\"");
/// assert_eq!(print_value(&Value::function(""), false), "[Function anonymous]");
/// let list = Value::array([Value::from(1), Value::Null]);
/// assert_eq!(print_value(&list, false), "[\n  \"1\",\n  \"null\"\n]");
/// ```
pub fn print_value(value: &Value, quote_strings: bool) -> String {
    print_simple_value(value, quote_strings)
        .unwrap_or_else(|| structured::print_structured(value, quote_strings))
}

pub fn print_value_with(value: &Value, options: &PrintOptions) -> String {
    print_value(value, options.quote_strings)
}

/// Renders a leaf value, or returns `None` for arrays and objects.
pub fn print_simple_value(value: &Value, quote_strings: bool) -> Option<String> {
    match classify(value) {
        Classified::Leaf(leaf) => Some(render_leaf(leaf, quote_strings)),
        Classified::Composite(_) => None,
    }
}

pub(crate) fn render_leaf(leaf: Leaf<'_>, quote_strings: bool) -> String {
    match leaf {
        Leaf::Nullish(Nullish::Undefined) => "undefined".to_string(),
        Leaf::Nullish(Nullish::Null) => "null".to_string(),
        Leaf::Boolean(b) => b.to_string(),
        Leaf::Number(n) => print_number(n),
        Leaf::String(s) if quote_strings => format!("\"{}\"", s),
        Leaf::String(s) => s.to_string(),
        Leaf::Function(function) if function.name.is_empty() => {
            "[Function anonymous]".to_string()
        }
        Leaf::Function(function) => format!("[Function {}]", function.name),
        Leaf::Symbol(symbol) => print_symbol(symbol),
        Leaf::Date(date) => print_date(date),
        Leaf::Error(error) => format!("[{}]", error),
        Leaf::RegExp(regexp) => regexp.to_string(),
    }
}

/// Drops anything trailing the symbol's closing parenthesis.
fn print_symbol(symbol: &SymbolValue) -> String {
    SYMBOL_TEXT
        .replace(&symbol.to_string(), "Symbol($1)")
        .into_owned()
}

fn print_date(date: &DateValue) -> String {
    date.to_iso_string().unwrap_or_else(|| date.to_string())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", print_value(self, false))
    }
}
