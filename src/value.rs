use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate};

/// Largest magnitude a date's time value may have, in milliseconds.
pub const MAX_TIME_VALUE: f64 = 8.64e15;

const MS_PER_DAY: i64 = 86_400_000;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Represents a dynamic value as seen by the printer and the fixture harness.
///
/// Primitives are held inline. Everything after `String` is reference-like:
/// cloning a `Value` shares the underlying allocation, and
/// [`Value::strict_equals`] compares those variants by identity.
///
/// # Examples
///
/// ```rust
/// use valprint::value::Value;
/// let n = Value::from(3.5);
/// assert_eq!(n.type_name(), "Number");
/// let s = Value::from("hello");
/// assert_eq!(s.type_name(), "String");
/// assert!(Value::default().is_nullish());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Function(Arc<FunctionValue>),
    Symbol(Arc<SymbolValue>),
    Date(Arc<DateValue>),
    Error(Arc<ErrorValue>),
    RegExp(Arc<RegExpValue>),
    Array(ArrayRef),
    Object(ObjectRef),
}

impl Value {
    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(Arc::new(FunctionValue::new(name)))
    }

    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Arc::new(SymbolValue::new(description)))
    }

    pub fn date(millis: f64) -> Self {
        Value::Date(Arc::new(DateValue::from_millis(millis)))
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Value::Error(Arc::new(ErrorValue::new(name, message)))
    }

    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::RegExp(Arc::new(RegExpValue::new(source, flags)))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(ArrayRef::new(items))
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(ObjectRef::from_entries(entries))
    }

    /// Returns the type name of the value as a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valprint::value::Value;
    /// assert_eq!(Value::Bool(true).type_name(), "Boolean");
    /// assert_eq!(Value::array([]).type_name(), "Array");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Function(_) => "Function",
            Value::Symbol(_) => "Symbol",
            Value::Date(_) => "Date",
            Value::Error(_) => "Error",
            Value::RegExp(_) => "RegExp",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Returns true for `Undefined` and `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strict equality: primitives by value, everything else by identity.
    ///
    /// Numbers follow IEEE comparison, so `NaN` never equals itself and the
    /// two zeros are equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valprint::value::Value;
    /// assert!(Value::from(0.0).strict_equals(&Value::from(-0.0)));
    /// assert!(!Value::from(f64::NAN).strict_equals(&Value::from(f64::NAN)));
    /// let list = Value::array([]);
    /// assert!(list.strict_equals(&list.clone()));
    /// assert!(!list.strict_equals(&Value::array([])));
    /// ```
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Symbol(a), Value::Symbol(b)) => Arc::ptr_eq(a, b),
            (Value::Date(a), Value::Date(b)) => Arc::ptr_eq(a, b),
            (Value::Error(a), Value::Error(b)) => Arc::ptr_eq(a, b),
            (Value::RegExp(a), Value::RegExp(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// ----------------------------------------------------------------------------
// Exotic leaf values
// ----------------------------------------------------------------------------

/// A callable, known to the printer only by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionValue {
    pub name: String,
}

impl FunctionValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn anonymous() -> Self {
        Self::new("")
    }
}

/// A unique symbol with an optional description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolValue {
    pub description: Option<String>,
}

impl SymbolValue {
    pub fn new(description: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_owned),
        }
    }
}

impl fmt::Display for SymbolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// A point in time, stored as milliseconds since the Unix epoch (UTC).
///
/// A `NaN` time value marks an invalid date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateValue {
    time: f64,
}

impl DateValue {
    /// Builds a date from a time value, clipping it to the representable range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valprint::value::DateValue;
    /// assert!(DateValue::from_millis(0.0).is_valid());
    /// assert!(!DateValue::from_millis(f64::INFINITY).is_valid());
    /// assert!(!DateValue::from_millis(9e15).is_valid());
    /// assert_eq!(DateValue::from_millis(1.9).time_value(), 1.0);
    /// ```
    pub fn from_millis(millis: f64) -> Self {
        if !millis.is_finite() || millis.abs() > MAX_TIME_VALUE {
            return Self::invalid();
        }
        // `+ 0.0` folds a negative zero into positive zero
        Self {
            time: millis.trunc() + 0.0,
        }
    }

    pub fn invalid() -> Self {
        Self { time: f64::NAN }
    }

    /// Parses RFC 3339 text, or a bare `YYYY-MM-DD` date taken as UTC midnight.
    /// Anything else yields an invalid date.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Self::from_millis(parsed.timestamp_millis() as f64);
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|midnight| Self::from_millis(midnight.and_utc().timestamp_millis() as f64))
            .unwrap_or_else(Self::invalid)
    }

    pub fn is_valid(&self) -> bool {
        !self.time.is_nan()
    }

    pub fn time_value(&self) -> f64 {
        self.time
    }

    /// Formats the date as `YYYY-MM-DDTHH:MM:SS.sssZ`, or `None` when invalid.
    ///
    /// Years outside `0..=9999` use a sign and six digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valprint::value::DateValue;
    /// let epoch = DateValue::from_millis(0.0);
    /// assert_eq!(epoch.to_iso_string().as_deref(), Some("1970-01-01T00:00:00.000Z"));
    /// assert_eq!(DateValue::invalid().to_iso_string(), None);
    /// ```
    pub fn to_iso_string(&self) -> Option<String> {
        let parts = self.parts()?;
        Some(format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            iso_year(parts.year),
            parts.month,
            parts.day,
            parts.hour,
            parts.minute,
            parts.second,
            parts.millisecond,
        ))
    }

    fn parts(&self) -> Option<DateParts> {
        if !self.is_valid() {
            return None;
        }
        let time = self.time as i64;
        let days = time.div_euclid(MS_PER_DAY);
        let in_day = time.rem_euclid(MS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Some(DateParts {
            year,
            month,
            day,
            // 1970-01-01 was a Thursday
            weekday: (days + 4).rem_euclid(7) as usize,
            hour: in_day / 3_600_000,
            minute: in_day / 60_000 % 60,
            second: in_day / 1000 % 60,
            millisecond: in_day % 1000,
        })
    }
}

/// Native text form: `Invalid Date`, or a UTC rendering such as
/// `Thu Jan 01 1970 00:00:00 GMT+0000`.
impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(parts) = self.parts() else {
            return write!(f, "Invalid Date");
        };
        let year = if parts.year < 0 {
            format!("-{:06}", -parts.year)
        } else {
            format!("{:04}", parts.year)
        };
        write!(
            f,
            "{} {} {:02} {} {:02}:{:02}:{:02} GMT+0000",
            WEEKDAYS[parts.weekday],
            MONTHS[(parts.month - 1) as usize],
            parts.day,
            year,
            parts.hour,
            parts.minute,
            parts.second,
        )
    }
}

struct DateParts {
    year: i64,
    month: u32,
    day: u32,
    weekday: usize,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
}

fn iso_year(year: i64) -> String {
    match year {
        0..=9999 => format!("{:04}", year),
        y if y < 0 => format!("-{:06}", -y),
        y => format!("+{:06}", y),
    }
}

/// Converts days since the epoch into a proleptic Gregorian `(year, month, day)`.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// An error object: a name and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Captures a Rust error's display text as a plain `Error`.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        Self::new("Error", error.to_string())
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name.is_empty(), self.message.is_empty()) {
            (_, true) => write!(f, "{}", self.name),
            (true, false) => write!(f, "{}", self.message),
            (false, false) => write!(f, "{}: {}", self.name, self.message),
        }
    }
}

/// A regular expression literal, kept as source text and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExpValue {
    pub source: String,
    pub flags: String,
}

impl RegExpValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

impl fmt::Display for RegExpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        };
        write!(f, "/{}/{}", source, self.flags)
    }
}

// ----------------------------------------------------------------------------
// Composite handles
// ----------------------------------------------------------------------------

/// A shared, growable array. Clones alias the same storage, so an array can
/// be pushed into itself.
#[derive(Clone, Default)]
pub struct ArrayRef(Arc<RwLock<Vec<Value>>>);

impl ArrayRef {
    pub fn new(items: impl IntoIterator<Item = Value>) -> Self {
        Self(Arc::new(RwLock::new(items.into_iter().collect())))
    }

    pub fn push(&self, value: Value) {
        self.write().push(value);
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRef").field("len", &self.len()).finish()
    }
}

/// A shared object whose entries keep insertion order.
#[derive(Clone, Default)]
pub struct ObjectRef(Arc<RwLock<Vec<(String, Value)>>>);

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let object = Self::new();
        for (key, value) in entries {
            object.insert(key, value);
        }
        object
    }

    /// Sets `key`. An existing key keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valprint::value::{ObjectRef, Value};
    /// let object = ObjectRef::new();
    /// object.insert("a", Value::from(1));
    /// object.insert("b", Value::from(2));
    /// object.insert("a", Value::from(3));
    /// assert_eq!(object.keys(), vec!["a", "b"]);
    /// assert_eq!(object.get("a").and_then(|v| v.as_number()), Some(3.0));
    /// ```
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let mut entries = self.write();
        match entries.iter().position(|(existing, _)| *existing == key) {
            Some(index) => entries[index].1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.read()
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.clone())
    }

    pub fn keys(&self) -> Vec<String> {
        self.read().iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<(String, Value)>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<(String, Value)>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("keys", &self.keys())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------------

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<FunctionValue> for Value {
    fn from(value: FunctionValue) -> Self {
        Value::Function(Arc::new(value))
    }
}

impl From<SymbolValue> for Value {
    fn from(value: SymbolValue) -> Self {
        Value::Symbol(Arc::new(value))
    }
}

impl From<DateValue> for Value {
    fn from(value: DateValue) -> Self {
        Value::Date(Arc::new(value))
    }
}

impl From<ErrorValue> for Value {
    fn from(value: ErrorValue) -> Self {
        Value::Error(Arc::new(value))
    }
}

impl From<RegExpValue> for Value {
    fn from(value: RegExpValue) -> Self {
        Value::RegExp(Arc::new(value))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(millis: f64) -> String {
        DateValue::from_millis(millis)
            .to_iso_string()
            .unwrap_or_default()
    }

    #[test]
    fn iso_string_handles_dates_around_the_epoch() {
        assert_eq!(iso(0.0), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso(-1.0), "1969-12-31T23:59:59.999Z");
        assert_eq!(iso(951_782_400_000.0), "2000-02-29T00:00:00.000Z");
        assert_eq!(iso(1_577_934_245_678.0), "2020-01-02T03:04:05.678Z");
    }

    #[test]
    fn iso_string_uses_extended_years_outside_four_digits() {
        assert_eq!(iso(MAX_TIME_VALUE), "+275760-09-13T00:00:00.000Z");
        assert_eq!(iso(-MAX_TIME_VALUE), "-271821-04-20T00:00:00.000Z");
        assert_eq!(iso(-62_198_755_200_000.0), "-000001-01-01T00:00:00.000Z");
    }

    #[test]
    fn parse_accepts_rfc3339_and_plain_dates() {
        assert_eq!(
            DateValue::parse("2020-01-02T03:04:05.678Z").time_value(),
            1_577_934_245_678.0
        );
        assert_eq!(
            DateValue::parse("2020-01-02T04:04:05.678+01:00").time_value(),
            1_577_934_245_678.0
        );
        assert_eq!(DateValue::parse("1970-01-02").time_value(), 86_400_000.0);
        assert!(!DateValue::parse("not a date").is_valid());
    }

    #[test]
    fn native_date_text() {
        assert_eq!(DateValue::invalid().to_string(), "Invalid Date");
        assert_eq!(
            DateValue::from_millis(0.0).to_string(),
            "Thu Jan 01 1970 00:00:00 GMT+0000"
        );
    }

    #[test]
    fn error_text_follows_name_and_message_rules() {
        assert_eq!(ErrorValue::new("TypeError", "bad").to_string(), "TypeError: bad");
        assert_eq!(ErrorValue::new("Error", "").to_string(), "Error");
        assert_eq!(ErrorValue::new("", "just text").to_string(), "just text");
    }

    #[test]
    fn regexp_and_symbol_text() {
        assert_eq!(RegExpValue::new("abc", "gi").to_string(), "/abc/gi");
        assert_eq!(RegExpValue::new("", "").to_string(), "/(?:)/");
        assert_eq!(SymbolValue::new(Some("foo")).to_string(), "Symbol(foo)");
        assert_eq!(SymbolValue::new(None).to_string(), "Symbol()");
    }

    #[test]
    fn json_objects_keep_key_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"b": 1, "a": [true, null], "c": "x"}"#).unwrap();
        let Value::Object(object) = Value::from(json) else {
            panic!("expected object");
        };
        assert_eq!(object.keys(), vec!["b", "a", "c"]);
    }
}
