//! The schema capability the harness drives.
//!
//! This crate ships no schemas. Callers implement [`Schema`] for whatever
//! validation library they test and register instances by name for fixture
//! suites.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::SchemaError;
use crate::value::Value;

pub trait Schema: Send + Sync {
    /// Name used in cast failure messages.
    fn type_name(&self) -> &str;

    fn is_valid(&self, value: &Value) -> bool;

    /// Coerces `value` into the schema's type.
    ///
    /// Values that cannot be coerced must fail with [`SchemaError::Cast`].
    fn cast(&self, value: &Value) -> Result<Value, SchemaError>;
}

pub type SchemaRef = Arc<dyn Schema>;

/// Named schemas available to fixture suites.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, SchemaRef>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaRef) -> &mut Self {
        self.schemas.insert(name.into(), schema);
        self
    }

    pub fn get(&self, name: &str) -> Option<SchemaRef> {
        self.schemas.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
