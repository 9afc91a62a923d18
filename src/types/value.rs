//! # Runtime Value Representation
//!
//! This module provides `Value`, the owned runtime representation of an
//! encodable value, and `Record`, the ordered field values of one schema
//! instance. Records are the objects passed to `encode` and returned by
//! `decode`.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Description |
//! |---------|-----------|-------------|
//! | Null | - | absent value of a nullable field |
//! | Bool | bool | boolean, mask-resident on the wire |
//! | Int | i64 | integer, narrowed to the field's declared width |
//! | Float | f64 | float, narrowed to the field's declared precision |
//! | Text | String | UTF-8 string |
//! | Array | Vec&lt;Value&gt; | homogeneous sequence |
//! | Record | Record | nested record with its own schema handle |
//!
//! Values are fully owned; decode never borrows from the input buffer.
//!
//! ## Record Identity
//!
//! A `Record` carries an `Arc<RecordSchema>` handle. Two records are equal
//! when they share the same schema (pointer identity) and their field
//! values are equal. Schema identity, not structural equivalence, is what
//! union variant resolution and nested-record checks compare, mirroring
//! the wire contract that both ends compile from the same declarations.

use std::sync::Arc;

use eyre::{ensure, Result};

use crate::schema::RecordSchema;

/// Owned runtime value for one field or array item.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Returns true if this value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Category name for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

/// Ordered field values of one schema instance.
///
/// Field order follows the schema's wire order; new records start with
/// every field `Null`.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl Record {
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let values = vec![Value::Null; schema.field_count()];
        Self { schema, values }
    }

    pub(crate) fn from_parts(schema: Arc<RecordSchema>, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), schema.field_count());
        Self { schema, values }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Sets the field at `idx` (wire order).
    pub fn set(&mut self, idx: usize, value: impl Into<Value>) -> Result<()> {
        ensure!(
            idx < self.values.len(),
            "field index {} out of bounds for schema '{}' ({} fields)",
            idx,
            self.schema.name(),
            self.values.len()
        );
        self.values[idx] = value.into();
        Ok(())
    }

    /// Sets a field by name.
    pub fn set_named(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let idx = self
            .schema
            .field_index(name)
            .ok_or_else(|| eyre::eyre!("no field '{}' in schema '{}'", name, self.schema.name()))?;
        self.values[idx] = value.into();
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.schema.field_index(name).map(|idx| &self.values[idx])
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.values == other.values
    }
}
