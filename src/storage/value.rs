//! Backend-neutral statement parameters and result cells.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::error::PersistenceError;

/// A single bound parameter or fetched column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
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

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*r)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            // SQLite has no boolean storage class.
            Value::Bool(b) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(i64::from(*b))),
        })
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Value::Null),
            ValueRef::Integer(i) => Ok(Value::Integer(i)),
            ValueRef::Real(r) => Ok(Value::Real(r)),
            ValueRef::Text(t) => std::str::from_utf8(t)
                .map(|s| Value::Text(s.to_string()))
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

/// One fetched row, columns in `SELECT` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    fn cell(&self, idx: usize) -> Result<&Value, PersistenceError> {
        self.values
            .get(idx)
            .ok_or_else(|| PersistenceError::Decode(format!("missing column {}", idx)))
    }

    pub fn get_i64(&self, idx: usize) -> Result<i64, PersistenceError> {
        match self.cell(idx)? {
            Value::Integer(i) => Ok(*i),
            other => Err(PersistenceError::Decode(format!(
                "column {} is {:?}, expected integer",
                idx, other
            ))),
        }
    }

    pub fn get_str(&self, idx: usize) -> Result<&str, PersistenceError> {
        match self.cell(idx)? {
            Value::Text(s) => Ok(s),
            other => Err(PersistenceError::Decode(format!(
                "column {} is {:?}, expected text",
                idx, other
            ))),
        }
    }

    /// Accepts native booleans and the 0/1 integers SQLite stores them as.
    pub fn get_bool(&self, idx: usize) -> Result<bool, PersistenceError> {
        match self.cell(idx)? {
            Value::Bool(b) => Ok(*b),
            Value::Integer(i) => Ok(*i != 0),
            other => Err(PersistenceError::Decode(format!(
                "column {} is {:?}, expected boolean",
                idx, other
            ))),
        }
    }
}
