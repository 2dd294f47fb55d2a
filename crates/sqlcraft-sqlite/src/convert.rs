//! Mapping between [`SqlValue`] and SQLite storage classes.
//!
//! SQLite has five storage classes, so several tags share one class on the
//! way in: `Int`, `Long` and `Bool` are stored as INTEGER, `Float` and
//! `Double` as REAL, and `Decimal` as its exact TEXT rendering (a `NUMERIC`
//! column may then convert it to INTEGER or REAL). On the way out INTEGER is
//! always `Long` and REAL is always `Double`; the typed row getters narrow
//! them back.

use rusqlite::types::{Value, ValueRef};
use sqlcraft_core::SqlValue;

use crate::error::SqliteError;

/// Converts an argument into an owned SQLite value for binding.
#[must_use]
pub fn to_sqlite(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Text(v) => Value::Text(v.clone()),
        SqlValue::Int(v) => Value::Integer(i64::from(*v)),
        SqlValue::Long(v) => Value::Integer(*v),
        SqlValue::Float(v) => Value::Real(f64::from(*v)),
        SqlValue::Double(v) => Value::Real(*v),
        SqlValue::Decimal(v) => Value::Text(v.to_string()),
        SqlValue::Bool(v) => Value::Integer(i64::from(*v)),
    }
}

/// Converts a result cell into a [`SqlValue`].
///
/// # Errors
///
/// Returns [`SqliteError::UnsupportedValue`] for BLOB cells and for TEXT
/// that is not valid UTF-8.
pub fn from_sqlite(column: &str, value: ValueRef<'_>) -> Result<SqlValue, SqliteError> {
    let unsupported = |kind| SqliteError::UnsupportedValue {
        column: column.to_owned(),
        kind,
    };
    match value {
        ValueRef::Null => Ok(SqlValue::Null),
        ValueRef::Integer(v) => Ok(SqlValue::Long(v)),
        ValueRef::Real(v) => Ok(SqlValue::Double(v)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| SqlValue::Text(text.to_owned()))
            .map_err(|_| unsupported("non-UTF-8 text")),
        ValueRef::Blob(_) => Err(unsupported("blob")),
    }
}
