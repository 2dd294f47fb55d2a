//! Result rows.

use std::sync::Arc;

use crate::error::{QueryError, Result};
use crate::schema::{Column, ColumnType};
use crate::value::{ColumnValue, SqlValue};

/// One result row, addressable by column, name or position.
///
/// Getters apply the null defaults of [`ColumnValue`]: a NULL text column
/// reads as an empty string and a NULL decimal reads as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl Row {
    /// Creates a row. `columns` is usually shared by all rows of a result.
    #[must_use]
    pub const fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    /// Result column names in order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw driver value at `index`.
    #[must_use]
    pub fn raw(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| QueryError::Decode {
                column: name.to_owned(),
                message: String::from("no such column in result"),
            })
    }

    fn decode<T: ColumnValue>(&self, index: usize, column: &str) -> Result<T> {
        let value = self.values.get(index).ok_or_else(|| QueryError::Decode {
            column: column.to_owned(),
            message: format!("index {index} out of range for {} columns", self.values.len()),
        })?;
        T::from_sql_value(value).map_err(|message| QueryError::Decode {
            column: column.to_owned(),
            message,
        })
    }

    /// Reads the value of a typed column.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Decode`] if the column is absent or its value
    /// cannot be read as `T`.
    pub fn get<T: ColumnValue>(&self, column: &Column<T>) -> Result<T> {
        self.get_by_name(column.key())
    }

    /// Reads a value by result column name (case-insensitive).
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn get_by_name<T: ColumnValue>(&self, name: &str) -> Result<T> {
        let index = self.index_of(name)?;
        self.decode(index, name)
    }

    /// Reads a value by 0-based position.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn get_at<T: ColumnValue>(&self, index: usize) -> Result<T> {
        let name = self
            .columns
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("#{index}"));
        self.decode(index, &name)
    }

    /// Reads the value under `key` converted to the representation of `ty`.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn value(&self, ty: ColumnType, key: &str) -> Result<SqlValue> {
        use rust_decimal::Decimal;

        use crate::value::ToSqlValue;

        Ok(match ty {
            ColumnType::String => self.get_by_name::<String>(key)?.to_sql_value(),
            ColumnType::Int => self.get_by_name::<i32>(key)?.to_sql_value(),
            ColumnType::Long => self.get_by_name::<i64>(key)?.to_sql_value(),
            ColumnType::Float => self.get_by_name::<f32>(key)?.to_sql_value(),
            ColumnType::Double => self.get_by_name::<f64>(key)?.to_sql_value(),
            ColumnType::Decimal => self.get_by_name::<Decimal>(key)?.to_sql_value(),
            ColumnType::Boolean => self.get_by_name::<bool>(key)?.to_sql_value(),
        })
    }
}
