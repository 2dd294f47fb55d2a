//! Table definitions.

use std::sync::Arc;

use super::column::{Column, ColumnRef};
use crate::value::ColumnValue;

/// A named table and its ordered, typed columns.
///
/// A table is declared once, usually through the [`table!`](crate::table)
/// macro, and is read-only afterwards. Columns are appended in declaration
/// order while the table is being built.
///
/// ```rust
/// use sqlcraft_core::schema::{Column, Table};
///
/// let mut table = Table::with_prefix("account");
/// let id: Column<i32> = table.column("id");
/// assert_eq!(id.key(), "account_id");
/// assert_eq!(table.primary_key().map(|c| c.key()), Some("account_id"));
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    name: Arc<str>,
    prefixed: bool,
    columns: Vec<ColumnRef>,
    primary_key: Option<usize>,
}

impl Table {
    /// Creates a table whose column keys are the bare column names.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            prefixed: false,
            columns: Vec::new(),
            primary_key: None,
        }
    }

    /// Creates a table whose column keys are `<table>_<name>`.
    #[must_use]
    pub fn with_prefix(name: &str) -> Self {
        Self {
            prefixed: true,
            ..Self::new(name)
        }
    }

    /// The SQL table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether column keys carry the table name as a prefix.
    #[must_use]
    pub const fn is_prefixed(&self) -> bool {
        self.prefixed
    }

    /// Declares a new column and returns its typed handle.
    pub fn column<T: ColumnValue>(&mut self, name: &str) -> Column<T> {
        let key: Arc<str> = if self.prefixed {
            Arc::from(format!("{}_{name}", self.name))
        } else {
            Arc::from(name)
        };
        let column = Column::new(Arc::clone(&self.name), key);
        self.columns.push(column.to_ref());
        column
    }

    /// Declares a new column and marks it as the primary key.
    pub fn primary_key_column<T: ColumnValue>(&mut self, name: &str) -> Column<T> {
        let column = self.column(name);
        self.primary_key = Some(self.columns.len() - 1);
        column
    }

    /// All declared columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    /// The primary key column.
    ///
    /// Falls back to the first declared column when no column was marked.
    /// Returns `None` only for a table without columns.
    #[must_use]
    pub fn primary_key(&self) -> Option<&ColumnRef> {
        self.columns.get(self.primary_key.unwrap_or(0))
    }

    /// Looks up a declared column by its rendered key.
    #[must_use]
    pub fn column_by_key(&self, key: &str) -> Option<&ColumnRef> {
        self.columns.iter().find(|c| c.key() == key)
    }
}
