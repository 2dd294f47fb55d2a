//! Typed column references.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::ColumnType;
use crate::value::ColumnValue;

/// A column of a table whose values have the Rust type `T`.
///
/// A column only remembers the *name* of its table, never the table itself,
/// so it can be cloned and passed around freely without keeping the schema
/// alive. Two columns are the same column when their table name and key
/// agree.
pub struct Column<T> {
    table: Arc<str>,
    key: Arc<str>,
    ty: ColumnType,
    _type: PhantomData<fn() -> T>,
}

impl<T: ColumnValue> Column<T> {
    pub(crate) fn new(table: Arc<str>, key: Arc<str>) -> Self {
        Self {
            table,
            key,
            ty: T::TYPE,
            _type: PhantomData,
        }
    }
}

impl<T> Column<T> {
    /// The rendered SQL identifier.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the owning table.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.ty
    }

    /// Returns the same column rendered under another key.
    #[must_use]
    pub fn alias(&self, key: &str) -> Self {
        Self {
            table: Arc::clone(&self.table),
            key: Arc::from(key),
            ty: self.ty,
            _type: PhantomData,
        }
    }

    /// Renders the column qualified by its table, e.g. `employee.name`.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table, self.key)
    }

    /// Returns a synthetic column wrapping this one in a SQL function.
    ///
    /// `name.wrap_fn("LOWER")` renders as `LOWER(name)` wherever a column is
    /// accepted.
    #[must_use]
    pub fn wrap_fn(&self, function: &str) -> Self {
        self.alias(&format!("{function}({})", self.key))
    }

    /// Erases the value type.
    #[must_use]
    pub fn to_ref(&self) -> ColumnRef {
        ColumnRef {
            table: Arc::clone(&self.table),
            key: Arc::clone(&self.key),
            ty: self.ty,
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            key: Arc::clone(&self.key),
            ty: self.ty,
            _type: PhantomData,
        }
    }
}

impl<T> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.key == other.key
    }
}

impl<T> Eq for Column<T> {}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("table", &self.table)
            .field("key", &self.key)
            .field("type", &self.ty)
            .finish()
    }
}

/// A column with its value type erased.
///
/// Tables store their columns as `ColumnRef`s; builders use them wherever
/// columns of different types are mixed in one list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    table: Arc<str>,
    key: Arc<str>,
    ty: ColumnType,
}

impl ColumnRef {
    /// The rendered SQL identifier.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the owning table.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.ty
    }
}

/// Anything usable as a column in a column list, a join or an ordering.
pub trait AsColumn {
    /// Returns the type-erased column.
    fn as_column(&self) -> ColumnRef;
}

impl<T> AsColumn for Column<T> {
    fn as_column(&self) -> ColumnRef {
        self.to_ref()
    }
}

impl AsColumn for ColumnRef {
    fn as_column(&self) -> ColumnRef {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_column() -> Column<String> {
        Column::new(Arc::from("employee"), Arc::from("name"))
    }

    #[test]
    fn test_type_follows_value_type() {
        let id: Column<i64> = Column::new(Arc::from("employee"), Arc::from("id"));
        assert_eq!(id.column_type(), ColumnType::Long);
        assert_eq!(name_column().column_type(), ColumnType::String);
    }

    #[test]
    fn test_alias_keeps_table_and_type() {
        let name = name_column();
        let alias = name.alias("full_name");
        assert_eq!(alias.key(), "full_name");
        assert_eq!(alias.table_name(), "employee");
        assert_eq!(alias.column_type(), ColumnType::String);
        assert_ne!(alias, name);
    }

    #[test]
    fn test_qualified_and_wrapped() {
        let name = name_column();
        assert_eq!(name.qualified(), "employee.name");
        assert_eq!(name.wrap_fn("LOWER").key(), "LOWER(name)");
    }

    #[test]
    fn test_identity_is_table_and_key() {
        let a = name_column();
        let b: Column<String> = Column::new(Arc::from("department"), Arc::from("name"));
        assert_eq!(a, name_column());
        assert_ne!(a.to_ref(), b.to_ref());
    }
}
