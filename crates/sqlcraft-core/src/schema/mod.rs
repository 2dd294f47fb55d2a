//! Schema model for type-safe table and column definitions.
//!
//! A schema is a struct holding a [`Table`] and one typed [`Column`] per
//! declared column. The [`table!`](crate::table) macro generates such a
//! struct; [`TableSchema`] exposes the statement builders on it.

mod column;
mod table;

use std::fmt;

pub use column::{AsColumn, Column, ColumnRef};
pub use table::Table;

use crate::builder::{Delete, Insert, Select, Update};
use crate::ddl;
use crate::error::Result;
use crate::query::Query;
use crate::value::{ColumnValue, IntoValue};

/// The closed set of column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    Boolean,
}

impl ColumnType {
    /// Generic SQL type name used by `CREATE TABLE`.
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::String => "TEXT",
            Self::Int | Self::Long | Self::Boolean => "INTEGER",
            Self::Float | Self::Double => "REAL",
            Self::Decimal => "NUMERIC",
        }
    }

    /// Upper-case name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Int => "INT",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A schema struct wrapping a [`Table`].
///
/// The provided methods start statement builders against the table.
pub trait TableSchema {
    /// The underlying table definition.
    fn table(&self) -> &Table;

    /// Starts a SELECT over all declared columns.
    fn select(&self) -> Select<'_> {
        Select::new(self.table())
    }

    /// Starts an INSERT.
    fn insert(&self) -> Insert<'_> {
        Insert::new(self.table())
    }

    /// Starts an UPDATE.
    fn update(&self) -> Update<'_> {
        Update::new(self.table())
    }

    /// Starts a DELETE.
    fn delete(&self) -> Delete<'_> {
        Delete::new(self.table())
    }

    /// Starts a `SELECT COUNT(*)`.
    fn count(&self) -> Select<'_> {
        Select::new(self.table()).count()
    }

    /// Builds `SELECT EXISTS(SELECT 1 FROM <table> WHERE <key> = ?)`.
    fn exists_by<T: ColumnValue, V: IntoValue<T>>(&self, column: &Column<T>, value: V) -> Select<'_>
    where
        Self: Sized,
    {
        Select::new(self.table())
            .where_clause(|w| {
                w.eq(column, value);
            })
            .exists()
    }

    /// Builds the `CREATE TABLE IF NOT EXISTS` statement for the table.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingPrimaryKey`](crate::QueryError::MissingPrimaryKey)
    /// for a table without columns.
    fn create_table(&self) -> Result<Query> {
        ddl::create_table(self.table())
    }
}

/// Declares a schema struct.
///
/// Column keys are the field names; with `prefixed` they become
/// `<table>_<field>`. A field marked `#[primary_key]` becomes the primary
/// key, otherwise the first field is.
///
/// ```rust
/// use sqlcraft_core::schema::TableSchema;
///
/// sqlcraft_core::table! {
///     pub struct Users = "user" {
///         #[primary_key]
///         id: i32,
///         name: String,
///     }
/// }
///
/// let users = Users::new();
/// assert_eq!(users.name.key(), "name");
/// assert_eq!(users.table().primary_key().map(|c| c.key()), Some("id"));
/// ```
#[macro_export]
macro_rules! table {
    (
        @define $(#[$meta:meta])* $vis:vis $name:ident, $init:expr,
        $( $(#[$pk:ident])? $field:ident : $ty:ty ),* $(,)?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            table: $crate::schema::Table,
            $(pub $field: $crate::schema::Column<$ty>,)*
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                let mut table = $init;
                $(let $field = $crate::table!(@column table, $field, $ty $(, $pk)?);)*
                Self { table, $($field,)* }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::schema::TableSchema for $name {
            fn table(&self) -> &$crate::schema::Table {
                &self.table
            }
        }
    };
    (@column $table:ident, $field:ident, $ty:ty) => {
        $table.column::<$ty>(stringify!($field))
    };
    (@column $table:ident, $field:ident, $ty:ty, primary_key) => {
        $table.primary_key_column::<$ty>(stringify!($field))
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $table:literal, prefixed {
            $($body:tt)*
        }
    ) => {
        $crate::table!(@define $(#[$meta])* $vis $name, $crate::schema::Table::with_prefix($table), $($body)*);
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $table:literal {
            $($body:tt)*
        }
    ) => {
        $crate::table!(@define $(#[$meta])* $vis $name, $crate::schema::Table::new($table), $($body)*);
    };
}
