//! # sqlcraft-core
//!
//! A type-safe SQL statement builder.
//!
//! This crate provides:
//! - A typed schema model: tables with ordered, typed columns
//! - WHERE, JOIN and ORDER BY builders with AND/OR/NOT grouping
//! - SELECT, INSERT, UPDATE and DELETE builders rendering `?`-parameterized
//!   SQL with a flat argument list
//! - A validation pipeline run before mutations
//! - The [`Executor`] interface a database driver implements
//!
//! ## Building statements
//!
//! ```rust
//! use sqlcraft_core::schema::TableSchema;
//! use sqlcraft_core::SqlValue;
//!
//! sqlcraft_core::table! {
//!     pub struct Users = "user" {
//!         id: i32,
//!         name: String,
//!         email: String,
//!     }
//! }
//!
//! let users = Users::new();
//! let name: Option<String> = None;
//! let query = users
//!     .update()
//!     .set(&users.name, name)
//!     .where_clause(|w| {
//!         w.eq(&users.id, 1);
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(query.sql, "UPDATE user SET name = COALESCE(?, name) WHERE id = ?");
//! assert_eq!(query.args, vec![SqlValue::Null, SqlValue::Int(1)]);
//! ```
//!
//! ## Null handling
//!
//! A `None` argument is never rendered as a literal NULL comparison:
//! predicates skip it, INSERT leaves the column out and UPDATE keeps the
//! stored value.

pub mod builder;
pub mod ddl;
pub mod error;
pub mod exec;
pub mod query;
pub mod schema;
pub mod validate;
pub mod value;

pub use builder::{Delete, Insert, Join, JoinType, OrderBy, Select, Update, Where};
pub use error::{BoxError, QueryError, Result};
pub use exec::{Execution, Executor, Row};
pub use query::{Fragment, Query};
pub use schema::{Column, ColumnType, Table, TableSchema};
pub use validate::{CheckResult, Validator};
pub use value::{ColumnValue, IntoValue, SqlValue, ToSqlValue};
pub use rust_decimal::Decimal;
