//! Statement builders.
//!
//! [`Select`], [`Insert`], [`Update`] and [`Delete`] compose the clause
//! builders ([`Where`], [`Join`], [`OrderBy`]) into one SQL string with a
//! flat argument list. Clauses are always concatenated in the same slot
//! order: columns, joins, where, order, limit, offset. The argument list
//! therefore lines up with the `?` placeholders from left to right.
//!
//! ```rust
//! use sqlcraft_core::schema::TableSchema;
//!
//! sqlcraft_core::table! {
//!     pub struct Accounts = "account", prefixed {
//!         id: i32,
//!         balance: rust_decimal::Decimal,
//!     }
//! }
//!
//! let accounts = Accounts::new();
//! let query = accounts
//!     .select()
//!     .columns(&[&accounts.id, &accounts.balance])
//!     .where_clause(|w| {
//!         w.eq(&accounts.id, 1);
//!     })
//!     .build();
//!
//! assert_eq!(
//!     query.sql,
//!     "SELECT account_id, account_balance FROM account WHERE account_id = ?"
//! );
//! ```

mod delete;
mod insert;
mod join;
mod order;
mod predicate;
mod select;
mod update;

pub use delete::Delete;
pub use insert::{Insert, InsertColumns};
pub use join::{Join, JoinType};
pub use order::{Direction, OrderBy, DEFAULT_PAGE_SIZE};
pub use predicate::{CompareOp, Where};
pub use select::Select;
pub use update::Update;

use crate::error::{QueryError, Result};
use crate::schema::{ColumnRef, Table};
use crate::value::{SqlValue, ToSqlValue};

/// Appends `<primary key> = ?` to `filter` after checking `value` against
/// the key's type.
///
/// Predicates already in `filter` are kept and joined with AND.
pub(crate) fn push_primary_key(
    table: &Table,
    filter: &mut Where,
    operation: &'static str,
    value: impl ToSqlValue,
) -> Result<()> {
    let column = table
        .primary_key()
        .ok_or_else(|| QueryError::MissingPrimaryKey {
            operation,
            table: table.name().to_owned(),
        })?;
    let value = value.to_sql_value();
    check_value(operation, column, &value)?;
    if value.is_null() {
        return Err(type_mismatch(operation, column, &value));
    }
    filter.eq_value(column.key(), value);
    Ok(())
}

/// Fails with [`QueryError::TypeMismatch`] unless `value` fits `column`.
pub(crate) fn check_value(
    operation: &'static str,
    column: &ColumnRef,
    value: &SqlValue,
) -> Result<()> {
    if value.fits(column.column_type()) {
        Ok(())
    } else {
        Err(type_mismatch(operation, column, value))
    }
}

fn type_mismatch(operation: &'static str, column: &ColumnRef, value: &SqlValue) -> QueryError {
    QueryError::TypeMismatch {
        operation,
        column: column.key().to_owned(),
        expected: column.column_type(),
        found: value.type_name(),
    }
}

/// Appends ` WHERE <clause>` unless the clause is empty.
pub(crate) fn push_where(sql: &mut String, args: &mut Vec<SqlValue>, filter: &Where) {
    if !filter.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(filter.sql());
        args.extend_from_slice(filter.args());
    }
}
