//! Execution interface.
//!
//! The statement builders never talk to a database directly. They hand a
//! rendered [`Query`] to an [`Executor`], a thin driver adapter that binds
//! each [`SqlValue`] to the matching native parameter type and returns rows
//! as [`Row`]s. Driver failures are wrapped into
//! [`QueryError::Execution`] together with the SQL and its arguments.

mod row;

pub use row::Row;

use tracing::debug;

use crate::error::{BoxError, QueryError, Result};
use crate::query::Query;
use crate::value::SqlValue;

/// Outcome of a statement that does not return rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Execution {
    /// Number of rows inserted, updated or deleted.
    pub rows_affected: u64,
    /// Key generated by an INSERT, when the driver reports one.
    pub generated_key: Option<i64>,
}

/// A synchronous connection able to run parameterized SQL.
///
/// Arguments are bound positionally, in order, to the `?` placeholders of
/// `sql`.
pub trait Executor {
    /// Runs a statement for its side effect.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn execute(&mut self, sql: &str, args: &[SqlValue]) -> std::result::Result<Execution, BoxError>;

    /// Runs an INSERT and reports the generated key.
    ///
    /// The default implementation reports no key.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn insert(&mut self, sql: &str, args: &[SqlValue]) -> std::result::Result<Execution, BoxError> {
        self.execute(sql, args)
    }

    /// Runs a query and collects every returned row.
    ///
    /// # Errors
    ///
    /// Returns the driver's error.
    fn query(&mut self, sql: &str, args: &[SqlValue]) -> std::result::Result<Vec<Row>, BoxError>;
}

fn execution_error(query: &Query, source: BoxError) -> QueryError {
    QueryError::Execution {
        sql: query.sql.clone(),
        args: query.args.clone(),
        source,
    }
}

pub(crate) fn execute(executor: &mut dyn Executor, query: &Query) -> Result<Execution> {
    debug!(sql = %query.sql, args = query.args.len(), "Executing statement");
    executor
        .execute(&query.sql, &query.args)
        .map_err(|e| execution_error(query, e))
}

pub(crate) fn insert(executor: &mut dyn Executor, query: &Query) -> Result<i64> {
    debug!(sql = %query.sql, args = query.args.len(), "Executing insert");
    let execution = executor
        .insert(&query.sql, &query.args)
        .map_err(|e| execution_error(query, e))?;
    execution.generated_key.ok_or_else(|| QueryError::NoGeneratedKey {
        sql: query.sql.clone(),
    })
}

pub(crate) fn fetch(executor: &mut dyn Executor, query: &Query) -> Result<Vec<Row>> {
    debug!(sql = %query.sql, args = query.args.len(), "Executing query");
    executor
        .query(&query.sql, &query.args)
        .map_err(|e| execution_error(query, e))
}
