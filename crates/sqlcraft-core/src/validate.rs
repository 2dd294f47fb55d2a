//! Pre-mutation checks.
//!
//! A [`Validator`] is an ordered list of [`Check`]s run against the
//! database before an INSERT or UPDATE is issued. Checks run in registration
//! order and the first failure stops the pipeline; the mutation is then never
//! sent.
//!
//! ```rust
//! use sqlcraft_core::validate::{CheckResult, Validator};
//!
//! let validator = Validator::new()
//!     .check(|_executor: &mut dyn sqlcraft_core::Executor| Ok(CheckResult::pass()));
//! assert_eq!(validator.len(), 1);
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::builder::{check_value, push_where, Where};
use crate::error::{QueryError, Result};
use crate::exec::{self, Executor};
use crate::query::Query;
use crate::schema::{AsColumn, Column, ColumnRef};
use crate::value::{ColumnValue, IntoValue, SqlValue};

/// Outcome of a single check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    pub ok: bool,
    pub message: Option<String>,
    /// The offending field, when the failure is about one.
    pub field: Option<String>,
}

impl CheckResult {
    /// A passing result.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            ok: true,
            message: None,
            field: None,
        }
    }

    /// A failing result for `field`.
    #[must_use]
    pub fn fail(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            field: Some(field.into()),
        }
    }

    /// Converts a failure into [`QueryError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns the failure itself.
    pub fn into_result(self) -> Result<()> {
        if self.ok {
            Ok(())
        } else {
            Err(QueryError::Validation(self))
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.field, &self.message) {
            (Some(field), Some(message)) => write!(f, "{field}: {message}"),
            (None, Some(message)) => f.write_str(message),
            (Some(field), None) => write!(f, "{field}: check failed"),
            (None, None) if self.ok => f.write_str("ok"),
            (None, None) => f.write_str("check failed"),
        }
    }
}

/// A single validation step.
pub trait Check {
    /// Runs the check.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the check's own query fails. A rejected
    /// value is an `Ok` result with `ok == false`, not an error.
    fn check(&self, executor: &mut dyn Executor) -> Result<CheckResult>;
}

impl<F> Check for F
where
    F: Fn(&mut dyn Executor) -> Result<CheckResult>,
{
    fn check(&self, executor: &mut dyn Executor) -> Result<CheckResult> {
        self(executor)
    }
}

fn exists_query(table: &str, filter: &Where) -> Query {
    let mut sql = format!("SELECT EXISTS(SELECT 1 FROM {table}");
    let mut args = Vec::new();
    push_where(&mut sql, &mut args, filter);
    sql.push(')');
    Query::new(sql, args)
}

fn fetch_exists(executor: &mut dyn Executor, query: &Query) -> Result<bool> {
    match exec::fetch(executor, query)?.first() {
        Some(row) => row.get_at(0),
        None => Ok(false),
    }
}

fn equality_filter(pairs: &[(ColumnRef, SqlValue)]) -> Where {
    let mut filter = Where::new();
    for (column, value) in pairs {
        filter.eq_value(column.key(), value.clone());
    }
    filter
}

/// Whether matching rows must be absent or present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Absent,
    Present,
}

/// Checks that rows matching a predicate are absent or present.
#[derive(Debug, Clone)]
pub struct ExistenceCheck {
    query: Query,
    expect: Expect,
    field: String,
    message: String,
}

impl ExistenceCheck {
    /// Passes when no row of `table` matches `filter`.
    #[must_use]
    pub fn absent(table: &str, filter: &Where, field: &str, message: impl Into<String>) -> Self {
        Self {
            query: exists_query(table, filter),
            expect: Expect::Absent,
            field: field.to_owned(),
            message: message.into(),
        }
    }

    /// Passes when at least one row of `table` matches `filter`.
    #[must_use]
    pub fn present(table: &str, filter: &Where, field: &str, message: impl Into<String>) -> Self {
        Self {
            query: exists_query(table, filter),
            expect: Expect::Present,
            field: field.to_owned(),
            message: message.into(),
        }
    }

    /// The `SELECT EXISTS(...)` statement this check runs.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }
}

impl Check for ExistenceCheck {
    fn check(&self, executor: &mut dyn Executor) -> Result<CheckResult> {
        let exists = fetch_exists(executor, &self.query)?;
        let ok = match self.expect {
            Expect::Absent => !exists,
            Expect::Present => exists,
        };
        Ok(if ok {
            CheckResult::pass()
        } else {
            CheckResult::fail(&self.field, &self.message)
        })
    }
}

/// An ordered, short-circuiting list of checks.
#[derive(Default)]
pub struct Validator<'a> {
    checks: Vec<Box<dyn Check + 'a>>,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Registers an arbitrary check.
    #[must_use]
    pub fn check(mut self, check: impl Check + 'a) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Requires that no row already holds `value` in `column`.
    ///
    /// A null value passes.
    #[must_use]
    pub fn unique<T: ColumnValue>(self, column: &Column<T>, value: impl IntoValue<T>) -> Self {
        match value.into_value() {
            Some(value) => {
                let mut filter = Where::new();
                filter.eq(column, value);
                self.check(ExistenceCheck::absent(
                    column.table_name(),
                    &filter,
                    column.key(),
                    format!("{} already exists", column.key()),
                ))
            }
            None => self,
        }
    }

    /// Requires that no row already holds this combination of values.
    ///
    /// Passes if any of the values is null.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::TableMismatch`] if the columns do not all belong
    /// to one table and [`QueryError::TypeMismatch`] if a value does not
    /// match its column's type.
    pub fn unique_together(self, pairs: &[(&dyn AsColumn, SqlValue)]) -> Result<Self> {
        const OPERATION: &str = "unique_together";
        let pairs: Vec<(ColumnRef, SqlValue)> = pairs
            .iter()
            .map(|(column, value)| (column.as_column(), value.clone()))
            .collect();
        let Some((first, _)) = pairs.first() else {
            return Ok(self);
        };
        for (column, value) in &pairs {
            if column.table_name() != first.table_name() {
                return Err(QueryError::TableMismatch {
                    operation: OPERATION,
                    column: column.key().to_owned(),
                    expected: first.table_name().to_owned(),
                    found: column.table_name().to_owned(),
                });
            }
            check_value(OPERATION, column, value)?;
        }
        if pairs.iter().any(|(_, value)| value.is_null()) {
            return Ok(self);
        }
        let keys: Vec<&str> = pairs.iter().map(|(column, _)| column.key()).collect();
        let field = keys.join(", ");
        let check = ExistenceCheck::absent(
            first.table_name(),
            &equality_filter(&pairs),
            &field,
            format!("combination of {field} already exists"),
        );
        Ok(self.check(check))
    }

    /// Requires that `target` holds `value` in some row.
    ///
    /// Used for foreign keys: `target` is the referenced column. A null value
    /// passes.
    #[must_use]
    pub fn references<T: ColumnValue>(self, target: &Column<T>, value: impl IntoValue<T>) -> Self {
        match value.into_value() {
            Some(value) => {
                let pairs = [(target.to_ref(), value.to_sql_value())];
                self.check(ExistenceCheck::present(
                    target.table_name(),
                    &equality_filter(&pairs),
                    target.key(),
                    format!(
                        "no {} row with {} = {}",
                        target.table_name(),
                        target.key(),
                        pairs[0].1
                    ),
                ))
            }
            None => self,
        }
    }

    /// Requires that some row of `table` matches the predicates built by `f`.
    #[must_use]
    pub fn exists_where(
        self,
        table: &str,
        field: &str,
        message: impl Into<String>,
        f: impl FnOnce(&mut Where),
    ) -> Self {
        let mut filter = Where::new();
        f(&mut filter);
        self.check(ExistenceCheck::present(table, &filter, field, message))
    }

    /// Requires that no row of `table` matches the predicates built by `f`.
    #[must_use]
    pub fn absent_where(
        self,
        table: &str,
        field: &str,
        message: impl Into<String>,
        f: impl FnOnce(&mut Where),
    ) -> Self {
        let mut filter = Where::new();
        f(&mut filter);
        self.check(ExistenceCheck::absent(table, &filter, field, message))
    }

    /// Runs every check in order and returns the first failure.
    ///
    /// # Errors
    ///
    /// Returns an execution error raised by a check's own query.
    pub fn run(&self, executor: &mut dyn Executor) -> Result<CheckResult> {
        for (index, check) in self.checks.iter().enumerate() {
            let result = check.check(executor)?;
            if !result.ok {
                warn!(
                    index,
                    field = ?result.field,
                    message = ?result.message,
                    "Validation check failed"
                );
                return Ok(result);
            }
        }
        debug!(checks = self.checks.len(), "All validation checks passed");
        Ok(CheckResult::pass())
    }
}

impl fmt::Debug for Validator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("checks", &self.checks.len())
            .finish()
    }
}
