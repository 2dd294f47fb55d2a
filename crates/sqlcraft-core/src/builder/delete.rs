//! DELETE statement builder.

use super::predicate::Where;
use super::{push_primary_key, push_where};
use crate::error::Result;
use crate::exec::{self, Executor};
use crate::query::Query;
use crate::schema::Table;
use crate::validate::Validator;
use crate::value::ToSqlValue;

/// A DELETE statement over one table.
#[derive(Debug)]
pub struct Delete<'t> {
    table: &'t Table,
    filter: Where,
    validator: Option<Validator<'t>>,
}

impl<'t> Delete<'t> {
    /// Creates a new DELETE builder for `table`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            filter: Where::new(),
            validator: None,
        }
    }

    /// Adds predicates to the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, f: impl FnOnce(&mut Where)) -> Self {
        f(&mut self.filter);
        self
    }

    /// Restricts the delete to the row whose primary key equals `value`.
    ///
    /// The key predicate is ANDed with any predicate added before.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingPrimaryKey`](crate::QueryError::MissingPrimaryKey)
    /// for a table without columns and
    /// [`QueryError::TypeMismatch`](crate::QueryError::TypeMismatch) if
    /// `value` is null or does not match the primary key's type.
    pub fn delete_primary(mut self, value: impl ToSqlValue) -> Result<Self> {
        push_primary_key(self.table, &mut self.filter, "delete_primary", value)?;
        Ok(self)
    }

    /// Runs `validator` before the DELETE is issued by [`persist`](Self::persist).
    #[must_use]
    pub fn validate(mut self, validator: Validator<'t>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(&self) -> Query {
        let mut sql = format!("DELETE FROM {}", self.table.name());
        let mut args = Vec::new();
        push_where(&mut sql, &mut args, &self.filter);
        Query::new(sql, args)
    }

    /// Validates, then runs the DELETE and returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Validation`](crate::QueryError::Validation)
    /// without touching the table if a check fails, or the executor's error.
    pub fn persist(&self, executor: &mut dyn Executor) -> Result<u64> {
        if let Some(validator) = &self.validator {
            validator.run(executor)?.into_result()?;
        }
        Ok(exec::execute(executor, &self.build())?.rows_affected)
    }
}
