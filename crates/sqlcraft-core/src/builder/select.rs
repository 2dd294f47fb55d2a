//! SELECT statement builder.

use super::join::Join;
use super::order::OrderBy;
use super::predicate::Where;
use super::{push_primary_key, push_where};
use crate::error::{QueryError, Result};
use crate::exec::{self, Executor, Row};
use crate::query::Query;
use crate::schema::{AsColumn, ColumnRef, Table};
use crate::value::ToSqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Rows,
    Exists,
    Count,
}

/// A SELECT statement over one table.
///
/// Without an explicit column list every declared column is selected in
/// declaration order.
#[derive(Debug, Clone)]
pub struct Select<'t> {
    table: &'t Table,
    columns: Vec<ColumnRef>,
    mode: Mode,
    joins: Join,
    filter: Where,
    order: OrderBy,
}

impl<'t> Select<'t> {
    /// Creates a new SELECT builder for `table`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
            mode: Mode::Rows,
            joins: Join::for_table(table.name()),
            filter: Where::new(),
            order: OrderBy::new(),
        }
    }

    /// Specifies the columns to select, replacing any previous list.
    #[must_use]
    pub fn columns(mut self, columns: &[&dyn AsColumn]) -> Self {
        self.columns = columns.iter().map(|c| c.as_column()).collect();
        self
    }

    /// Adds joins.
    #[must_use]
    pub fn join(mut self, f: impl FnOnce(&mut Join)) -> Self {
        f(&mut self.joins);
        self
    }

    /// Adds predicates to the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, f: impl FnOnce(&mut Where)) -> Self {
        f(&mut self.filter);
        self
    }

    /// Adds ordering terms or pagination.
    #[must_use]
    pub fn order_by(mut self, f: impl FnOnce(&mut OrderBy)) -> Self {
        f(&mut self.order);
        self
    }

    /// Sets the LIMIT; `None` and non-positive values are ignored.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<Option<i64>>) -> Self {
        self.order.limit(limit);
        self
    }

    /// Sets the OFFSET; `None` and non-positive values are ignored.
    #[must_use]
    pub fn offset(mut self, offset: impl Into<Option<i64>>) -> Self {
        self.order.offset(offset);
        self
    }

    /// Sets LIMIT and OFFSET together.
    #[must_use]
    pub fn pagination(
        mut self,
        limit: impl Into<Option<i64>>,
        offset: impl Into<Option<i64>>,
    ) -> Self {
        self.order.pagination(limit, offset);
        self
    }

    /// Selects a 1-based page, see [`OrderBy::page`].
    #[must_use]
    pub fn page(mut self, page: i64, page_size: impl Into<Option<i64>>) -> Self {
        self.order.page(page, page_size);
        self
    }

    /// Restricts the statement to the row whose primary key equals `value`.
    ///
    /// The key predicate is ANDed with any predicate added before.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingPrimaryKey`] for a table without columns
    /// and [`QueryError::TypeMismatch`] if `value` is null or does not match
    /// the primary key's type.
    pub fn select_primary(mut self, value: impl ToSqlValue) -> Result<Self> {
        push_primary_key(self.table, &mut self.filter, "select_primary", value)?;
        Ok(self)
    }

    /// Renders `SELECT EXISTS(SELECT 1 FROM ...)` instead of rows.
    ///
    /// ORDER BY, LIMIT and OFFSET are not rendered in this mode.
    #[must_use]
    pub fn exists(mut self) -> Self {
        self.mode = Mode::Exists;
        self
    }

    /// Renders `SELECT COUNT(*) FROM ...` instead of rows.
    ///
    /// ORDER BY, LIMIT and OFFSET are not rendered in this mode.
    #[must_use]
    pub fn count(mut self) -> Self {
        self.mode = Mode::Count;
        self
    }

    fn column_list(&self) -> String {
        let columns = if self.columns.is_empty() {
            self.table.columns()
        } else {
            &self.columns
        };
        columns
            .iter()
            .map(ColumnRef::key)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(&self) -> Query {
        let mut sql = String::new();
        let mut args = Vec::new();

        sql.push_str(&match self.mode {
            Mode::Rows => format!("SELECT {} FROM ", self.column_list()),
            Mode::Exists => String::from("SELECT EXISTS(SELECT 1 FROM "),
            Mode::Count => String::from("SELECT COUNT(*) FROM "),
        });
        sql.push_str(self.table.name());
        sql.push_str(self.joins.sql());
        push_where(&mut sql, &mut args, &self.filter);

        match self.mode {
            Mode::Rows => {
                if !self.order.is_empty() {
                    sql.push_str(" ORDER BY ");
                    sql.push_str(&self.order.order_sql());
                }
                let pagination = self.order.pagination_fragment();
                sql.push_str(&pagination.sql);
                args.extend(pagination.args);
            }
            Mode::Exists => sql.push(')'),
            Mode::Count => {}
        }

        Query::new(sql, args)
    }

    /// Runs the statement and maps the first row.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotFound`] when no row matches, or the error of
    /// the executor or of `map`.
    pub fn fetch_one<R>(
        &self,
        executor: &mut dyn Executor,
        map: impl FnOnce(&Row) -> Result<R>,
    ) -> Result<R> {
        let query = self.build();
        let rows = exec::fetch(executor, &query)?;
        match rows.first() {
            Some(row) => map(row),
            None => Err(QueryError::NotFound { sql: query.sql }),
        }
    }

    /// Runs the statement and maps every row.
    ///
    /// No matching row is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns the error of the executor or of `map`.
    pub fn fetch_all<R>(
        &self,
        executor: &mut dyn Executor,
        map: impl FnMut(&Row) -> Result<R>,
    ) -> Result<Vec<R>> {
        let query = self.build();
        exec::fetch(executor, &query)?.iter().map(map).collect()
    }

    /// Runs the statement in EXISTS mode.
    ///
    /// # Errors
    ///
    /// Returns the error of the executor or a decode error.
    pub fn fetch_exists(&self, executor: &mut dyn Executor) -> Result<bool> {
        self.clone().exists().fetch_one(executor, |row| row.get_at(0))
    }

    /// Runs the statement in COUNT mode.
    ///
    /// # Errors
    ///
    /// Returns the error of the executor or a decode error.
    pub fn fetch_count(&self, executor: &mut dyn Executor) -> Result<i64> {
        self.clone().count().fetch_one(executor, |row| row.get_at(0))
    }
}
