//! UPDATE statement builder.
//!
//! Unlike INSERT, a null assignment is kept: it renders as
//! `<key> = COALESCE(?, <key>)` with NULL bound, so the database keeps the
//! stored value. This gives partial updates from optional fields.
//!
//! An UPDATE without predicates touches every row of the table. The builder
//! does not forbid it; callers are expected to add a WHERE clause or use
//! [`Update::update_primary`].

use super::predicate::Where;
use super::{push_primary_key, push_where};
use crate::error::{QueryError, Result};
use crate::exec::{self, Executor};
use crate::query::Query;
use crate::schema::{Column, ColumnRef, Table};
use crate::validate::Validator;
use crate::value::{ColumnValue, IntoValue, SqlValue, ToSqlValue};

/// An UPDATE statement over one table.
pub struct Update<'t> {
    table: &'t Table,
    assignments: Vec<(ColumnRef, SqlValue)>,
    filter: Where,
    validator: Option<Validator<'t>>,
}

impl<'t> Update<'t> {
    /// Creates a new UPDATE builder for `table`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            filter: Where::new(),
            validator: None,
        }
    }

    /// Assigns `value` to `column`; `None` keeps the stored value.
    #[must_use]
    pub fn set<T: ColumnValue>(mut self, column: &Column<T>, value: impl IntoValue<T>) -> Self {
        let value = value.into_value().to_sql_value();
        self.assignments.push((column.to_ref(), value));
        self
    }

    /// Adds predicates to the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, f: impl FnOnce(&mut Where)) -> Self {
        f(&mut self.filter);
        self
    }

    /// Restricts the update to the row whose primary key equals `value`.
    ///
    /// The key predicate is ANDed with any predicate added before.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingPrimaryKey`] for a table without columns
    /// and [`QueryError::TypeMismatch`] if `value` is null or does not match
    /// the primary key's type.
    pub fn update_primary(mut self, value: impl ToSqlValue) -> Result<Self> {
        push_primary_key(self.table, &mut self.filter, "update_primary", value)?;
        Ok(self)
    }

    /// Runs `validator` before the UPDATE is issued by [`persist`](Self::persist).
    #[must_use]
    pub fn validate(mut self, validator: Validator<'t>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Builds the statement.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyAssignments`] if no column was set.
    pub fn build(&self) -> Result<Query> {
        if self.assignments.is_empty() {
            return Err(QueryError::EmptyAssignments {
                table: self.table.name().to_owned(),
            });
        }

        let mut args = Vec::with_capacity(self.assignments.len() + self.filter.args().len());
        let sets: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, value)| {
                args.push(value.clone());
                if value.is_null() {
                    format!("{key} = COALESCE(?, {key})", key = column.key())
                } else {
                    format!("{} = ?", column.key())
                }
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table.name(), sets.join(", "));
        push_where(&mut sql, &mut args, &self.filter);
        Ok(Query::new(sql, args))
    }

    /// Validates, then runs the UPDATE and returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Validation`] without touching the table if a
    /// check fails, or the build or executor error.
    pub fn persist(&self, executor: &mut dyn Executor) -> Result<u64> {
        let query = self.build()?;
        if let Some(validator) = &self.validator {
            validator.run(executor)?.into_result()?;
        }
        Ok(exec::execute(executor, &query)?.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Users {
        table: Table,
        id: Column<i32>,
        name: Column<String>,
        email: Column<String>,
        record_status: Column<String>,
        created_at: Column<i64>,
    }

    fn users() -> Users {
        let mut table = Table::new("user");
        let id = table.column("id");
        let name = table.column("name");
        let email = table.column("email");
        let record_status = table.column("record_status");
        let created_at = table.column("created_at");
        Users {
            table,
            id,
            name,
            email,
            record_status,
            created_at,
        }
    }

    #[test]
    fn test_update_with_values() {
        let u = users();
        let query = Update::new(&u.table)
            .set(&u.name, "John Doe")
            .set(&u.email, "johndoe@email.com")
            .set(&u.record_status, "active")
            .set(&u.created_at, 1_234_567_890_i64)
            .where_clause(|w| {
                w.eq(&u.id, 1);
            })
            .build()
            .unwrap();
        assert_eq!(
            query.sql,
            "UPDATE user SET name = ?, email = ?, record_status = ?, created_at = ? WHERE id = ?"
        );
        assert_eq!(
            query.args,
            vec![
                SqlValue::Text(String::from("John Doe")),
                SqlValue::Text(String::from("johndoe@email.com")),
                SqlValue::Text(String::from("active")),
                SqlValue::Long(1_234_567_890),
                SqlValue::Int(1),
            ]
        );
    }

    #[test]
    fn test_null_assignment_uses_coalesce() {
        let u = users();
        let query = Update::new(&u.table)
            .set(&u.name, None)
            .where_clause(|w| {
                w.eq(&u.id, 1);
            })
            .build()
            .unwrap();
        assert_eq!(
            query.sql,
            "UPDATE user SET name = COALESCE(?, name) WHERE id = ?"
        );
        assert_eq!(query.args, vec![SqlValue::Null, SqlValue::Int(1)]);
    }

    #[test]
    fn test_mixed_assignments() {
        let u = users();
        let status: Option<String> = None;
        let query = Update::new(&u.table)
            .set(&u.name, "John Doe")
            .set(&u.record_status, status)
            .set(&u.created_at, None)
            .update_primary(1)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            query.sql,
            "UPDATE user SET name = ?, record_status = COALESCE(?, record_status), \
             created_at = COALESCE(?, created_at) WHERE id = ?"
        );
        assert_eq!(query.args.len(), 4);
        assert_eq!(query.args.len(), query.placeholder_count());
    }

    #[test]
    fn test_update_primary_keeps_earlier_predicates() {
        let u = users();
        let query = Update::new(&u.table)
            .set(&u.name, "x")
            .where_clause(|w| {
                w.eq(&u.record_status, "archived");
            })
            .update_primary(5)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            query.sql,
            "UPDATE user SET name = ? WHERE record_status = ? AND id = ?"
        );
        assert_eq!(
            query.args,
            vec![
                SqlValue::Text(String::from("x")),
                SqlValue::Text(String::from("archived")),
                SqlValue::Int(5),
            ]
        );
    }

    #[test]
    fn test_without_where_updates_all_rows() {
        let u = users();
        let query = Update::new(&u.table).set(&u.record_status, "archived").build().unwrap();
        assert_eq!(query.sql, "UPDATE user SET record_status = ?");
    }

    #[test]
    fn test_empty_assignments() {
        let u = users();
        let err = Update::new(&u.table).update_primary(1).unwrap().build().unwrap_err();
        assert!(matches!(err, QueryError::EmptyAssignments { .. }));
    }

    #[test]
    fn test_update_primary_wrong_type() {
        let u = users();
        assert!(matches!(
            Update::new(&u.table).update_primary(1_i64).err(),
            Some(QueryError::TypeMismatch { .. })
        ));
    }
}
