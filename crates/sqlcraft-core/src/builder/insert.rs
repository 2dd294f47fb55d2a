//! INSERT statement builder.
//!
//! A column whose value is null is left out of the statement entirely: it
//! appears neither in the column list nor in the VALUES list, so the
//! database applies its own default. Nothing is ever bound as NULL.

use std::collections::HashMap;

use super::check_value;
use crate::error::{QueryError, Result};
use crate::exec::{self, Executor};
use crate::query::Query;
use crate::schema::{AsColumn, Column, ColumnRef, Table};
use crate::validate::Validator;
use crate::value::{ColumnValue, IntoValue, SqlValue};

/// An INSERT of one row.
pub struct Insert<'t> {
    table: &'t Table,
    columns: Vec<ColumnRef>,
    values: Vec<SqlValue>,
    validator: Option<Validator<'t>>,
}

impl<'t> Insert<'t> {
    /// Creates a new INSERT builder for `table`.
    #[must_use]
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
            validator: None,
        }
    }

    fn push(&mut self, column: ColumnRef, value: SqlValue) {
        if value.is_null() {
            return;
        }
        self.columns.push(column);
        self.values.push(value);
    }

    /// Assigns `value` to `column`; `None` leaves the column out.
    #[must_use]
    pub fn set<T: ColumnValue>(mut self, column: &Column<T>, value: impl IntoValue<T>) -> Self {
        if let Some(value) = value.into_value() {
            self.push(column.to_ref(), value.to_sql_value());
        }
        self
    }

    /// Starts a positional assignment of `columns`.
    #[must_use]
    pub fn columns(self, columns: &[&dyn AsColumn]) -> InsertColumns<'t> {
        InsertColumns {
            insert: self,
            columns: columns.iter().map(|c| c.as_column()).collect(),
        }
    }

    /// Assigns every declared column whose key is present in `values`.
    ///
    /// Keys missing from the map are skipped, as are null values.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::TypeMismatch`] if a value does not match its
    /// column's type.
    pub fn values_from_map(mut self, values: &HashMap<String, SqlValue>) -> Result<Self> {
        let table = self.table;
        for column in table.columns() {
            if let Some(value) = values.get(column.key()) {
                check_value("insert from map", column, value)?;
                self.push(column.clone(), value.clone());
            }
        }
        Ok(self)
    }

    /// Runs `validator` before the INSERT is issued by [`persist`](Self::persist).
    #[must_use]
    pub fn validate(mut self, validator: Validator<'t>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Builds the statement.
    ///
    /// With no assigned column the statement is
    /// `INSERT INTO <table> DEFAULT VALUES`.
    #[must_use]
    pub fn build(&self) -> Query {
        if self.columns.is_empty() {
            return Query::new(
                format!("INSERT INTO {} DEFAULT VALUES", self.table.name()),
                Vec::new(),
            );
        }
        let keys: Vec<&str> = self.columns.iter().map(ColumnRef::key).collect();
        let placeholders: Vec<&str> = self.values.iter().map(|_| "?").collect();
        Query::new(
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table.name(),
                keys.join(", "),
                placeholders.join(", ")
            ),
            self.values.clone(),
        )
    }

    /// Validates, then runs the INSERT and returns the generated key.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Validation`] without touching the table if a
    /// check fails, [`QueryError::NoGeneratedKey`] if the driver reports no
    /// key, or the executor's error.
    pub fn persist(&self, executor: &mut dyn Executor) -> Result<i64> {
        if let Some(validator) = &self.validator {
            validator.run(executor)?.into_result()?;
        }
        exec::insert(executor, &self.build())
    }
}

/// A positional INSERT waiting for its values.
pub struct InsertColumns<'t> {
    insert: Insert<'t>,
    columns: Vec<ColumnRef>,
}

impl<'t> InsertColumns<'t> {
    /// Supplies one value per column, in column order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ValueCountMismatch`] if the number of values
    /// differs from the number of columns and [`QueryError::TypeMismatch`]
    /// if a value does not match its column's type.
    pub fn values(self, values: Vec<SqlValue>) -> Result<Insert<'t>> {
        if values.len() != self.columns.len() {
            return Err(QueryError::ValueCountMismatch {
                operation: "insert values",
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        let mut insert = self.insert;
        for (column, value) in self.columns.into_iter().zip(values) {
            check_value("insert values", &column, &value)?;
            insert.push(column, value);
        }
        Ok(insert)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    struct Accounts {
        table: Table,
        id: Column<i32>,
        balance: Column<Decimal>,
        owner: Column<String>,
    }

    fn accounts() -> Accounts {
        let mut table = Table::with_prefix("account");
        let id = table.column("id");
        let balance = table.column("balance");
        let owner = table.column("owner");
        Accounts {
            table,
            id,
            balance,
            owner,
        }
    }

    #[test]
    fn test_null_column_is_omitted() {
        let a = accounts();
        let query = Insert::new(&a.table)
            .set(&a.id, 1)
            .set(&a.balance, None)
            .build();
        assert_eq!(query.sql, "INSERT INTO account (account_id) VALUES (?)");
        assert_eq!(query.args, vec![SqlValue::Int(1)]);
    }

    #[test]
    fn test_all_columns() {
        let a = accounts();
        let query = Insert::new(&a.table)
            .set(&a.id, 1)
            .set(&a.balance, Decimal::new(1050, 2))
            .set(&a.owner, "ann")
            .build();
        assert_eq!(
            query.sql,
            "INSERT INTO account (account_id, account_balance, account_owner) VALUES (?, ?, ?)"
        );
        assert_eq!(query.args.len(), 3);
        assert_eq!(query.args[1], SqlValue::Decimal(Decimal::new(1050, 2)));
    }

    #[test]
    fn test_no_columns_uses_default_values() {
        let a = accounts();
        let query = Insert::new(&a.table).set(&a.owner, None).build();
        assert_eq!(query.sql, "INSERT INTO account DEFAULT VALUES");
        assert!(query.args.is_empty());
    }

    #[test]
    fn test_positional_values() {
        let a = accounts();
        let query = Insert::new(&a.table)
            .columns(&[&a.id, &a.owner, &a.balance])
            .values(vec![
                SqlValue::Int(2),
                SqlValue::Null,
                SqlValue::Decimal(Decimal::ONE),
            ])
            .unwrap()
            .build();
        assert_eq!(
            query.sql,
            "INSERT INTO account (account_id, account_balance) VALUES (?, ?)"
        );
        assert_eq!(
            query.args,
            vec![SqlValue::Int(2), SqlValue::Decimal(Decimal::ONE)]
        );
    }

    #[test]
    fn test_positional_count_mismatch() {
        let a = accounts();
        let err = Insert::new(&a.table)
            .columns(&[&a.id, &a.owner])
            .values(vec![SqlValue::Int(2)])
            .err()
            .unwrap();
        assert!(matches!(
            err,
            QueryError::ValueCountMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_positional_type_mismatch() {
        let a = accounts();
        let err = Insert::new(&a.table)
            .columns(&[&a.id])
            .values(vec![SqlValue::Text(String::from("one"))])
            .err()
            .unwrap();
        assert!(matches!(err, QueryError::TypeMismatch { .. }));
    }

    #[test]
    fn test_values_from_map() {
        let a = accounts();
        let mut values = HashMap::new();
        values.insert(String::from("account_owner"), SqlValue::Text(String::from("bo")));
        values.insert(String::from("account_id"), SqlValue::Int(9));
        values.insert(String::from("unrelated"), SqlValue::Int(0));
        values.insert(String::from("account_balance"), SqlValue::Null);

        let query = Insert::new(&a.table).values_from_map(&values).unwrap().build();
        assert_eq!(
            query.sql,
            "INSERT INTO account (account_id, account_owner) VALUES (?, ?)"
        );
        assert_eq!(
            query.args,
            vec![SqlValue::Int(9), SqlValue::Text(String::from("bo"))]
        );
    }

    #[test]
    fn test_values_from_map_type_mismatch() {
        let a = accounts();
        let mut values = HashMap::new();
        values.insert(String::from("account_id"), SqlValue::Long(9));
        assert!(Insert::new(&a.table).values_from_map(&values).is_err());
    }
}
