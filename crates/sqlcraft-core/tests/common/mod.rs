#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use sqlcraft_core::{BoxError, Execution, Executor, Row, SqlValue};

sqlcraft_core::table! {
    pub struct Accounts = "account", prefixed {
        id: i32,
        balance: sqlcraft_core::Decimal,
    }
}

sqlcraft_core::table! {
    pub struct Users = "user" {
        #[primary_key]
        id: i32,
        name: String,
        email: String,
        password: String,
        record_status: String,
        created_at: i64,
    }
}

sqlcraft_core::table! {
    pub struct Employees = "employee" {
        id: i32,
        name: String,
        age: i32,
        salary: f64,
        department: String,
        is_active: bool,
        created_at: i64,
    }
}

sqlcraft_core::table! {
    pub struct Departments = "department" {
        id: i32,
        name: String,
        location_id: i32,
    }
}

sqlcraft_core::table! {
    pub struct Locations = "location" {
        id: i32,
        city: String,
    }
}

/// Executor double recording every statement and replaying canned results.
#[derive(Default)]
pub struct Recorder {
    pub statements: Vec<(String, Vec<SqlValue>)>,
    pub results: VecDeque<Vec<Row>>,
    pub generated_key: Option<i64>,
    pub fail_with: Option<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the rows returned by the next query.
    pub fn returning(mut self, columns: &[&str], rows: Vec<Vec<SqlValue>>) -> Self {
        let columns: Arc<[String]> = columns.iter().map(|c| (*c).to_owned()).collect();
        self.results.push_back(
            rows.into_iter()
                .map(|values| Row::new(Arc::clone(&columns), values))
                .collect(),
        );
        self
    }

    /// Queues a single-cell boolean result, as returned by `SELECT EXISTS`.
    pub fn returning_exists(self, exists: bool) -> Self {
        self.returning(&["exists"], vec![vec![SqlValue::Long(i64::from(exists))]])
    }

    pub fn with_generated_key(mut self, key: i64) -> Self {
        self.generated_key = Some(key);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_owned());
        self
    }

    pub fn sql(&self) -> Vec<&str> {
        self.statements.iter().map(|(sql, _)| sql.as_str()).collect()
    }

    fn record(&mut self, sql: &str, args: &[SqlValue]) -> Result<(), BoxError> {
        self.statements.push((sql.to_owned(), args.to_vec()));
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

impl Executor for Recorder {
    fn execute(&mut self, sql: &str, args: &[SqlValue]) -> Result<Execution, BoxError> {
        self.record(sql, args)?;
        Ok(Execution {
            rows_affected: 1,
            generated_key: None,
        })
    }

    fn insert(&mut self, sql: &str, args: &[SqlValue]) -> Result<Execution, BoxError> {
        self.record(sql, args)?;
        Ok(Execution {
            rows_affected: 1,
            generated_key: self.generated_key,
        })
    }

    fn query(&mut self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>, BoxError> {
        self.record(sql, args)?;
        Ok(self.results.pop_front().unwrap_or_default())
    }
}
