//! Error types for statement building and execution.

use thiserror::Error;

use crate::schema::ColumnType;
use crate::validate::CheckResult;
use crate::value::SqlValue;

/// Boxed error reported by an [`Executor`](crate::exec::Executor) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while building or running a statement.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A positional insert received a different number of values than columns.
    #[error("{operation}: expected {expected} values, got {actual}")]
    ValueCountMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A primary-key helper was used on a table without columns.
    #[error("{operation}: table `{table}` has no primary key")]
    MissingPrimaryKey {
        operation: &'static str,
        table: String,
    },

    /// A dynamically supplied value does not match the declared column type.
    #[error("{operation}: column `{column}` expects {expected}, got {found}")]
    TypeMismatch {
        operation: &'static str,
        column: String,
        expected: ColumnType,
        found: &'static str,
    },

    /// Columns combined into one check belong to different tables.
    #[error("{operation}: column `{column}` belongs to `{found}`, not `{expected}`")]
    TableMismatch {
        operation: &'static str,
        column: String,
        expected: String,
        found: String,
    },

    /// An UPDATE was rendered without any `SET` assignment.
    #[error("update on `{table}` has no assignments")]
    EmptyAssignments { table: String },

    /// A validation check rejected the mutation before any SQL was sent.
    #[error("validation failed: {0}")]
    Validation(CheckResult),

    /// A single-row fetch returned no row.
    #[error("no row returned by `{sql}`")]
    NotFound { sql: String },

    /// The executor reported a failure.
    #[error("failed to execute `{sql}` with args {args:?}: {source}")]
    Execution {
        sql: String,
        args: Vec<SqlValue>,
        #[source]
        source: BoxError,
    },

    /// An INSERT succeeded but the driver reported no generated key.
    #[error("insert did not produce an id: `{sql}`")]
    NoGeneratedKey { sql: String },

    /// A result value could not be converted to the requested type.
    #[error("cannot decode column `{column}`: {message}")]
    Decode { column: String, message: String },
}

impl QueryError {
    /// Returns `true` for the not-found condition of a single-row fetch.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when a validation check rejected the mutation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the failed check, if this is a validation error.
    #[must_use]
    pub const fn check_result(&self) -> Option<&CheckResult> {
        match self {
            Self::Validation(result) => Some(result),
            _ => None,
        }
    }
}

/// Result type alias for sqlcraft operations.
pub type Result<T> = std::result::Result<T, QueryError>;
