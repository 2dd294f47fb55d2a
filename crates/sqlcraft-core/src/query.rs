//! Rendered statements.

use std::fmt;

use crate::error::Result;
use crate::exec::{self, Execution, Executor};
use crate::value::SqlValue;

/// One renderable piece of a statement: clause text plus its arguments.
///
/// Arguments are in the left-to-right order of the `?` placeholders in
/// `sql`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fragment {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl Fragment {
    #[must_use]
    pub fn new(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Returns `true` when the fragment renders no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// A complete statement ready for execution.
///
/// Equality and hashing are structural over the SQL text and the
/// arguments, so rendering the same builder configuration twice yields equal
/// queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl Query {
    #[must_use]
    pub fn new(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Returns the SQL text and argument list as a pair.
    #[must_use]
    pub fn sql_args(&self) -> (&str, &[SqlValue]) {
        (&self.sql, &self.args)
    }

    /// Number of `?` placeholders in the SQL text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Sends the statement to `executor` for its side effect.
    ///
    /// Used for statements that are not produced by a mutation builder,
    /// such as the output of [`create_table`](crate::ddl::create_table).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Execution`](crate::QueryError::Execution) if the
    /// executor fails.
    pub fn execute(&self, executor: &mut dyn Executor) -> Result<Execution> {
        exec::execute(executor, self)
    }
}

impl From<Query> for (String, Vec<SqlValue>) {
    fn from(query: Query) -> Self {
        (query.sql, query.args)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQL = {}; ARGS = [", self.sql)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let query = Query::new(
            "SELECT name FROM user WHERE id = ? AND email = ?",
            vec![SqlValue::Int(1), SqlValue::Null],
        );
        assert_eq!(
            query.to_string(),
            "SQL = SELECT name FROM user WHERE id = ? AND email = ?; ARGS = [1, null]"
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Query::new("DELETE FROM user WHERE id = ?", vec![SqlValue::Int(1)]);
        let b = Query::new(String::from("DELETE FROM user WHERE id = ?"), vec![SqlValue::Int(1)]);
        let c = Query::new("DELETE FROM user WHERE id = ?", vec![SqlValue::Long(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.placeholder_count(), 1);
    }

    #[test]
    fn test_into_pair() {
        let (sql, args): (String, Vec<SqlValue>) = Query::new("SELECT 1", vec![]).into();
        assert_eq!(sql, "SELECT 1");
        assert!(args.is_empty());
    }
}
