//! JOIN clause builder.

use std::fmt;
use std::sync::Arc;

use crate::query::Fragment;
use crate::schema::{AsColumn, ColumnRef};

/// Join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Outer,
    Full,
}

impl JoinType {
    /// Returns the SQL keyword for this join type.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Outer => "OUTER JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Accumulates column-to-column equality joins.
///
/// When the builder knows the statement's main table, the operand belonging
/// to that table always renders on the left of the `ON` condition and the
/// other operand's table is the one joined, whatever order the columns were
/// passed in. Between two foreign tables the call order is kept.
#[derive(Debug, Clone, Default)]
pub struct Join {
    main: Option<Arc<str>>,
    sql: String,
}

impl Join {
    /// Creates a builder with no main table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for a statement over `table`.
    #[must_use]
    pub fn for_table(table: &str) -> Self {
        Self {
            main: Some(Arc::from(table)),
            sql: String::new(),
        }
    }

    /// Adds an INNER JOIN.
    pub fn join(&mut self, left: &impl AsColumn, right: &impl AsColumn) -> &mut Self {
        self.join_with(JoinType::Inner, left, right)
    }

    /// Adds a LEFT JOIN.
    pub fn left_join(&mut self, left: &impl AsColumn, right: &impl AsColumn) -> &mut Self {
        self.join_with(JoinType::Left, left, right)
    }

    /// Adds a join of the given type.
    pub fn join_with(
        &mut self,
        join_type: JoinType,
        left: &impl AsColumn,
        right: &impl AsColumn,
    ) -> &mut Self {
        let (left, right) = self.canonical(left.as_column(), right.as_column());
        self.sql.push_str(&format!(
            " {join_type} {joined} ON {main}.{main_key} = {joined}.{joined_key}",
            joined = right.table_name(),
            main = left.table_name(),
            main_key = left.key(),
            joined_key = right.key(),
        ));
        self
    }

    fn canonical(&self, left: ColumnRef, right: ColumnRef) -> (ColumnRef, ColumnRef) {
        match self.main.as_deref() {
            Some(main) if right.table_name() == main && left.table_name() != main => (right, left),
            _ => (left, right),
        }
    }

    /// The rendered joins, each with a leading space.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns `true` if no join has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Finishes the builder. Joins never carry arguments.
    #[must_use]
    pub fn build(self) -> Fragment {
        Fragment::new(self.sql, Vec::new())
    }
}
