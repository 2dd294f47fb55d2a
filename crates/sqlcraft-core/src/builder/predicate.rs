//! WHERE clause builder.
//!
//! [`Where`] accumulates predicates left to right into a single clause and
//! its argument list. Grouping with [`Where::or`], [`Where::and`] and
//! [`Where::not`] is tracked with an explicit stack of frames: each frame
//! knows the keyword joining its children and whether it has emitted its
//! first child yet.
//!
//! Null inputs are never an error. A predicate given `None` (or an empty
//! list, or a half-open range) is skipped entirely, which makes optional
//! filters compose without branching:
//!
//! ```rust
//! use sqlcraft_core::builder::Where;
//! use sqlcraft_core::schema::{Column, Table};
//!
//! let mut table = Table::new("employee");
//! let department: Column<String> = table.column("department");
//! let age: Column<i32> = table.column("age");
//!
//! let min_age: Option<i32> = None;
//! let mut filter = Where::new();
//! filter.eq(&department, "Sales").gte(&age, min_age);
//!
//! let fragment = filter.build();
//! assert_eq!(fragment.sql, "department = ?");
//! assert_eq!(fragment.args.len(), 1);
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use tracing::trace;

use crate::query::Fragment;
use crate::schema::Column;
use crate::value::{ColumnValue, IntoValue, SqlValue, ToSqlValue};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Lte => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Gte => write!(f, ">="),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joiner {
    And,
    Or,
}

impl Joiner {
    const fn keyword(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    joiner: Joiner,
    first: bool,
}

impl Frame {
    const fn new(joiner: Joiner) -> Self {
        Self {
            joiner,
            first: true,
        }
    }
}

/// Builder for the body of a WHERE clause.
#[derive(Debug, Clone)]
pub struct Where {
    sql: String,
    args: Vec<SqlValue>,
    frames: Vec<Frame>,
}

impl Default for Where {
    fn default() -> Self {
        Self::new()
    }
}

impl Where {
    /// Creates an empty builder whose top-level predicates join with AND.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sql: String::new(),
            args: Vec::new(),
            frames: vec![Frame::new(Joiner::And)],
        }
    }

    /// Returns `true` if no predicate has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// The clause text rendered so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The arguments collected so far.
    #[must_use]
    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Fragment {
        trace!(sql = %self.sql, args = self.args.len(), "Rendered WHERE clause");
        Fragment::new(self.sql, self.args)
    }

    /// Writes the joiner of the innermost frame unless this is its first child.
    fn separate(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            if frame.first {
                frame.first = false;
            } else {
                self.sql.push_str(frame.joiner.keyword());
            }
        }
    }

    fn push(&mut self, clause: &str, args: impl IntoIterator<Item = SqlValue>) -> &mut Self {
        self.separate();
        self.sql.push_str(clause);
        self.args.extend(args);
        self
    }

    fn group(&mut self, joiner: Joiner, negate: bool, f: impl FnOnce(&mut Self)) -> &mut Self {
        let sql_mark = self.sql.len();
        let args_mark = self.args.len();
        let outer = self.frames.last().copied();

        self.separate();
        if negate {
            self.sql.push_str("NOT ");
        }
        self.sql.push('(');
        self.frames.push(Frame::new(joiner));
        f(self);

        let emitted = self.frames.pop().is_some_and(|frame| !frame.first);
        if emitted {
            self.sql.push(')');
        } else {
            self.sql.truncate(sql_mark);
            self.args.truncate(args_mark);
            if let (Some(saved), Some(frame)) = (outer, self.frames.last_mut()) {
                *frame = saved;
            }
        }
        self
    }

    /// `<key> = ?` for an already type-checked value.
    pub(crate) fn eq_value(&mut self, key: &str, value: SqlValue) -> &mut Self {
        self.push(&format!("{key} = ?"), [value])
    }

    fn compare<T: ColumnValue>(
        &mut self,
        column: &Column<T>,
        op: CompareOp,
        value: impl IntoValue<T>,
    ) -> &mut Self {
        match value.into_value() {
            Some(value) => self.push(
                &format!("{} {op} ?", column.key()),
                [value.to_sql_value()],
            ),
            None => self,
        }
    }

    /// `<key> = ?`
    pub fn eq<T: ColumnValue>(&mut self, column: &Column<T>, value: impl IntoValue<T>) -> &mut Self {
        self.compare(column, CompareOp::Eq, value)
    }

    /// `<key> <> ?`
    pub fn neq<T: ColumnValue>(&mut self, column: &Column<T>, value: impl IntoValue<T>) -> &mut Self {
        self.compare(column, CompareOp::Ne, value)
    }

    /// `<key> < ?`
    pub fn lt<T: ColumnValue>(&mut self, column: &Column<T>, value: impl IntoValue<T>) -> &mut Self {
        self.compare(column, CompareOp::Lt, value)
    }

    /// `<key> <= ?`
    pub fn lte<T: ColumnValue>(&mut self, column: &Column<T>, value: impl IntoValue<T>) -> &mut Self {
        self.compare(column, CompareOp::Lte, value)
    }

    /// `<key> > ?`
    pub fn gt<T: ColumnValue>(&mut self, column: &Column<T>, value: impl IntoValue<T>) -> &mut Self {
        self.compare(column, CompareOp::Gt, value)
    }

    /// `<key> >= ?`
    pub fn gte<T: ColumnValue>(&mut self, column: &Column<T>, value: impl IntoValue<T>) -> &mut Self {
        self.compare(column, CompareOp::Gte, value)
    }

    fn pattern(
        &mut self,
        column: &Column<String>,
        keyword: &str,
        value: impl IntoValue<String>,
        wrap: fn(String) -> String,
    ) -> &mut Self {
        match value.into_value() {
            Some(value) => self.push(
                &format!("{} {keyword} ?", column.key()),
                [SqlValue::Text(wrap(value))],
            ),
            None => self,
        }
    }

    /// `<key> LIKE ?` with the pattern bound as given.
    pub fn like(&mut self, column: &Column<String>, pattern: impl IntoValue<String>) -> &mut Self {
        self.pattern(column, "LIKE", pattern, |v| v)
    }

    /// `<key> NOT LIKE ?` with the pattern bound as given.
    pub fn not_like(
        &mut self,
        column: &Column<String>,
        pattern: impl IntoValue<String>,
    ) -> &mut Self {
        self.pattern(column, "NOT LIKE", pattern, |v| v)
    }

    /// `<key> LIKE ?` matching values starting with `prefix`.
    pub fn like_starts(
        &mut self,
        column: &Column<String>,
        prefix: impl IntoValue<String>,
    ) -> &mut Self {
        self.pattern(column, "LIKE", prefix, |v| format!("{v}%"))
    }

    /// `<key> LIKE ?` matching values ending with `suffix`.
    pub fn like_ends(&mut self, column: &Column<String>, suffix: impl IntoValue<String>) -> &mut Self {
        self.pattern(column, "LIKE", suffix, |v| format!("%{v}"))
    }

    /// `<key> LIKE ?` matching values containing `infix`.
    pub fn like_contains(
        &mut self,
        column: &Column<String>,
        infix: impl IntoValue<String>,
    ) -> &mut Self {
        self.pattern(column, "LIKE", infix, |v| format!("%{v}%"))
    }

    /// `<key> BETWEEN ? AND ?`, skipped unless both bounds are present.
    pub fn between<T: ColumnValue>(
        &mut self,
        column: &Column<T>,
        low: impl IntoValue<T>,
        high: impl IntoValue<T>,
    ) -> &mut Self {
        match (low.into_value(), high.into_value()) {
            (Some(low), Some(high)) => self.push(
                &format!("{} BETWEEN ? AND ?", column.key()),
                [low.to_sql_value(), high.to_sql_value()],
            ),
            _ => self,
        }
    }

    /// [`between`](Self::between) taking an optional inclusive range.
    pub fn between_range<T: ColumnValue>(
        &mut self,
        column: &Column<T>,
        range: Option<RangeInclusive<T>>,
    ) -> &mut Self {
        match range {
            Some(range) => {
                let (low, high) = range.into_inner();
                self.between(column, low, high)
            }
            None => self,
        }
    }

    fn list<T: ColumnValue, V: IntoValue<T>>(
        &mut self,
        column: &Column<T>,
        keyword: &str,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        let args: Vec<SqlValue> = values
            .into_iter()
            .filter_map(IntoValue::<T>::into_value)
            .map(ToSqlValue::to_sql_value)
            .collect();
        if args.is_empty() {
            return self;
        }
        let placeholders: Vec<&str> = args.iter().map(|_| "?").collect();
        let clause = format!("{} {keyword} ({})", column.key(), placeholders.join(", "));
        self.push(&clause, args)
    }

    /// `<key> IN (?, ...)`, one placeholder per element.
    pub fn in_list<T: ColumnValue, V: IntoValue<T>>(
        &mut self,
        column: &Column<T>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.list(column, "IN", values)
    }

    /// `<key> NOT IN (?, ...)`, one placeholder per element.
    pub fn not_in<T: ColumnValue, V: IntoValue<T>>(
        &mut self,
        column: &Column<T>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.list(column, "NOT IN", values)
    }

    /// `<key> IS NULL`
    pub fn is_null<T>(&mut self, column: &Column<T>) -> &mut Self {
        self.push(&format!("{} IS NULL", column.key()), [])
    }

    /// `<key> IS NOT NULL`
    pub fn is_not_null<T>(&mut self, column: &Column<T>) -> &mut Self {
        self.push(&format!("{} IS NOT NULL", column.key()), [])
    }

    /// Parenthesized group whose children join with OR.
    pub fn or(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.group(Joiner::Or, false, f)
    }

    /// Parenthesized group whose children join with AND.
    pub fn and(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.group(Joiner::And, false, f)
    }

    /// `NOT (...)` group whose children join with AND.
    pub fn not(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.group(Joiner::And, true, f)
    }
}
