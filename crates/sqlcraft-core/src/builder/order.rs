//! ORDER BY and LIMIT/OFFSET builder.

use std::fmt;

use crate::query::Fragment;
use crate::schema::AsColumn;
use crate::value::SqlValue;

/// Page size used by [`OrderBy::page`] when none is given.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// Accumulates ordering terms and pagination.
///
/// `limit` and `offset` silently ignore `None` and non-positive values, the
/// same way predicates ignore null inputs. [`page`](Self::page) is the one
/// pagination mode that always renders both clauses.
#[derive(Debug, Clone, Default)]
pub struct OrderBy {
    terms: Vec<(String, Direction)>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl OrderBy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders by `column` ascending.
    pub fn asc(&mut self, column: &impl AsColumn) -> &mut Self {
        self.terms.push((column.as_column().key().to_owned(), Direction::Asc));
        self
    }

    /// Orders by `column` descending.
    pub fn desc(&mut self, column: &impl AsColumn) -> &mut Self {
        self.terms.push((column.as_column().key().to_owned(), Direction::Desc));
        self
    }

    /// Sets the LIMIT, ignoring `None` and values below one.
    pub fn limit(&mut self, limit: impl Into<Option<i64>>) -> &mut Self {
        if let Some(limit) = limit.into().filter(|n| *n > 0) {
            self.limit = Some(limit);
        }
        self
    }

    /// Sets the OFFSET, ignoring `None` and values below one.
    pub fn offset(&mut self, offset: impl Into<Option<i64>>) -> &mut Self {
        if let Some(offset) = offset.into().filter(|n| *n > 0) {
            self.offset = Some(offset);
        }
        self
    }

    /// Sets LIMIT and OFFSET with the rules of [`limit`](Self::limit) and
    /// [`offset`](Self::offset).
    pub fn pagination(
        &mut self,
        limit: impl Into<Option<i64>>,
        offset: impl Into<Option<i64>>,
    ) -> &mut Self {
        self.limit(limit).offset(offset)
    }

    /// Selects a 1-based page.
    ///
    /// The page size falls back to [`DEFAULT_PAGE_SIZE`] when `None` or not
    /// positive; pages below one select the first page. Both `LIMIT ?` and
    /// `OFFSET ?` are always rendered.
    pub fn page(&mut self, page: i64, page_size: impl Into<Option<i64>>) -> &mut Self {
        let size = page_size
            .into()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = if page > 0 {
            (page - 1).saturating_mul(size)
        } else {
            0
        };
        self.limit = Some(size);
        self.offset = Some(offset);
        self
    }

    /// Returns `true` if no ordering term has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Renders the ordering terms, e.g. `name ASC, age DESC`.
    #[must_use]
    pub fn order_sql(&self) -> String {
        self.terms
            .iter()
            .map(|(key, direction)| format!("{key} {direction}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders ` LIMIT ?` and ` OFFSET ?` with their arguments.
    #[must_use]
    pub fn pagination_fragment(&self) -> Fragment {
        let mut fragment = Fragment::default();
        if let Some(limit) = self.limit {
            fragment.sql.push_str(" LIMIT ?");
            fragment.args.push(SqlValue::Long(limit));
        }
        if let Some(offset) = self.offset {
            fragment.sql.push_str(" OFFSET ?");
            fragment.args.push(SqlValue::Long(offset));
        }
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Table};

    fn columns() -> (Column<String>, Column<i32>) {
        let mut table = Table::new("employee");
        (table.column("name"), table.column("age"))
    }

    #[test]
    fn test_terms_in_call_order() {
        let (name, age) = columns();
        let mut order = OrderBy::new();
        order.asc(&name).desc(&age);
        assert_eq!(order.order_sql(), "name ASC, age DESC");
    }

    #[test]
    fn test_limit_and_offset() {
        let mut order = OrderBy::new();
        order.pagination(10, 20);
        let fragment = order.pagination_fragment();
        assert_eq!(fragment.sql, " LIMIT ? OFFSET ?");
        assert_eq!(fragment.args, vec![SqlValue::Long(10), SqlValue::Long(20)]);
    }

    #[test]
    fn test_non_positive_and_none_are_ignored() {
        let mut order = OrderBy::new();
        order.limit(0).offset(-5).limit(None).offset(None);
        assert!(order.pagination_fragment().is_empty());

        let mut order = OrderBy::new();
        order.pagination(None, 15);
        let fragment = order.pagination_fragment();
        assert_eq!(fragment.sql, " OFFSET ?");
        assert_eq!(fragment.args, vec![SqlValue::Long(15)]);
    }

    #[test]
    fn test_page() {
        let mut order = OrderBy::new();
        order.page(3, 25);
        assert_eq!(
            order.pagination_fragment().args,
            vec![SqlValue::Long(25), SqlValue::Long(50)]
        );
    }

    #[test]
    fn test_page_defaults() {
        let mut order = OrderBy::new();
        order.page(0, None);
        let fragment = order.pagination_fragment();
        assert_eq!(fragment.sql, " LIMIT ? OFFSET ?");
        assert_eq!(
            fragment.args,
            vec![SqlValue::Long(DEFAULT_PAGE_SIZE), SqlValue::Long(0)]
        );
    }
}
