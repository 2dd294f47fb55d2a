//! Schema creation.

use crate::error::{QueryError, Result};
use crate::query::Query;
use crate::schema::{ColumnRef, Table};

fn column_definition(column: &ColumnRef) -> String {
    format!("{} {}", column.key(), column.column_type().sql_type())
}

/// Renders `CREATE TABLE IF NOT EXISTS` for `table`.
///
/// The primary key column is listed first with a `PRIMARY KEY` annotation;
/// the other columns follow in declaration order with their generic SQL type
/// and no constraints.
///
/// # Errors
///
/// Returns [`QueryError::MissingPrimaryKey`] for a table without columns.
pub fn create_table(table: &Table) -> Result<Query> {
    let primary_key = table
        .primary_key()
        .ok_or_else(|| QueryError::MissingPrimaryKey {
            operation: "create_table",
            table: table.name().to_owned(),
        })?;

    let mut definitions = vec![format!("{} PRIMARY KEY", column_definition(primary_key))];
    definitions.extend(
        table
            .columns()
            .iter()
            .filter(|c| *c != primary_key)
            .map(column_definition),
    );

    Ok(Query::new(
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            table.name(),
            definitions.join(", ")
        ),
        Vec::new(),
    ))
}
