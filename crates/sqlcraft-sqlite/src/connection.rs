//! The SQLite [`Executor`].

use std::sync::Arc;

use rusqlite::{params_from_iter, Connection};
use sqlcraft_core::{BoxError, Execution, Executor, Row, SqlValue};
use tracing::{debug, info};

use crate::config::SqliteConfig;
use crate::convert::{from_sqlite, to_sqlite};
use crate::error::Result;

/// Runs sqlcraft statements on a single rusqlite connection.
#[derive(Debug)]
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Opens the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or a pragma fails.
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        info!(
            path = %config.path,
            foreign_keys = config.foreign_keys,
            busy_timeout_ms = config.busy_timeout_ms,
            "Opening SQLite connection"
        );
        let conn = if config.is_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        conn.busy_timeout(config.busy_timeout())?;
        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;
        Ok(Self { conn })
    }

    /// Opens a private in-memory database with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&SqliteConfig::default())
    }

    /// Wraps an existing connection as is.
    #[must_use]
    pub const fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    #[must_use]
    pub fn into_inner(self) -> Connection {
        self.conn
    }

    fn run(&self, sql: &str, args: &[SqlValue]) -> std::result::Result<u64, BoxError> {
        let changed = self
            .conn
            .execute(sql, params_from_iter(args.iter().map(to_sqlite)))?;
        Ok(u64::try_from(changed)?)
    }
}

impl Executor for SqliteExecutor {
    fn execute(&mut self, sql: &str, args: &[SqlValue]) -> std::result::Result<Execution, BoxError> {
        let rows_affected = self.run(sql, args)?;
        Ok(Execution {
            rows_affected,
            generated_key: None,
        })
    }

    fn insert(&mut self, sql: &str, args: &[SqlValue]) -> std::result::Result<Execution, BoxError> {
        let rows_affected = self.run(sql, args)?;
        let generated_key = (rows_affected > 0).then(|| self.conn.last_insert_rowid());
        debug!(rows_affected, ?generated_key, "Insert finished");
        Ok(Execution {
            rows_affected,
            generated_key,
        })
    }

    fn query(&mut self, sql: &str, args: &[SqlValue]) -> std::result::Result<Vec<Row>, BoxError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt.query(params_from_iter(args.iter().map(to_sqlite)))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let values = columns
                .iter()
                .enumerate()
                .map(|(index, name)| -> std::result::Result<SqlValue, BoxError> {
                    Ok(from_sqlite(name, row.get_ref(index)?)?)
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            out.push(Row::new(Arc::clone(&columns), values));
        }
        debug!(rows = out.len(), "Query finished");
        Ok(out)
    }
}
