//! Error types for the SQLite driver.

use thiserror::Error;

/// Errors raised while setting up or talking to SQLite.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// rusqlite reported a failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A result column holds a value with no [`SqlValue`](sqlcraft_core::SqlValue) counterpart.
    #[error("column `{column}` holds an unsupported {kind} value")]
    UnsupportedValue { column: String, kind: &'static str },
}

/// Result type alias for driver set-up.
pub type Result<T> = std::result::Result<T, SqliteError>;
