//! Connection settings.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SqliteError};

/// Environment variable holding the database path.
pub const ENV_PATH: &str = "SQLCRAFT_SQLITE_PATH";
/// Environment variable toggling `PRAGMA foreign_keys`.
pub const ENV_FOREIGN_KEYS: &str = "SQLCRAFT_SQLITE_FOREIGN_KEYS";
/// Environment variable holding the busy timeout in milliseconds.
pub const ENV_BUSY_TIMEOUT_MS: &str = "SQLCRAFT_SQLITE_BUSY_TIMEOUT_MS";

/// Path that opens a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Configuration for [`SqliteExecutor`](crate::SqliteExecutor).
///
/// Missing fields take their defaults when deserialized, so an empty object
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file, or `:memory:`.
    pub path: String,
    /// Whether to enforce foreign key constraints.
    pub foreign_keys: bool,
    /// How long a statement waits on a locked database.
    pub busy_timeout_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: String::from(MEMORY_PATH),
            foreign_keys: true,
            busy_timeout_ms: 5000,
        }
    }
}

impl SqliteConfig {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Enable or disable foreign key enforcement.
    #[must_use]
    pub const fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Set the busy timeout in milliseconds.
    #[must_use]
    pub const fn busy_timeout_ms(mut self, millis: u64) -> Self {
        self.busy_timeout_ms = millis;
        self
    }

    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Returns `true` for the in-memory path.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Reads the configuration from `SQLCRAFT_SQLITE_*` variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::Config`] if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = env::var(ENV_PATH) {
            config.path = path;
        }
        if let Some(enabled) = parse_var::<bool>(ENV_FOREIGN_KEYS)? {
            config.foreign_keys = enabled;
        }
        if let Some(millis) = parse_var::<u64>(ENV_BUSY_TIMEOUT_MS)? {
            config.busy_timeout_ms = millis;
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SqliteError::Config(format!("{name} has an invalid value: {raw:?}"))),
        Err(_) => Ok(None),
    }
}
