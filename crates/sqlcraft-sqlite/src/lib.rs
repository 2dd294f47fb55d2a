//! # sqlcraft-sqlite
//!
//! SQLite driver for `sqlcraft-core` statements, built on `rusqlite`.
//!
//! [`SqliteExecutor`] implements [`sqlcraft_core::Executor`]: it binds each
//! [`SqlValue`](sqlcraft_core::SqlValue) positionally, reports the last
//! inserted rowid as the generated key and returns result rows with their
//! column names.
//!
//! ## Example
//!
//! ```rust
//! use sqlcraft_core::schema::TableSchema;
//! use sqlcraft_sqlite::{SqliteConfig, SqliteExecutor};
//!
//! sqlcraft_core::table! {
//!     pub struct Notes = "note" {
//!         id: i64,
//!         body: String,
//!     }
//! }
//!
//! let notes = Notes::new();
//! let mut db = SqliteExecutor::open(&SqliteConfig::new()).unwrap();
//! notes.create_table().unwrap().execute(&mut db).unwrap();
//!
//! let id = notes.insert().set(&notes.body, "hello").persist(&mut db).unwrap();
//! let body = notes
//!     .select()
//!     .select_primary(id)
//!     .unwrap()
//!     .fetch_one(&mut db, |row| row.get(&notes.body))
//!     .unwrap();
//! assert_eq!(body, "hello");
//! ```

pub mod config;
mod connection;
pub mod convert;
pub mod error;

pub use config::SqliteConfig;
pub use connection::SqliteExecutor;
pub use error::{Result, SqliteError};
