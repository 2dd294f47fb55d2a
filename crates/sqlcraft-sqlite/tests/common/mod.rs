#![allow(dead_code)]

use sqlcraft_core::schema::TableSchema;
use sqlcraft_sqlite::{SqliteConfig, SqliteExecutor};

sqlcraft_core::table! {
    pub struct Users = "user" {
        #[primary_key]
        id: i64,
        name: String,
        email: String,
        age: i32,
        active: bool,
    }
}

sqlcraft_core::table! {
    pub struct Accounts = "account", prefixed {
        id: i64,
        user_id: i64,
        balance: sqlcraft_core::Decimal,
        rate: f64,
    }
}

sqlcraft_core::table! {
    pub struct Teams = "team" {
        id: i64,
        title: String,
    }
}

sqlcraft_core::table! {
    pub struct Members = "member" {
        id: i64,
        nickname: String,
        team_id: i64,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Opens an in-memory database holding every fixture table.
pub fn open_db() -> SqliteExecutor {
    init_tracing();
    let mut db = SqliteExecutor::open(&SqliteConfig::new()).unwrap();
    create_all(&mut db);
    db
}

pub fn create_all(db: &mut SqliteExecutor) {
    Users::new().create_table().unwrap().execute(db).unwrap();
    Accounts::new().create_table().unwrap().execute(db).unwrap();
    Teams::new().create_table().unwrap().execute(db).unwrap();
    Members::new().create_table().unwrap().execute(db).unwrap();
}

/// Inserts a user and returns its rowid.
pub fn add_user(db: &mut SqliteExecutor, name: &str, email: &str, age: i32) -> i64 {
    let users = Users::new();
    let id = users
        .insert()
        .set(&users.name, name)
        .set(&users.email, email)
        .set(&users.age, age)
        .set(&users.active, true)
        .persist(db)
        .unwrap();
    id
}
