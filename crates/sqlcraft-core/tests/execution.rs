mod common;

use common::{Recorder, Users};
use sqlcraft_core::schema::TableSchema;
use sqlcraft_core::validate::CheckResult;
use sqlcraft_core::{Executor, QueryError, SqlValue, Validator};

fn user_row(id: i64, name: &str) -> Vec<SqlValue> {
    vec![SqlValue::Long(id), SqlValue::Text(name.to_owned())]
}

#[test]
fn test_fetch_one_without_rows_is_not_found() {
    let users = Users::new();
    let mut db = Recorder::new();
    let err = users
        .select()
        .columns(&[&users.id, &users.name])
        .select_primary(42)
        .unwrap()
        .fetch_one(&mut db, |row| row.get(&users.name))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(db.statements.len(), 1);
}

#[test]
fn test_fetch_all_without_rows_is_empty() {
    let users = Users::new();
    let mut db = Recorder::new();
    let names = users
        .select()
        .where_clause(|w| {
            w.eq(&users.record_status, "deleted");
        })
        .fetch_all(&mut db, |row| row.get(&users.name))
        .unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_fetch_maps_rows() {
    let users = Users::new();
    let mut db = Recorder::new().returning(
        &["id", "name"],
        vec![user_row(1, "John Doe"), user_row(2, "Jane Smith")],
    );
    let rows = users
        .select()
        .columns(&[&users.id, &users.name])
        .fetch_all(&mut db, |row| Ok((row.get(&users.id)?, row.get(&users.name)?)))
        .unwrap();
    assert_eq!(
        rows,
        vec![
            (1, String::from("John Doe")),
            (2, String::from("Jane Smith"))
        ]
    );
}

#[test]
fn test_fetch_count_and_exists() {
    let users = Users::new();
    let mut db = Recorder::new()
        .returning(&["COUNT(*)"], vec![vec![SqlValue::Long(4)]])
        .returning_exists(true);
    let select = users.select().where_clause(|w| {
        w.eq(&users.record_status, "active");
    });
    assert_eq!(select.fetch_count(&mut db).unwrap(), 4);
    assert!(select.fetch_exists(&mut db).unwrap());
    assert_eq!(
        db.sql(),
        vec![
            "SELECT COUNT(*) FROM user WHERE record_status = ?",
            "SELECT EXISTS(SELECT 1 FROM user WHERE record_status = ?)",
        ]
    );
}

#[test]
fn test_execution_error_carries_sql_and_args() {
    let users = Users::new();
    let mut db = Recorder::new().failing("constraint failed");
    let err = users.delete().delete_primary(3).unwrap().persist(&mut db).unwrap_err();
    match err {
        QueryError::Execution { sql, args, source } => {
            assert_eq!(sql, "DELETE FROM user WHERE id = ?");
            assert_eq!(args, vec![SqlValue::Int(3)]);
            assert_eq!(source.to_string(), "constraint failed");
        }
        other => panic!("expected execution error, got {other:?}"),
    }
}

#[test]
fn test_insert_returns_generated_key() {
    let users = Users::new();
    let mut db = Recorder::new().with_generated_key(17);
    let id = users
        .insert()
        .set(&users.name, "John Doe")
        .set(&users.email, "john@example.com")
        .persist(&mut db)
        .unwrap();
    assert_eq!(id, 17);
    assert_eq!(db.sql(), vec!["INSERT INTO user (name, email) VALUES (?, ?)"]);
}

#[test]
fn test_insert_without_generated_key_fails() {
    let users = Users::new();
    let mut db = Recorder::new();
    let err = users.insert().set(&users.name, "x").persist(&mut db).unwrap_err();
    assert!(matches!(err, QueryError::NoGeneratedKey { .. }));
}

#[test]
fn test_failed_validation_skips_mutation() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(true).with_generated_key(1);
    let validator = Validator::new().unique(&users.email, "taken@example.com");
    let err = users
        .insert()
        .set(&users.email, "taken@example.com")
        .validate(validator)
        .persist(&mut db)
        .unwrap_err();

    let failure = err.check_result().unwrap();
    assert!(!failure.ok);
    assert_eq!(failure.field.as_deref(), Some("email"));
    assert_eq!(
        db.sql(),
        vec!["SELECT EXISTS(SELECT 1 FROM user WHERE email = ?)"]
    );
}

#[test]
fn test_validation_short_circuits_in_order() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(false);
    let validator = Validator::new()
        .unique(&users.email, "new@example.com")
        .check(|_: &mut dyn Executor| Ok(CheckResult::fail("name", "rejected")))
        .check(|_: &mut dyn Executor| -> sqlcraft_core::Result<CheckResult> {
            panic!("checks after a failure must not run")
        });
    let result = validator.run(&mut db).unwrap();
    assert_eq!(result, CheckResult::fail("name", "rejected"));
    assert_eq!(db.statements.len(), 1);
}

#[test]
fn test_passing_validation_runs_update() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(true);
    let validator = Validator::new().exists_where("user", "id", "unknown user", |w| {
        w.eq(&users.id, 1);
    });
    let changed = users
        .update()
        .set(&users.record_status, "active")
        .update_primary(1)
        .unwrap()
        .validate(validator)
        .persist(&mut db)
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(
        db.sql(),
        vec![
            "SELECT EXISTS(SELECT 1 FROM user WHERE id = ?)",
            "UPDATE user SET record_status = ? WHERE id = ?",
        ]
    );
}

#[test]
fn test_foreign_key_reference_must_exist() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(false);
    let result = Validator::new()
        .references(&users.id, 99)
        .run(&mut db)
        .unwrap();
    assert!(!result.ok);
    assert_eq!(result.field.as_deref(), Some("id"));
}

#[test]
fn test_query_execute_sends_ddl() {
    let users = Users::new();
    let mut db = Recorder::new();
    let execution = users.create_table().unwrap().execute(&mut db).unwrap();
    assert_eq!(execution.rows_affected, 1);
    assert_eq!(db.statements.len(), 1);
    assert!(db.sql()[0].starts_with("CREATE TABLE IF NOT EXISTS user (id INTEGER PRIMARY KEY"));
}

#[test]
fn test_failed_validation_skips_update() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(true);
    let err = users
        .update()
        .set(&users.email, "taken@example.com")
        .update_primary(1)
        .unwrap()
        .validate(Validator::new().unique(&users.email, "taken@example.com"))
        .persist(&mut db)
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        db.sql(),
        vec!["SELECT EXISTS(SELECT 1 FROM user WHERE email = ?)"]
    );
}

#[test]
fn test_failed_validation_skips_delete() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(false);
    let validator = Validator::new().exists_where("user", "id", "unknown user", |w| {
        w.eq(&users.id, 8);
    });
    let err = users
        .delete()
        .delete_primary(8)
        .unwrap()
        .validate(validator)
        .persist(&mut db)
        .unwrap_err();
    assert_eq!(err.check_result().and_then(|r| r.message.as_deref()), Some("unknown user"));
    assert_eq!(
        db.sql(),
        vec!["SELECT EXISTS(SELECT 1 FROM user WHERE id = ?)"]
    );
}

#[test]
fn test_passing_validation_runs_delete() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(true);
    let removed = users
        .delete()
        .where_clause(|w| {
            w.eq(&users.record_status, "archived");
        })
        .delete_primary(5)
        .unwrap()
        .validate(Validator::new().references(&users.id, 5))
        .persist(&mut db)
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(
        db.statements[1],
        (
            String::from("DELETE FROM user WHERE record_status = ? AND id = ?"),
            vec![SqlValue::Text(String::from("archived")), SqlValue::Int(5)],
        )
    );
}

#[test]
fn test_unique_together_checks_the_combination() {
    let users = Users::new();
    let mut db = Recorder::new().returning_exists(true);
    let result = Validator::new()
        .unique_together(&[
            (&users.name, SqlValue::Text(String::from("Ann"))),
            (&users.email, SqlValue::Text(String::from("ann@example.com"))),
        ])
        .unwrap()
        .run(&mut db)
        .unwrap();
    assert_eq!(
        result,
        CheckResult::fail("name, email", "combination of name, email already exists")
    );
    assert_eq!(
        db.statements,
        vec![(
            String::from("SELECT EXISTS(SELECT 1 FROM user WHERE name = ? AND email = ?)"),
            vec![
                SqlValue::Text(String::from("Ann")),
                SqlValue::Text(String::from("ann@example.com")),
            ],
        )]
    );
}
