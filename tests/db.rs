use circle_keeper::db::run_migrations;

mod common;

#[test]
fn test_creates_migrated_database() {
    let test_db = common::TestDb::new("test_creates_migrated_database.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_are_idempotent.db");
    assert!(run_migrations(&test_db.pool()).is_ok());
}
