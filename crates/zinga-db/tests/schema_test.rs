//! Integration tests for schema initialization using in-memory SurrealDB.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[derive(Debug, Deserialize)]
struct MigrationRow {
    version: u32,
    name: String,
}

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    zinga_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: surrealdb::Value = result.take(0).unwrap();
    let info_str = format!("{info:?}");

    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    zinga_db::run_migrations(&db).await.unwrap();
    zinga_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT version, name FROM _migration").await.unwrap();
    let records: Vec<MigrationRow> = result.take(0).unwrap();
    assert_eq!(records.len(), zinga_db::migrations().len());
    assert_eq!(records[0].version, 1);
    assert_eq!(records[0].name, "initial_schema");
}

#[tokio::test]
async fn schema_rejects_unknown_role() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    zinga_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE user SET email = 'x@example.com', name = 'X', \
             role = 'superuser', created_at = '2024-01-01T00:00:00Z'",
        )
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "role ASSERT should reject 'superuser'");
}
