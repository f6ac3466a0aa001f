//! Round trips against a live database. Skipped unless
//! `TRELLIS_TEST_POSTGRES_URL` is set.

use pretty_assertions::assert_eq;
use serde_json::json;
use trellis_core::{
    schema::{app, db},
    ConstraintKind, Connection as _, Driver, Schema,
};
use trellis_driver_postgresql::{Connection, PostgreSQL};

fn build(tables: serde_json::Value) -> Schema {
    let app: app::Schema = serde_json::from_value(json!({ "tables": tables })).unwrap();
    Schema::builder().build(app).unwrap()
}

fn shop(on_delete: &str) -> Schema {
    build(json!([
        {
            "id": 1,
            "name": "customers",
            "fields": [
                { "id": 1, "name": "email", "type": "email", "unique": true },
                { "id": 2, "name": "status", "type": "status", "options": ["active", "inactive"] }
            ],
            "views": [{
                "id": "active",
                "name": "Active",
                "filters": { "field": "status", "operator": "equals", "value": "active" }
            }]
        },
        {
            "id": 2,
            "name": "orders",
            "fields": [
                {
                    "id": 1,
                    "name": "customer",
                    "type": "relationship",
                    "relatedTable": "customers",
                    "onDelete": on_delete
                }
            ]
        }
    ]))
}

/// Connects with every table in a fresh schema named after the test.
async fn connect(test: &str) -> Option<(PostgreSQL, Connection)> {
    let Ok(url) = std::env::var("TRELLIS_TEST_POSTGRES_URL") else {
        eprintln!("skipping {test}: TRELLIS_TEST_POSTGRES_URL not set");
        return None;
    };

    let namespace = format!("trellis_test_{test}");

    let setup = PostgreSQL::new(&url).unwrap();
    let conn = setup.connect_with_tls(tokio_postgres::NoTls).await.unwrap();
    conn.client()
        .batch_execute(&format!("DROP SCHEMA IF EXISTS {namespace} CASCADE"))
        .await
        .unwrap();

    let driver = PostgreSQL::new(&url).unwrap().with_search_path(namespace);
    let conn = driver.connect_with_tls(tokio_postgres::NoTls).await.unwrap();
    Some((driver, conn))
}

async fn apply(
    driver: &PostgreSQL,
    conn: &mut Connection,
    id: u64,
    previous: &db::Schema,
    next: &Schema,
) {
    let diff = db::SchemaDiff::from(previous, &next.db);
    let migration = driver.generate_migration(&diff);
    conn.apply_migration(id, format!("migration_{id}"), &migration, &next.db)
        .await
        .unwrap();
}

async fn count(conn: &Connection, sql: &str) -> i64 {
    conn.client().query_one(sql, &[]).await.unwrap().get(0)
}

#[tokio::test]
async fn apply_records_snapshot_and_history() {
    let Some((driver, mut conn)) = connect("history").await else {
        return;
    };

    assert_eq!(conn.current_schema().await.unwrap(), None);

    let schema = shop("cascade");
    apply(&driver, &mut conn, 1, &db::Schema::default(), &schema).await;

    let snapshot = conn.current_schema().await.unwrap().unwrap();
    assert_eq!(snapshot, *schema.db);

    let applied = conn.applied_migrations().await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].name(), "migration_1");

    // Diffing against the stored baseline plans nothing
    let diff = db::SchemaDiff::from(&snapshot, &schema.db);
    assert!(driver.generate_migration(&diff).is_empty());
}

#[tokio::test]
async fn reapplying_is_a_no_op() {
    let Some((driver, mut conn)) = connect("reapply").await else {
        return;
    };

    let schema = shop("cascade");
    apply(&driver, &mut conn, 1, &db::Schema::default(), &schema).await;
    apply(&driver, &mut conn, 1, &db::Schema::default(), &schema).await;

    // The statements themselves are idempotent too
    let empty = db::Schema::default();
    let diff = db::SchemaDiff::from(&empty, &schema.db);
    let migration = driver.generate_migration(&diff);
    conn.apply_migration(2, "again".into(), &migration, &schema.db)
        .await
        .unwrap();

    assert_eq!(conn.applied_migrations().await.unwrap().len(), 2);
}

#[tokio::test]
async fn cascade_delete_removes_children() {
    let Some((driver, mut conn)) = connect("cascade").await else {
        return;
    };

    apply(&driver, &mut conn, 1, &db::Schema::default(), &shop("cascade")).await;

    conn.execute("INSERT INTO customers (email, status) VALUES ('a@example.com', 'active')")
        .await
        .unwrap();
    for _ in 0..3 {
        conn.execute("INSERT INTO orders (customer) SELECT id FROM customers")
            .await
            .unwrap();
    }

    conn.execute("DELETE FROM customers").await.unwrap();
    assert_eq!(count(&conn, "SELECT count(*) FROM orders").await, 0);
}

#[tokio::test]
async fn set_null_keeps_children() {
    let Some((driver, mut conn)) = connect("set_null").await else {
        return;
    };

    apply(&driver, &mut conn, 1, &db::Schema::default(), &shop("set-null")).await;

    conn.execute("INSERT INTO customers (email, status) VALUES ('a@example.com', 'active')")
        .await
        .unwrap();
    conn.execute("INSERT INTO orders (customer) SELECT id FROM customers")
        .await
        .unwrap();

    conn.execute("DELETE FROM customers").await.unwrap();
    assert_eq!(
        count(&conn, "SELECT count(*) FROM orders WHERE customer IS NULL").await,
        1
    );
}

#[tokio::test]
async fn restrict_blocks_delete() {
    let Some((driver, mut conn)) = connect("restrict").await else {
        return;
    };

    apply(&driver, &mut conn, 1, &db::Schema::default(), &shop("restrict")).await;

    conn.execute("INSERT INTO customers (email, status) VALUES ('a@example.com', 'active')")
        .await
        .unwrap();
    conn.execute("INSERT INTO orders (customer) SELECT id FROM customers")
        .await
        .unwrap();

    let err = conn.execute("DELETE FROM customers").await.unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::ForeignKey));
    assert_eq!(count(&conn, "SELECT count(*) FROM customers").await, 1);
}

#[tokio::test]
async fn unique_violation_is_reported() {
    let Some((driver, mut conn)) = connect("unique").await else {
        return;
    };

    apply(&driver, &mut conn, 1, &db::Schema::default(), &shop("cascade")).await;

    let insert = "INSERT INTO customers (email, status) VALUES ('a@example.com', 'active')";
    conn.execute(insert).await.unwrap();

    let err = conn.execute(insert).await.unwrap_err();
    assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
    assert_eq!(err.constraint_name(), Some("uq_customers_email"));
}

#[tokio::test]
async fn view_returns_matching_rows() {
    let Some((driver, mut conn)) = connect("view").await else {
        return;
    };

    apply(&driver, &mut conn, 1, &db::Schema::default(), &shop("cascade")).await;

    conn.execute(
        "INSERT INTO customers (email, status) VALUES \
         ('a@example.com', 'active'), ('b@example.com', 'inactive'), ('c@example.com', 'active')",
    )
    .await
    .unwrap();

    assert_eq!(count(&conn, "SELECT count(*) FROM customers_active").await, 2);
    assert_eq!(
        count(
            &conn,
            "SELECT count(*) FROM information_schema.views WHERE table_name = 'customers_active'"
        )
        .await,
        1
    );
}

#[tokio::test]
async fn failed_migration_rolls_back() {
    let Some((_driver, mut conn)) = connect("rollback").await else {
        return;
    };

    let migration = db::Migration::new_sql_with_breakpoints(&[
        "CREATE TABLE IF NOT EXISTS \"partial\" (\"id\" BIGINT)",
        "ALTER TABLE \"missing\" ADD COLUMN \"x\" TEXT",
    ]);

    let err = conn
        .apply_migration(1, "broken".into(), &migration, &db::Schema::default())
        .await
        .unwrap_err();

    assert!(err.is_migration_failed());
    let partial = "SELECT count(*) FROM pg_tables \
                   WHERE tablename = 'partial' AND schemaname = current_schema()";
    assert_eq!(count(&conn, partial).await, 0);
    assert!(conn.applied_migrations().await.unwrap().is_empty());
}
