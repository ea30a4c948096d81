//! End-to-end tests against a live PostgreSQL database.
//!
//! They create a small fixture schema, run the generator and inspect the
//! Markdown. Run with:
//! ```sh
//! POSTGRES_TO_DOCS_TEST_CONFIG=/path/to/config.json cargo test --test catalog_integration -- --ignored
//! ```

use postgres_to_docs::config::Config;
use postgres_to_docs::db::{CatalogSnapshot, Database};
use postgres_to_docs::generate;
use std::path::PathBuf;
use tokio_postgres::NoTls;

const FIXTURE: &str = "
    DROP VIEW IF EXISTS ptd_recent_orders;
    DROP TABLE IF EXISTS ptd_orders;
    DROP TABLE IF EXISTS ptd_users;
    DROP TYPE IF EXISTS ptd_status;
    DROP TYPE IF EXISTS ptd_address;

    CREATE TYPE ptd_status AS ENUM ('active', 'inactive');
    CREATE TYPE ptd_address AS (street text, city text);

    CREATE TABLE ptd_users (
        id serial PRIMARY KEY,
        status ptd_status NOT NULL DEFAULT 'active',
        home ptd_address
    );

    CREATE TABLE ptd_orders (
        id serial PRIMARY KEY,
        user_id integer REFERENCES ptd_users (id)
    );

    CREATE VIEW ptd_recent_orders AS SELECT id, user_id FROM ptd_orders;
";

fn config_path() -> PathBuf {
    std::env::var("POSTGRES_TO_DOCS_TEST_CONFIG")
        .map(PathBuf::from)
        .expect("POSTGRES_TO_DOCS_TEST_CONFIG must point at a JSON database config")
}

async fn install_fixture(config: &Config) {
    let (client, connection) = config.to_pg_config().connect(NoTls).await.unwrap();
    let handle = tokio::spawn(connection);
    client.batch_execute(FIXTURE).await.unwrap();
    drop(client);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
#[ignore]
async fn test_snapshot_contains_fixture() {
    let config = Config::load(&config_path()).unwrap();
    install_fixture(&config).await;

    let database = Database::connect(&config).await.unwrap();
    let snapshot = CatalogSnapshot::fetch(&database).await.unwrap();
    database.close().await;

    assert!(snapshot.tables.iter().any(|t| t.name == "ptd_users"));
    assert!(snapshot.views.iter().any(|v| v.name == "ptd_recent_orders"));
    assert!(snapshot
        .primary_keys
        .iter()
        .any(|pk| pk.table == "ptd_users" && pk.column == "id"));
    assert!(snapshot.foreign_keys.iter().any(|fk| fk.source_table == "ptd_orders"
        && fk.source_column == "user_id"
        && fk.foreign_table == "ptd_users"
        && fk.foreign_column == "id"));

    let status = snapshot
        .enum_types
        .iter()
        .find(|t| t.name == "ptd_status")
        .expect("enum type fetched");
    assert_eq!(status.elements, vec!["active", "inactive"]);

    let fields: Vec<&str> = snapshot
        .composite_fields
        .iter()
        .filter(|f| f.type_name == "ptd_address")
        .map(|f| f.field_name.as_str())
        .collect();
    assert_eq!(fields, vec!["street", "city"]);

    let status_column = snapshot
        .columns
        .iter()
        .find(|c| c.table == "ptd_users" && c.name == "status")
        .expect("status column fetched");
    assert_eq!(status_column.data_type, "ptd_status");
    assert!(!status_column.is_nullable);
}

#[tokio::test]
#[ignore]
async fn test_generate_writes_markdown() {
    let config_path = config_path();
    let config = Config::load(&config_path).unwrap();
    install_fixture(&config).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("schema.md");
    generate(&config_path, &output).await.unwrap();

    let markdown = std::fs::read_to_string(&output).unwrap();
    assert!(markdown.starts_with("# Tables\n"));
    assert!(markdown.contains("### <a name=\"ptd_users\"></a>ptd_users"));
    assert!(markdown.contains("| id `PK` |"));
    assert!(markdown.contains("[ptd_users.id](#ptd_users)"));
    assert!(markdown.contains("[ptd_status](#ptd_status)"));
    assert!(markdown.contains("[ptd_address](#ptd_address)"));
    assert!(markdown.contains("# Views\n"));
    assert!(markdown.contains("# Types\n"));
}

#[tokio::test]
#[ignore]
async fn test_connection_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.json");
    std::fs::write(
        &config,
        r#"{"host":"127.0.0.1","port":1,"user":"nobody","password":"x","database":"none"}"#,
    )
    .unwrap();
    let output = dir.path().join("schema.md");

    let err = generate(&config, &output).await.unwrap_err();
    assert!(matches!(err, postgres_to_docs::Error::Connection { .. }));
    assert!(!output.exists());
}
