use pretty_assertions::assert_eq;
use std::{fs, path::Path};
use trellis_cli::{
    load_declaration, Config, HistoryFile, MigrationConfig, SnapshotFile, TrellisCli,
};

const CUSTOMERS: &str = r#"{
    "tables": [{
        "id": 1,
        "name": "customers",
        "fields": [
            { "id": 1, "name": "name", "type": "single-line-text", "required": true },
            { "id": 2, "name": "email", "type": "email", "unique": true }
        ],
        "permissions": { "read": { "type": "authenticated" } }
    }]
}"#;

const CUSTOMERS_YAML: &str = "
tables:
  - id: 1
    name: customers
    fields:
      - id: 1
        name: name
        type: single-line-text
        required: true
      - id: 2
        name: email
        type: email
        unique: true
    permissions:
      read:
        type: authenticated
";

fn offline(dir: &Path) -> TrellisCli {
    TrellisCli::with_config(
        Config::new().migration(MigrationConfig::new().path(dir.join("migrations"))),
    )
}

fn run_args<'a>(command: &'a str, path: &'a Path, extra: &[&'a str]) -> Vec<String> {
    let mut args = vec!["trellis".to_string(), command.to_string()];
    args.push(path.display().to_string());
    args.extend(extra.iter().map(|arg| arg.to_string()));
    args
}

#[test]
fn yaml_and_json_declarations_agree() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("schema.json");
    let yaml = dir.path().join("schema.yaml");
    fs::write(&json, CUSTOMERS).unwrap();
    fs::write(&yaml, CUSTOMERS_YAML).unwrap();

    assert_eq!(load_declaration(&json).unwrap(), load_declaration(&yaml).unwrap());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.xml");
    fs::write(&path, CUSTOMERS).unwrap();

    let err = load_declaration(&path).unwrap_err();
    assert!(err.to_string().starts_with("unsupported declaration format"), "{err}");
}

#[tokio::test]
async fn check_accepts_valid_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(&path, CUSTOMERS).unwrap();

    offline(dir.path())
        .parse_from(run_args("check", &path, &[]))
        .await
        .unwrap();
}

#[tokio::test]
async fn check_reports_every_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(
        &path,
        r#"{ "tables": [
            { "id": 1, "name": "Customers", "fields": [] },
            { "id": 1, "name": "orders", "fields": [] }
        ] }"#,
    )
    .unwrap();

    let err = offline(dir.path())
        .parse_from(run_args("check", &path, &[]))
        .await
        .unwrap_err();

    let err = err.downcast::<trellis::Error>().unwrap();
    assert!(err.failures().len() >= 2, "{err}");
}

#[tokio::test]
async fn plan_write_records_script_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(&path, CUSTOMERS).unwrap();
    let cli = offline(dir.path());
    let migrations = dir.path().join("migrations");

    cli.parse_from(run_args("plan", &path, &["--write"]))
        .await
        .unwrap();

    let script = fs::read_to_string(migrations.join("0001_schema.sql")).unwrap();
    assert!(script.starts_with("CREATE TABLE IF NOT EXISTS \"customers\""), "{script}");

    let history = HistoryFile::load(migrations.join("history.toml")).unwrap();
    assert_eq!(history.migrations().len(), 1);
    assert_eq!(history.migrations()[0].name, "0001_schema.sql");

    let snapshot = SnapshotFile::load(migrations.join("snapshot.json")).unwrap();
    assert!(snapshot.schema.table_by_name("customers").is_some());

    // Planning again against the snapshot finds nothing to do
    cli.parse_from(run_args("plan", &path, &["--write"]))
        .await
        .unwrap();
    assert!(!migrations.join("0002_schema.sql").exists());
}

#[tokio::test]
async fn apply_requires_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(&path, CUSTOMERS).unwrap();

    let err = offline(dir.path())
        .parse_from(run_args("apply", &path, &[]))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("no database configured"), "{err}");
}

#[tokio::test]
async fn config_flag_loads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(&path, CUSTOMERS).unwrap();

    let config = dir.path().join("Custom.toml");
    fs::write(
        &config,
        format!(
            "table_name_prefix = \"crm_\"\n[migration]\npath = {:?}\n",
            dir.path().join("out").display().to_string()
        ),
    )
    .unwrap();

    TrellisCli::new()
        .parse_from([
            "trellis".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            "plan".to_string(),
            path.display().to_string(),
            "--write".to_string(),
        ])
        .await
        .unwrap();

    let snapshot = SnapshotFile::load(dir.path().join("out/snapshot.json")).unwrap();
    assert!(snapshot.schema.table_by_name("crm_customers").is_some());
}
