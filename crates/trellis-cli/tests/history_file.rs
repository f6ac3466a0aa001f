use pretty_assertions::assert_eq;
use trellis_cli::{HistoryFile, HistoryFileMigration};

#[test]
fn ids_are_sequential() {
    let mut history = HistoryFile::new();
    assert_eq!(history.next_migration_id(), 1);

    history.add_migration(HistoryFileMigration {
        id: 1,
        name: "0001_schema.sql".to_string(),
        checksum: "abc".to_string(),
    });
    assert_eq!(history.next_migration_id(), 2);
}

#[test]
fn saved_history_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.toml");

    let mut history = HistoryFile::new();
    history.add_migration(HistoryFileMigration {
        id: 1,
        name: "0001_schema.sql".to_string(),
        checksum: "abc".to_string(),
    });
    history.save(&path).unwrap();

    assert_eq!(HistoryFile::load(&path).unwrap(), history);
}

#[test]
fn unsupported_version_is_rejected() {
    let err = "version = 2\nmigrations = []\n"
        .parse::<HistoryFile>()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported history file version: 2. Expected version 1"
    );
}
