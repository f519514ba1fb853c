use mtg_deck_db::schema::{SCHEMA_SQL, read_schema_version};
use mtg_deck_db::*;

#[test]
fn create_schema_in_memory() {
    let db = CardDatabase::open_memory().unwrap();
    assert_eq!(
        db.current_schema_version().unwrap(),
        BASE_SCHEMA_VERSION.to_integer().unwrap()
    );
    assert_eq!(db.current_schema_version_string().unwrap(), "0.2.0");
}

#[test]
fn schema_sql_sets_base_version() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    assert_eq!(
        read_schema_version(&conn).unwrap(),
        BASE_SCHEMA_VERSION.to_integer().unwrap()
    );
}

#[test]
fn base_version_is_compatible() {
    assert!(COMPATIBLE_SCHEMA_VERSIONS.contains(BASE_SCHEMA_VERSION.to_integer().unwrap()));
}

#[test]
fn foreign_keys_enabled() {
    let db = CardDatabase::open_memory().unwrap();
    let fk: i32 = db
        .connection()
        .unwrap()
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let db = CardDatabase::open_memory().unwrap();
    let conn = db.connection().unwrap();
    for (kind, name) in [
        ("table", "Card"),
        ("table", "Card_Set"),
        ("table", "Rarity"),
        ("table", "Printing"),
        ("view", "Printing_Lookup"),
    ] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2)",
                [kind, name],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "{kind} '{name}' should exist");
    }
}

#[test]
fn rarity_table_matches_enum() {
    let db = CardDatabase::open_memory().unwrap();
    let conn = db.connection().unwrap();
    let mut stmt = conn.prepare("SELECT Name FROM Rarity ORDER BY Rarity_ID").unwrap();
    let names: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let expected: Vec<&str> = mtg_deck_core::Rarity::all().iter().map(|r| r.name()).collect();
    assert_eq!(names, expected);
}

#[test]
fn reopening_keeps_existing_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.sqlite3");

    let mut db = CardDatabase::open(&path, true).unwrap();
    db.connection()
        .unwrap()
        .execute(
            "INSERT INTO Card (Scryfall_Oracle_ID, English_Name) VALUES ('x', 'Island')",
            [],
        )
        .unwrap();
    db.close().unwrap();

    let db = CardDatabase::open(&path, true).unwrap();
    let count: i64 = db
        .connection()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM Card", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

fn database_at_version(dir: &tempfile::TempDir, version: u64) -> std::path::PathBuf {
    let path = dir.path().join(format!("v{version}.sqlite3"));
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE Placeholder (x INTEGER); PRAGMA user_version = {version};"
    ))
    .unwrap();
    path
}

#[test]
fn stale_database_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = database_at_version(&dir, 1000);

    let err = CardDatabase::open(&path, true).err().unwrap();
    assert!(matches!(
        err,
        DbError::SchemaVersion(SchemaVersionError::TooOld {
            found: 1000,
            minimum: 2000
        })
    ));
    assert!(err.to_string().contains("0.1.0"));
}

#[test]
fn newer_database_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = database_at_version(&dir, 3000);

    let err = CardDatabase::open(&path, true).err().unwrap();
    assert!(matches!(
        err,
        DbError::SchemaVersion(SchemaVersionError::TooNew {
            found: 3000,
            maximum: 3000
        })
    ));
}

#[test]
fn unchecked_open_accepts_any_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = database_at_version(&dir, 1000);

    let db = CardDatabase::open(&path, false).unwrap();
    assert_eq!(db.current_schema_version().unwrap(), 1000);
}

#[test]
fn double_close_is_an_error() {
    let mut db = CardDatabase::open_memory().unwrap();
    db.close().unwrap();
    assert!(db.is_closed());
    assert!(matches!(db.close(), Err(DbError::DoubleClose)));
}

#[test]
fn use_after_close_is_an_error() {
    let mut db = CardDatabase::open_memory().unwrap();
    db.close().unwrap();
    assert!(matches!(db.current_schema_version(), Err(DbError::Closed)));
    assert!(matches!(db.is_populated(), Err(DbError::Closed)));
}

#[test]
fn close_rolls_back_pending_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.sqlite3");

    let mut db = CardDatabase::open(&path, true).unwrap();
    db.connection()
        .unwrap()
        .execute_batch(
            "BEGIN; INSERT INTO Card (Scryfall_Oracle_ID, English_Name) VALUES ('x', 'Island');",
        )
        .unwrap();
    db.close().unwrap();

    let db = CardDatabase::open(&path, true).unwrap();
    let count: i64 = db
        .connection()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM Card", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
