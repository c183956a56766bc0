use titlebox_db::open_memory;
use titlebox_db::schema::{CURRENT_VERSION, SchemaError, create_schema, open_database};

fn recorded_versions(conn: &rusqlite::Connection) -> Vec<i32> {
    let mut stmt = conn.prepare("SELECT version FROM schema_version").unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn fresh_database_records_current_version() {
    let conn = open_memory().unwrap();
    assert_eq!(recorded_versions(&conn), vec![CURRENT_VERSION]);
}

#[test]
fn create_schema_twice_records_version_once() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
    assert_eq!(recorded_versions(&conn), vec![CURRENT_VERSION]);
}

#[test]
fn pictures_require_an_existing_title() {
    let conn = open_memory().unwrap();
    let orphan = conn.execute(
        "INSERT INTO pictures (title_id, name) VALUES ('deadbeef', '1')",
        [],
    );
    assert!(orphan.is_err());
}

#[test]
fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titles.db");
    open_database(&path)
        .unwrap()
        .execute(
            "INSERT INTO titles (title_id, name) VALUES ('413607d9', 'Halo 3')",
            [],
        )
        .unwrap();

    let conn = open_database(&path).unwrap();
    let name: String = conn
        .query_row(
            "SELECT name FROM titles WHERE title_id = '413607D9'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(name, "Halo 3");
    assert_eq!(recorded_versions(&conn), vec![CURRENT_VERSION]);
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titles.db");
    open_database(&path)
        .unwrap()
        .execute("INSERT INTO schema_version (version) VALUES (?1)", [CURRENT_VERSION + 1])
        .unwrap();

    match open_database(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, CURRENT_VERSION + 1);
        }
        other => panic!("expected a version mismatch, got {:?}", other.map(|_| ())),
    }
}
