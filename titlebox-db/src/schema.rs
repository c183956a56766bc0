//! Table definitions and the schema version check.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database has schema version {found}, this build understands {expected}")]
    VersionMismatch { expected: i32, found: i32 },
}

pub const CURRENT_VERSION: i32 = 1;

/// Create missing tables and record [`CURRENT_VERSION`]. Running it again on
/// an up-to-date database changes nothing.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT INTO schema_version (version)
         SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM schema_version WHERE version = ?1)",
        [CURRENT_VERSION],
    )?;
    Ok(())
}

/// Open the title database at `path`, creating it on first use.
///
/// A database written by a different schema version is refused rather than
/// migrated.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    enable_foreign_keys(&conn)?;

    match stored_version(&conn)? {
        None => create_schema(&conn)?,
        Some(CURRENT_VERSION) => {}
        Some(found) => {
            return Err(SchemaError::VersionMismatch {
                expected: CURRENT_VERSION,
                found,
            });
        }
    }
    Ok(conn)
}

/// A private in-memory database with the schema applied.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    enable_foreign_keys(&conn)?;
    create_schema(&conn)?;
    Ok(conn)
}

fn enable_foreign_keys(conn: &Connection) -> Result<(), SchemaError> {
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(())
}

/// Highest recorded version; `None` for a fresh file.
fn stored_version(conn: &Connection) -> Result<Option<i32>, SchemaError> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_table {
        return Ok(None);
    }
    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Titles fetched from the remote catalog
CREATE TABLE IF NOT EXISTS titles (
    title_id TEXT PRIMARY KEY COLLATE NOCASE,
    name TEXT NOT NULL,
    systems TEXT NOT NULL DEFAULT '[]',
    bing_id TEXT NOT NULL DEFAULT '',
    service_config_id TEXT,
    pfn TEXT
);

-- Image files found on disk for a title
CREATE TABLE IF NOT EXISTS pictures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title_id TEXT NOT NULL COLLATE NOCASE
        REFERENCES titles(title_id) ON UPDATE CASCADE ON DELETE CASCADE,
    name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_pictures_title ON pictures(title_id);

-- One row per completed ingestion; informational only
CREATE TABLE IF NOT EXISTS ingest_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_url TEXT NOT NULL,
    system TEXT NOT NULL,
    imported_at TEXT NOT NULL,
    titles_created INTEGER NOT NULL DEFAULT 0,
    pictures_created INTEGER NOT NULL DEFAULT 0
);
"#;
