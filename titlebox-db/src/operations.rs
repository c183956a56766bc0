//! Write operations: bulk inserts performed once at ingestion.

use rusqlite::types::ToSql;
use rusqlite::{Connection, params};
use thiserror::Error;
use titlebox_catalog::types::*;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rows per multi-row `INSERT` statement.
pub const BATCH_SIZE: usize = 100;

// ── Title Operations ────────────────────────────────────────────────────────

/// Insert titles in batches of `batch_size` rows, all inside one transaction.
///
/// Nothing is written if any batch fails. Attached pictures are ignored;
/// use [`insert_pictures`] for those.
pub fn insert_titles(
    conn: &Connection,
    titles: &[Title],
    batch_size: usize,
) -> Result<usize, OperationError> {
    let tx = conn.unchecked_transaction()?;
    for chunk in titles.chunks(batch_size.max(1)) {
        let sql = batch_sql(
            "INSERT INTO titles (title_id, name, systems, bing_id, service_config_id, pfn) VALUES ",
            6,
            chunk.len(),
        );
        let systems = chunk
            .iter()
            .map(|t| serde_json::to_string(&t.systems))
            .collect::<Result<Vec<_>, _>>()?;

        let mut values: Vec<&dyn ToSql> = Vec::with_capacity(chunk.len() * 6);
        for (title, systems) in chunk.iter().zip(&systems) {
            values.push(&title.title_id);
            values.push(&title.name);
            values.push(systems);
            values.push(&title.bing_id);
            values.push(&title.service_config_id);
            values.push(&title.pfn);
        }
        tx.execute(&sql, values.as_slice())?;
    }
    tx.commit()?;
    Ok(titles.len())
}

// ── Picture Operations ──────────────────────────────────────────────────────

/// Insert pictures in batches of `batch_size` rows, all inside one transaction.
/// Each picture's `id` is ignored and assigned by SQLite.
pub fn insert_pictures(
    conn: &Connection,
    pictures: &[Picture],
    batch_size: usize,
) -> Result<usize, OperationError> {
    let tx = conn.unchecked_transaction()?;
    for chunk in pictures.chunks(batch_size.max(1)) {
        let sql = batch_sql("INSERT INTO pictures (title_id, name) VALUES ", 2, chunk.len());
        let mut values: Vec<&dyn ToSql> = Vec::with_capacity(chunk.len() * 2);
        for picture in chunk {
            values.push(&picture.title_id);
            values.push(&picture.name);
        }
        tx.execute(&sql, values.as_slice())?;
    }
    tx.commit()?;
    Ok(pictures.len())
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// Insert an ingestion log entry. Returns the row id.
pub fn insert_ingest_log(conn: &Connection, log: &IngestLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO ingest_log (source_url, system, imported_at, titles_created, pictures_created)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            log.source_url,
            log.system,
            log.imported_at,
            log.titles_created,
            log.pictures_created,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// `prefix` followed by `rows` groups of `columns` placeholders.
fn batch_sql(prefix: &str, columns: usize, rows: usize) -> String {
    let group = format!("({})", vec!["?"; columns].join(", "));
    let mut sql = String::with_capacity(prefix.len() + rows * (group.len() + 2));
    sql.push_str(prefix);
    for i in 0..rows {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&group);
    }
    sql
}
