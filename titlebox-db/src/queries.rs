//! Read queries for the title database.
//!
//! Provides counts, paginated listing, lookup by id, and the full title set
//! used by fuzzy search. Titles are always returned with their pictures.

use std::collections::HashMap;

use rusqlite::types::{ToSql, Type};
use rusqlite::{Connection, Row, params};
use titlebox_catalog::page::{Page, PageRequest};
use titlebox_catalog::types::*;

use crate::operations::OperationError;

const TITLE_COLUMNS: &str = "t.title_id, t.name, t.systems, t.bing_id, t.service_config_id, t.pfn";

/// Options for [`list_titles`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleFilter {
    pub request: PageRequest,
    /// Restrict to titles with at least one picture.
    pub only_with_pictures: bool,
    /// Order by title id descending instead of ascending.
    pub reverse: bool,
}

// ── Counts ──────────────────────────────────────────────────────────────────

pub fn count_titles(conn: &Connection) -> Result<i64, OperationError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM titles", [], |r| r.get(0))?)
}

pub fn count_pictures(conn: &Connection) -> Result<i64, OperationError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM pictures", [], |r| r.get(0))?)
}

// ── Title Queries ───────────────────────────────────────────────────────────

/// List one page of titles ordered by id.
///
/// With `only_with_pictures` the titles are inner-joined to pictures and
/// grouped by id, so `total` counts only titles that have pictures.
pub fn list_titles(conn: &Connection, filter: &TitleFilter) -> Result<Page<Title>, OperationError> {
    let from = if filter.only_with_pictures {
        "FROM titles t JOIN pictures p ON t.title_id = p.title_id GROUP BY t.title_id"
    } else {
        "FROM titles t"
    };
    let direction = if filter.reverse { "DESC" } else { "ASC" };

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM (SELECT t.title_id {from})"),
        [],
        |r| r.get(0),
    )?;

    let request = filter.request;
    let offset = request.offset();
    let mut stmt = conn.prepare(&format!(
        "SELECT {TITLE_COLUMNS} {from} ORDER BY t.title_id {direction} LIMIT ?1 OFFSET ?2"
    ))?;
    let mut titles = stmt
        .query_map(params![request.limit, offset], row_to_title)?
        .collect::<Result<Vec<_>, _>>()?;
    attach_pictures(conn, &mut titles)?;

    Ok(Page::new(titles, total, request, offset))
}

/// Find a title by id (case-insensitive), with pictures attached.
pub fn find_title(conn: &Connection, title_id: &str) -> Result<Option<Title>, OperationError> {
    let result = conn.query_row(
        &format!("SELECT {TITLE_COLUMNS} FROM titles t WHERE t.title_id = ?1"),
        params![title_id],
        row_to_title,
    );
    match result {
        Ok(title) => {
            let mut titles = vec![title];
            attach_pictures(conn, &mut titles)?;
            Ok(titles.pop())
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load every title with its pictures, in ingestion order.
pub fn all_titles(conn: &Connection) -> Result<Vec<Title>, OperationError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {TITLE_COLUMNS} FROM titles t ORDER BY t.rowid"))?;
    let mut titles = stmt
        .query_map([], row_to_title)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut picture_stmt = conn.prepare("SELECT id, title_id, name FROM pictures ORDER BY id")?;
    let mut by_title = group_pictures(picture_stmt.query_map([], row_to_picture)?)?;
    for title in &mut titles {
        if let Some(pictures) = by_title.remove(&title.key()) {
            title.pictures = pictures;
        }
    }
    Ok(titles)
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// The most recent ingestion record, if any.
pub fn latest_ingest_log(conn: &Connection) -> Result<Option<IngestLog>, OperationError> {
    let result = conn.query_row(
        "SELECT id, source_url, system, imported_at, titles_created, pictures_created
         FROM ingest_log ORDER BY id DESC LIMIT 1",
        [],
        |row| {
            Ok(IngestLog {
                id: row.get(0)?,
                source_url: row.get(1)?,
                system: row.get(2)?,
                imported_at: row.get(3)?,
                titles_created: row.get(4)?,
                pictures_created: row.get(5)?,
            })
        },
    );
    match result {
        Ok(log) => Ok(Some(log)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Row Mappers ─────────────────────────────────────────────────────────────

/// Load pictures for `titles` with one `IN (...)` query and attach them.
fn attach_pictures(conn: &Connection, titles: &mut [Title]) -> Result<(), OperationError> {
    if titles.is_empty() {
        return Ok(());
    }
    let placeholders = vec!["?"; titles.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT id, title_id, name FROM pictures WHERE title_id IN ({placeholders}) ORDER BY id"
    ))?;
    let ids: Vec<&dyn ToSql> = titles.iter().map(|t| &t.title_id as &dyn ToSql).collect();
    let mut by_title = group_pictures(stmt.query_map(ids.as_slice(), row_to_picture)?)?;

    for title in titles.iter_mut() {
        title.pictures = by_title.remove(&title.key()).unwrap_or_default();
    }
    Ok(())
}

fn group_pictures(
    rows: impl Iterator<Item = rusqlite::Result<Picture>>,
) -> Result<HashMap<String, Vec<Picture>>, OperationError> {
    let mut grouped: HashMap<String, Vec<Picture>> = HashMap::new();
    for picture in rows {
        let picture = picture?;
        grouped
            .entry(picture.title_id.to_lowercase())
            .or_default()
            .push(picture);
    }
    Ok(grouped)
}

fn row_to_title(row: &Row) -> rusqlite::Result<Title> {
    let systems: String = row.get(2)?;
    let systems = serde_json::from_str(&systems)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(Title {
        title_id: row.get(0)?,
        name: row.get(1)?,
        systems,
        bing_id: row.get(3)?,
        service_config_id: row.get(4)?,
        pfn: row.get(5)?,
        pictures: Vec::new(),
    })
}

fn row_to_picture(row: &Row) -> rusqlite::Result<Picture> {
    Ok(Picture {
        id: row.get(0)?,
        title_id: row.get(1)?,
        name: row.get(2)?,
    })
}
