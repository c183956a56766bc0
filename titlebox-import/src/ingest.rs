//! One-time ingestion: fetch the remote catalog, join it with the pictures on
//! disk, and bulk-insert the result.
//!
//! The only de-duplication is the gate at the top of [`ingest`]: if any title
//! is already stored, nothing is fetched or written.

use std::path::PathBuf;

use rusqlite::Connection;
use thiserror::Error;
use titlebox_catalog::types::*;
use titlebox_db::{BATCH_SIZE, OperationError, operations, queries};
use titlebox_fetch::{CatalogClient, FetchError};

use crate::pictures::{PictureIndex, index_pictures};
use crate::progress::IngestProgress;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("fetching titles failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("inserting titles failed: {0}")]
    InsertTitles(#[source] OperationError),
    #[error("inserting pictures failed: {0}")]
    InsertPictures(#[source] OperationError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
}

/// Where to find image files on disk.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub pictures_root: PathBuf,
    /// File name suffix of image files, e.g. `.png`.
    pub suffix: String,
}

/// Counts from a completed ingestion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub titles: usize,
    pub pictures: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Storage already held titles; nothing was fetched or written.
    Skipped { existing: i64 },
    Loaded(IngestStats),
}

/// Populate an empty database from the remote catalog and the pictures folder.
///
/// A fetch failure or a failed title insert aborts ingestion. A pictures
/// folder that cannot be scanned is logged and treated as empty.
pub async fn ingest(
    conn: &Connection,
    client: &CatalogClient,
    options: &IngestOptions,
    progress: &dyn IngestProgress,
) -> Result<IngestOutcome, IngestError> {
    let existing = queries::count_titles(conn)?;
    if existing > 0 {
        progress.on_complete(&format!("Database already contains {} titles", existing));
        return Ok(IngestOutcome::Skipped { existing });
    }

    progress.on_phase("Fetching titles from API...");
    let titles = client
        .fetch_all_titles(|fetched, total| progress.on_page(fetched, total))
        .await?;

    progress.on_phase("Scanning pictures folder...");
    let index = match index_pictures(&options.pictures_root, &options.suffix) {
        Ok(index) => index,
        Err(e) => {
            log::warn!("Error reading picture dirs: {}", e);
            PictureIndex::new()
        }
    };

    let stats = store_catalog(conn, &titles, &index, progress)?;

    let entry = IngestLog {
        id: 0,
        source_url: client.base_url().to_string(),
        system: client.system().to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        titles_created: stats.titles as i64,
        pictures_created: stats.pictures as i64,
    };
    if let Err(e) = operations::insert_ingest_log(conn, &entry) {
        log::warn!("Failed to record ingestion: {}", e);
    }

    Ok(IngestOutcome::Loaded(stats))
}

/// One picture per image found in each title's folder, matched by lower-cased id.
pub fn build_pictures(titles: &[Title], index: &PictureIndex) -> Vec<Picture> {
    titles
        .iter()
        .flat_map(|title| {
            index
                .get(&title.key())
                .into_iter()
                .flatten()
                .map(|name| Picture::new(title.title_id.clone(), name.clone()))
        })
        .collect()
}

/// Insert `titles`, then the pictures joined from `index`.
pub fn store_catalog(
    conn: &Connection,
    titles: &[Title],
    index: &PictureIndex,
    progress: &dyn IngestProgress,
) -> Result<IngestStats, IngestError> {
    progress.on_phase("Inserting titles into database...");
    operations::insert_titles(conn, titles, BATCH_SIZE).map_err(IngestError::InsertTitles)?;

    let pictures = build_pictures(titles, index);
    if !pictures.is_empty() {
        progress.on_phase("Inserting pictures into database...");
        operations::insert_pictures(conn, &pictures, BATCH_SIZE)
            .map_err(IngestError::InsertPictures)?;
    }

    let stats = IngestStats {
        titles: titles.len(),
        pictures: pictures.len(),
    };
    progress.on_complete(&format!(
        "Successfully loaded {} titles and {} pictures into database",
        stats.titles, stats.pictures
    ));
    Ok(stats)
}
