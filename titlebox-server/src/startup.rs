use std::path::PathBuf;

use rusqlite::Connection;
use thiserror::Error;
use titlebox_db::{SchemaError, open_database, queries};
use titlebox_fetch::{CatalogClient, FetchError};
use titlebox_import::{IngestError, IngestOutcome, LogProgress, ingest};

use crate::config::{Config, ConfigError};
use crate::routes::{API_PREFIX, router};
use crate::state::AppState;

/// Failures that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create data directory {}: {source}", path.display())]
    CreateDataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to open database: {0}")]
    Schema(#[from] SchemaError),
    #[error("failed to build catalog client: {0}")]
    Fetch(#[from] FetchError),
    #[error("ingestion failed: {0}")]
    Ingest(#[from] IngestError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the data directory if needed and open the database in it.
pub fn open_storage(config: &Config) -> Result<Connection, StartupError> {
    std::fs::create_dir_all(&config.data_dir).map_err(|source| StartupError::CreateDataDir {
        path: config.data_dir.clone(),
        source,
    })?;
    let path = config.db_path();
    log::info!("Opening database {}", path.display());
    Ok(open_database(&path)?)
}

fn log_stored_catalog(conn: &Connection) {
    match queries::count_pictures(conn) {
        Ok(pictures) => log::info!("{} pictures on record", pictures),
        Err(e) => log::warn!("Failed to count pictures: {}", e),
    }
    match queries::latest_ingest_log(conn) {
        Ok(Some(entry)) => log::info!(
            "Last ingested {} ({}) at {}",
            entry.source_url,
            entry.system,
            entry.imported_at
        ),
        Ok(None) => {}
        Err(e) => log::warn!("Failed to read ingest log: {}", e),
    }
}

/// Open storage, ingest the catalog if storage is empty, then serve until
/// the listener fails.
pub async fn run(config: Config) -> Result<(), StartupError> {
    let addr = config.socket_addr()?;
    let conn = open_storage(&config)?;

    let client = CatalogClient::new(&config.base_url, &config.system, config.limit as usize)?;
    match ingest(&conn, &client, &config.ingest_options(), &LogProgress).await? {
        IngestOutcome::Skipped { existing } => {
            log::info!("Database already holds {} titles, skipping ingestion", existing);
            log_stored_catalog(&conn);
        }
        IngestOutcome::Loaded(stats) => {
            log::info!(
                "Ingested {} titles and {} pictures",
                stats.titles,
                stats.pictures
            );
        }
    }

    let state = AppState::new(conn, &config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    log::info!("Server listening on http://{}", local);
    log::info!("API available at http://{}{}", local, API_PREFIX);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn open_storage_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested/data");
        let config = Config::try_parse_from([
            std::ffi::OsStr::new("titlebox"),
            std::ffi::OsStr::new("--data-dir"),
            data_dir.as_os_str(),
        ])
        .unwrap();

        let conn = open_storage(&config).unwrap();
        assert!(data_dir.join("titles.db").is_file());
        assert_eq!(queries::count_titles(&conn).unwrap(), 0);
    }
}
