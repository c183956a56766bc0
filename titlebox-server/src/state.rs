use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use titlebox_db::OperationError;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Shared handler state. Cloned per request.
///
/// All requests share one connection, so reads are serialized.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    pub pictures_root: PathBuf,
    pub pictures_suffix: String,
    pub static_dir: PathBuf,
    pub openapi_file: PathBuf,
}

impl AppState {
    pub fn new(conn: Connection, config: &Config) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            pictures_root: config.pictures_folder.clone(),
            pictures_suffix: config.pictures_suffix.clone(),
            static_dir: config.static_dir.clone(),
            openapi_file: config.openapi_file.clone(),
        }
    }

    /// Run a read on the connection off the async workers.
    pub async fn with_db<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> Result<T, OperationError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| AppError::database("connection lock poisoned"))?;
            f(&conn).map_err(AppError::from)
        })
        .await
        .map_err(AppError::database)?
    }
}
