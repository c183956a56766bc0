//! HTTP query service for the title catalog.
//!
//! Startup runs in a fixed order: open storage, ingest the remote catalog
//! once, then serve the read-only JSON API, the picture files, and the
//! frontend assets.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod search;
pub mod startup;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
pub use routes::router;
pub use startup::{StartupError, run};
pub use state::AppState;
