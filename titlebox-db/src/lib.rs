//! SQLite persistence layer for the title catalog.
//!
//! Titles and pictures are written once, in bulk, by ingestion and are only
//! read afterwards.

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{BATCH_SIZE, OperationError, insert_ingest_log, insert_pictures, insert_titles};
pub use queries::{
    TitleFilter, all_titles, count_pictures, count_titles, find_title, latest_ingest_log,
    list_titles,
};
pub use schema::{SchemaError, open_database, open_memory};
