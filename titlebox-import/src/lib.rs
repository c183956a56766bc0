//! Ingest the remote title catalog and the local pictures folder into the
//! title database.
//!
//! This crate owns the ETL logic: scanning the pictures tree, fetching the
//! remote catalog, joining the two by title id, and bulk-inserting the result
//! exactly once.

pub mod ingest;
pub mod pictures;
pub mod progress;

pub use ingest::{
    IngestError, IngestOptions, IngestOutcome, IngestStats, build_pictures, ingest, store_catalog,
};
pub use pictures::{PictureIndex, ScanError, index_pictures, strip_suffix_ignore_case};
pub use progress::{IngestProgress, LogProgress, SilentProgress};
