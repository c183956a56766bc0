//! Client for the remote title catalog (`{ items, count }` pages paged by
//! `limit`/`offset`).

pub mod client;
pub mod error;

pub use client::CatalogClient;
pub use error::FetchError;
