//! Title catalog data model, pagination envelope, and fuzzy title ranking.
//!
//! This crate has no storage or network dependencies; `titlebox-db` persists
//! these types and `titlebox-server` serializes them.

pub mod fuzzy;
pub mod page;
pub mod types;

pub use fuzzy::{Rank, fold, rank_find};
pub use page::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Page, PageRequest, page_count};
pub use types::*;
