//! Ingestion progress reporting.

/// Receives ingestion progress. Implementations must not fail.
pub trait IngestProgress {
    /// After each remote page: items in that page, items fetched so far.
    fn on_page(&self, fetched: usize, total: usize);

    /// A phase is starting: fetch, picture scan, title insert, picture insert.
    fn on_phase(&self, message: &str);

    /// Final summary, also sent when ingestion is skipped.
    fn on_complete(&self, message: &str);
}

/// Discards everything.
pub struct SilentProgress;

impl IngestProgress for SilentProgress {
    fn on_page(&self, _fetched: usize, _total: usize) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Reports through `log::info!`.
pub struct LogProgress;

impl IngestProgress for LogProgress {
    fn on_page(&self, fetched: usize, total: usize) {
        log::info!("Fetched {} titles (total: {})", fetched, total);
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
