use titlebox_catalog::types::{CatalogPage, Title};

use crate::error::FetchError;

/// HTTP client for the remote title catalog.
///
/// Pages are requested one at a time as
/// `<base_url>?system=<system>&limit=<page_size>&offset=<offset>` until a
/// page comes back shorter than `page_size`.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    system: String,
    page_size: usize,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        system: impl Into<String>,
        page_size: usize,
    ) -> Result<Self, FetchError> {
        if page_size == 0 {
            return Err(FetchError::Config("page size must be at least 1".to_string()));
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            system: system.into(),
            page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch one page starting at `offset`.
    pub async fn fetch_page(&self, offset: usize) -> Result<CatalogPage, FetchError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("system", self.system.clone()),
                ("limit", self.page_size.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        // Reading the body to the end releases the connection either way.
        let body = resp.bytes().await?;

        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch every page and return all titles in source order.
    ///
    /// `on_page` is called after each page with the page's item count and the
    /// running total. Any failure aborts the whole fetch; nothing is retried.
    pub async fn fetch_all_titles(
        &self,
        mut on_page: impl FnMut(usize, usize),
    ) -> Result<Vec<Title>, FetchError> {
        let mut all_titles = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(offset).await?;
            let fetched = page.items.len();
            all_titles.extend(page.items);

            log::debug!(
                "Fetched page at offset {} ({} items, remote count {})",
                offset,
                fetched,
                page.count
            );
            on_page(fetched, all_titles.len());

            if fetched < self.page_size {
                break;
            }
            offset += self.page_size;
        }

        Ok(all_titles)
    }
}
