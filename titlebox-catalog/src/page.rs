//! Pagination: request normalization and the response envelope.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// A normalized page request. `page >= 1` and `1 <= limit <= MAX_LIMIT` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Clamp raw values: a page below 1 becomes 1, a limit outside
    /// `1..=MAX_LIMIT` becomes the default.
    pub fn new(page: i64, limit: i64) -> Self {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let limit = if (1..=MAX_LIMIT).contains(&limit) {
            limit
        } else {
            DEFAULT_LIMIT
        };
        Self { page, limit }
    }

    /// Build from query-string values. Missing values take their defaults;
    /// unparseable values are treated as zero and clamped.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.map_or(DEFAULT_PAGE, parse_or_zero);
        let limit = limit.map_or(DEFAULT_LIMIT, parse_or_zero);
        Self::new(page, limit)
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_or_zero(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Page envelope: `{ items, total, limit, offset, page, pages }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub page: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest, offset: i64) -> Self {
        Self {
            items,
            total,
            limit: request.limit,
            offset,
            page: request.page,
            pages: page_count(total, request.limit),
        }
    }

    /// Slice the requested window out of an already-ordered result list.
    /// The reported offset is clamped to the list length.
    pub fn from_ranked(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as i64;
        let offset = request.offset().min(total);
        let end = offset.saturating_add(request.limit).min(total);
        let items = all
            .into_iter()
            .skip(offset as usize)
            .take((end - offset) as usize)
            .collect();
        Self::new(items, total, request, offset)
    }

    /// Convert the items, keeping the paging fields.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
            page: self.page,
            pages: self.pages,
        }
    }
}

/// `ceil(total / limit)`.
pub fn page_count(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_values_reset() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, limit: 20 });
        assert_eq!(PageRequest::new(-3, -1), PageRequest { page: 1, limit: 20 });
        assert_eq!(PageRequest::new(2, 101), PageRequest { page: 2, limit: 20 });
        assert_eq!(PageRequest::new(5, 100), PageRequest { page: 5, limit: 100 });
        assert_eq!(PageRequest::new(1, 1), PageRequest { page: 1, limit: 1 });
    }

    #[test]
    fn parse_handles_garbage() {
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::parse(Some("abc"), Some("x")),
            PageRequest { page: 1, limit: 20 }
        );
        assert_eq!(
            PageRequest::parse(Some("3"), Some("50")),
            PageRequest { page: 3, limit: 50 }
        );
    }

    #[test]
    fn offset_from_page() {
        assert_eq!(PageRequest::new(1, 20).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 50);
    }

    #[test]
    fn pages_is_ceiling() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(140, 100), 2);
    }

    #[test]
    fn ranked_window() {
        let all: Vec<i32> = (0..45).collect();
        let page = Page::from_ranked(all.clone(), PageRequest::new(3, 20));
        assert_eq!(page.items, (40..45).collect::<Vec<_>>());
        assert_eq!(page.total, 45);
        assert_eq!(page.offset, 40);
        assert_eq!(page.pages, 3);

        let past_end = Page::from_ranked(all, PageRequest::new(9, 20));
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.offset, 45);
        assert_eq!(past_end.page, 9);
    }

    #[test]
    fn empty_items_serialize_as_array() {
        let page: Page<i32> = Page::from_ranked(Vec::new(), PageRequest::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["pages"], 0);
    }
}
