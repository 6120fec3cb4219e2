//! Pagination types for history listings.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Creates a request, clamping `page` to at least 1 and `per_page` into `1..=max_per_page`.
    #[must_use]
    pub fn clamped(page: u32, per_page: u32, max_per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, max_per_page.max(1)),
        }
    }

    /// Number of items to skip.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.per_page as usize
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page as usize
    }

    /// Slices one page out of an already-ordered list.
    #[must_use]
    pub fn paginate<T: Clone>(&self, items: &[T]) -> PageResponse<T> {
        let data = items
            .iter()
            .skip(self.offset())
            .take(self.limit())
            .cloned()
            .collect();
        PageResponse::new(data, self.page, self.per_page, items.len() as u64)
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if total == 0 || per_page == 0 {
            1
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };

        Self {
            data,
            meta: PageMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_page_request_default() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 10);
        assert_eq!(req.offset(), 0);
    }

    #[rstest]
    #[case(0, 10, 1, 10)]
    #[case(3, 0, 3, 1)]
    #[case(2, 500, 2, 50)]
    fn test_clamped(
        #[case] page: u32,
        #[case] per_page: u32,
        #[case] want_page: u32,
        #[case] want_per_page: u32,
    ) {
        let req = PageRequest::clamped(page, per_page, 50);
        assert_eq!(req.page, want_page);
        assert_eq!(req.per_page, want_per_page);
    }

    #[rstest]
    #[case(0, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(95, 10, 10)]
    fn test_total_pages(#[case] total: u64, #[case] per_page: u32, #[case] expected: u32) {
        let resp: PageResponse<u8> = PageResponse::new(vec![], 1, per_page, total);
        assert_eq!(resp.meta.total_pages, expected);
    }

    #[test]
    fn test_paginate_second_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = PageRequest::clamped(2, 10, 50).paginate(&items);
        assert_eq!(page.data, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.meta.total, 25);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let items = vec![1, 2, 3];
        let page = PageRequest::clamped(5, 10, 50).paginate(&items);
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 3);
    }
}
