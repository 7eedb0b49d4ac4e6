//! Pagination arithmetic for catalog listings.

use serde::{Deserialize, Serialize};

/// Page size used when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Listing order for products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Natural (insertion) order.
    #[default]
    None,
    /// Cheapest first.
    Asc,
    /// Most expensive first.
    Desc,
}

impl SortOrder {
    /// Interpret the `sort` query parameter.
    ///
    /// Only `asc` and `desc` are recognised; anything else means natural order.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::Asc,
            Some("desc") => Self::Desc,
            _ => Self::None,
        }
    }

    /// The query parameter value that round-trips through [`Self::from_param`].
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A requested page: 1-based page number and page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a request, falling back to page 1 and `default_limit`.
    ///
    /// Zero values are clamped to 1.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl PageInfo {
    /// Compute page metadata for `request` over `total_items` matches.
    ///
    /// There is always at least one page, even when nothing matches.
    #[must_use]
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let pages = total_items.div_ceil(u64::from(request.limit())).max(1);
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        let page = request.page();

        Self {
            page,
            limit: request.limit(),
            total_items,
            total_pages,
            prev_page: (page > 1).then(|| page - 1),
            next_page: (page < total_pages).then(|| page + 1),
        }
    }

    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.prev_page.is_some()
    }

    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_from_param() {
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("ASC")), SortOrder::None);
        assert_eq!(SortOrder::from_param(None), SortOrder::None);
    }

    #[test]
    fn test_request_defaults_and_clamping() {
        let req = PageRequest::new(None, None, 10);
        assert_eq!((req.page(), req.limit(), req.offset()), (1, 10, 0));

        let req = PageRequest::new(Some(0), Some(0), 10);
        assert_eq!((req.page(), req.limit()), (1, 1));

        let req = PageRequest::new(Some(3), Some(5), 10);
        assert_eq!(req.offset(), 10);
    }

    #[test]
    fn test_first_of_several_pages() {
        let info = PageInfo::new(PageRequest::new(Some(1), Some(2), 10), 5);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.prev_page, None);
        assert_eq!(info.next_page, Some(2));
        assert!(!info.has_prev_page());
        assert!(info.has_next_page());
    }

    #[test]
    fn test_last_page() {
        let info = PageInfo::new(PageRequest::new(Some(3), Some(2), 10), 5);
        assert_eq!(info.prev_page, Some(2));
        assert_eq!(info.next_page, None);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let info = PageInfo::new(PageRequest::default(), 0);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next_page());
    }

    #[test]
    fn test_page_past_the_end() {
        let info = PageInfo::new(PageRequest::new(Some(99), Some(10), 10), 5);
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.prev_page, Some(98));
        assert_eq!(info.next_page, None);
    }
}
