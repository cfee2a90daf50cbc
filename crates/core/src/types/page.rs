//! Pagination for listing endpoints.

/// A validated page request.
///
/// Pages are 1-based. Rows for page `p` with limit `l` are
/// `(p - 1) * l + 1 ..= p * l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page used when none is requested.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when none is requested.
    pub const DEFAULT_LIMIT: u32 = 50;
    /// Largest accepted page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Build a page request from optional query values.
    ///
    /// Values below 1 fall back to the defaults. The page is capped at
    /// `u32::MAX` and the limit at [`PageRequest::MAX_LIMIT`].
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .filter(|p| *p >= 1)
            .map_or(Self::DEFAULT_PAGE, |p| u32::try_from(p).unwrap_or(u32::MAX));
        let limit = limit
            .filter(|l| *l >= 1)
            .map_or(Self::DEFAULT_LIMIT, |l| {
                u32::try_from(l).map_or(Self::MAX_LIMIT, |l| l.min(Self::MAX_LIMIT))
            });

        Self { page, limit }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Total number of pages for `total` rows.
    #[must_use]
    pub const fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::new(None, None);
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 50);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_second_page_of_ten() {
        let page = PageRequest::new(Some(2), Some(10));
        assert_eq!(page.offset(), 10);
        assert_eq!(page.total_pages(25), 3);
        assert_eq!(page.total_pages(20), 2);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let page = PageRequest::new(Some(0), Some(-5));
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(PageRequest::new(None, Some(1_000)).limit(), PageRequest::MAX_LIMIT);
        assert_eq!(
            PageRequest::new(None, Some(i64::MAX)).limit(),
            PageRequest::MAX_LIMIT
        );
    }

    #[test]
    fn test_huge_page_is_capped_not_reset() {
        let page = PageRequest::new(Some(5_000_000_000), Some(10));
        assert_eq!(page.page(), u32::MAX);
        assert_eq!(page.offset(), (u64::from(u32::MAX) - 1) * 10);
    }

    #[test]
    fn test_no_rows_means_no_pages() {
        assert_eq!(PageRequest::default().total_pages(0), 0);
    }
}
