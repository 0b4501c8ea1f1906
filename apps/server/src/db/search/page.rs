//! Pagination window arithmetic

/// Hotels returned per page.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// The (skip, limit) slice of a result set for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Compute the window for a 1-based page number.
    ///
    /// Page numbers below 1 are clamped to 1. A page beyond the last simply
    /// produces an offset past the result set; the fetch returns no rows.
    /// The offset saturates, so arbitrarily large page numbers stay valid.
    pub fn compute(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        Self {
            skip: page.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }
}

/// Total page count for a result set; 0 when there are no matches.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}
