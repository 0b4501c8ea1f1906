//! Search service - composes filter, sort, and pagination
//!
//! The search flow: raw query items -> criteria -> filter clauses ->
//! windowed fetch + count -> response envelope. Both queries are read-only;
//! pagination metadata comes from the count query, not the fetched page.

use crate::{
    db::search::{
        build_filter, resolve_sort, total_pages, PageWindow, SearchCriteria, DEFAULT_PAGE_SIZE,
    },
    db::HotelRepository,
    models::{HotelSearchResponse, PaginationMeta},
    Result,
};

pub struct SearchService {
    hotels: HotelRepository,
    page_size: i64,
}

impl SearchService {
    pub fn new(hotels: HotelRepository) -> Self {
        Self {
            hotels,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Execute a hotel search and build the response envelope.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<HotelSearchResponse> {
        let clauses = build_filter(criteria);
        let sort = resolve_sort(criteria.sort_option.as_deref());
        let window = PageWindow::compute(criteria.page, self.page_size);

        let data = self.hotels.search(&clauses, sort, window).await?;
        let total = self.hotels.count(&clauses).await?;

        Ok(HotelSearchResponse {
            data,
            pagination: PaginationMeta {
                total,
                page: criteria.page,
                pages: total_pages(total, self.page_size),
            },
        })
    }
}
