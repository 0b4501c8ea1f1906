//! Hotel search primitives: criteria, filter clauses, sort, pagination.

pub mod criteria;
pub mod filter;
pub mod page;
pub mod sort;

pub use criteria::SearchCriteria;
pub use filter::{build_filter, render_where, BindValue, FilterClause};
pub use page::{total_pages, PageWindow, DEFAULT_PAGE_SIZE};
pub use sort::{order_by_sql, resolve_sort, SortField, SortSpec};
