//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::DEFAULT_PAGE_NUMBER;

/// Pagination query parameters (reusable across all list endpoints).
///
/// Pages are 1-indexed; the page size is fixed per listing (9 for the
/// public post listing, 20 for the admin listings) rather than
/// client-controlled.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Requested page, 1-indexed
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
        }
    }
}

/// Total page count via ceiling division
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        (total + per_page - 1) / per_page
    } else {
        0
    }
}

/// Clamp a requested page into the valid range for a data set.
///
/// Requests beyond the last valid page come back as the last page, so the
/// public post listing can answer with real data instead of an empty tail.
/// An empty data set still reports page 1.
pub fn clamp_page(requested: u64, total: u64, per_page: u64) -> u64 {
    let pages = total_pages(total, per_page);
    if pages == 0 {
        DEFAULT_PAGE_NUMBER
    } else {
        requested.clamp(1, pages)
    }
}

/// Paginated response wrapper (reusable for all list responses)
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Page the data actually comes from (after clamping, if any)
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages: total_pages(total, per_page),
            },
        }
    }

    /// Map the items while keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_division() {
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(0, 20), 0);
    }

    #[test]
    fn clamps_beyond_last_page() {
        // 41 rows at 20 per page -> 3 pages; page 5 clamps to 3
        assert_eq!(clamp_page(5, 41, 20), 3);
        assert_eq!(clamp_page(3, 41, 20), 3);
        assert_eq!(clamp_page(1, 41, 20), 1);
    }

    #[test]
    fn clamps_zero_and_empty() {
        assert_eq!(clamp_page(0, 41, 20), 1);
        // empty data set still reports page 1
        assert_eq!(clamp_page(7, 0, 20), 1);
    }

    #[test]
    fn paginated_meta_matches_helpers() {
        let page = Paginated::new(vec![1, 2, 3], 2, 20, 41);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.total, 41);
    }
}
