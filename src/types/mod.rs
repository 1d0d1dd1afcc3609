//! Shared types used across layers.

mod pagination;

pub use pagination::{clamp_page, total_pages, PageQuery, Paginated, PaginationMeta};
