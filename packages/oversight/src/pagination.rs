// ABOUTME: Pagination utilities for report listings
// ABOUTME: Provides normalized query parameters and response metadata

use serde::{Deserialize, Serialize};

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_SIZE: i64 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Query parameters for pagination
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    /// Page number (1-indexed, defaults to 1)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Number of items per page (defaults to DEFAULT_PAGE_SIZE, max MAX_PAGE_SIZE)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    MIN_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PageParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Normalized page number; out-of-range input is clamped, never rejected.
    pub fn page(&self) -> i64 {
        self.page.max(MIN_PAGE)
    }

    /// Normalized page size; out-of-range input is clamped, never rejected.
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// SQL OFFSET of the requested slice (0-indexed).
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Metadata about pagination state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (1-indexed)
    pub current_page: i64,

    /// Total number of pages
    pub total_pages: i64,

    /// Total number of items across all pages
    pub total_count: i64,

    /// Items per page
    pub limit: i64,

    /// Whether there is a page after this one
    pub has_next: bool,

    /// Whether there is a page before this one
    pub has_prev: bool,
}

impl PageMeta {
    /// Create pagination metadata from normalized params and total count
    pub fn new(params: &PageParams, total_count: i64) -> Self {
        let current_page = params.page();
        let limit = params.limit();
        let total_pages = if limit > 0 {
            (total_count + limit - 1) / limit
        } else {
            0
        };

        Self {
            current_page,
            total_pages,
            total_count,
            limit,
            has_next: current_page < total_pages,
            has_prev: current_page > MIN_PAGE,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// The data items for the current page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PageParams, total_count: i64) -> Self {
        Self {
            data,
            pagination: PageMeta::new(params, total_count),
        }
    }
}
