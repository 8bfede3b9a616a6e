//! Page-number pagination types.
//!
//! List endpoints return a fixed-size page plus totals and navigation
//! links:
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": { "current_page": 1, "per_page": 20, "total": 41, "last_page": 3 },
//!   "links": { "first": "...", "last": "...", "prev": null, "next": "..." }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Fixed page size for all list endpoints.
pub const PER_PAGE: i64 = 20;

/// Pagination query parameters, as received from the client.
///
/// Invalid or missing values fall back to page 1 rather than erroring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

impl PageParams {
    /// The 1-based page number to serve.
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * PER_PAGE
    }
}

/// Totals for the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
}

/// Navigation links for the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// A page of results with its envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
    pub links: PageLinks,
}

impl<T> Page<T> {
    /// Build a page envelope from one page of rows plus the filtered total.
    ///
    /// `path` is the request path used to render navigation links
    /// (e.g. `/api/offices`).
    pub fn new(data: Vec<T>, total: i64, current_page: i64, path: &str) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + PER_PAGE - 1) / PER_PAGE
        };

        let link = |page: i64| format!("{}?page={}", path, page);

        Page {
            data,
            meta: PageMeta {
                current_page,
                per_page: PER_PAGE,
                total,
                last_page,
            },
            links: PageLinks {
                first: link(1),
                last: link(last_page),
                prev: (current_page > 1).then(|| link(current_page - 1)),
                next: (current_page < last_page).then(|| link(current_page + 1)),
            },
        }
    }
}
