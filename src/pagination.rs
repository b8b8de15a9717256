//! Page-size and page-number resolution.
//!
//! Pagination input never blocks a query: anything missing or unparsable falls back to the
//! defaults instead of producing an error.

use crate::models::PageParams;

const PAGE_SIZE_DEFAULT: i64 = 10;
const PAGE_SIZE_CAP: i64 = 100;

pub const DEFAULT_PAGE_SIZE: u64 = PAGE_SIZE_DEFAULT.unsigned_abs();
pub const MAX_PAGE_SIZE: u64 = PAGE_SIZE_CAP.unsigned_abs();

/// Bounds handed to storage. `limit` is always within `1..=MAX_PAGE_SIZE`; `offset` never
/// exceeds `i64::MAX`, the largest value a SQL driver will bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    /// Clamps raw `pagesize` / `pagenum` strings into a `(limit, offset)` pair.
    ///
    /// - `page_size >= 100` gives a limit of 100, `page_size <= 0` gives 10, anything in
    ///   between is used as is.
    /// - `page_num <= 0` is treated as the first page.
    /// - the offset saturates at `i64::MAX` instead of overflowing.
    #[must_use]
    pub fn resolve(raw_size: Option<&str>, raw_num: Option<&str>) -> Self {
        let page_size = parse_or_zero(raw_size);
        let page_num = parse_or_zero(raw_num).max(1);

        let limit = if page_size >= PAGE_SIZE_CAP {
            PAGE_SIZE_CAP
        } else if page_size <= 0 {
            PAGE_SIZE_DEFAULT
        } else {
            page_size
        };

        Self {
            limit: limit.unsigned_abs(),
            offset: (page_num - 1).saturating_mul(limit).unsigned_abs(),
        }
    }

    #[must_use]
    pub fn from_params(params: &PageParams) -> Self {
        Self::resolve(params.pagesize.as_deref(), params.pagenum.as_deref())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

fn parse_or_zero(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}
