//! Client-side pagination for history lists

use serde::{Deserialize, Serialize};

/// Rows per page in the metrics history
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a list, with the numbers a "showing X-Y of Z" footer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page, 1-based, clamped into range
    pub page: usize,
    pub per_page: usize,
    pub page_count: usize,
    pub total: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub showing_from: usize,
    /// 1-based index of the last row shown, 0 when empty
    pub showing_to: usize,
}

/// Slice out one page
///
/// There is always at least one page. Out-of-range page numbers are clamped;
/// a zero page size falls back to [`DEFAULT_PAGE_SIZE`].
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> Page<T> {
    let per_page = if pagination.per_page == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        pagination.per_page
    };
    let total = items.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = pagination.page.clamp(1, page_count);

    let (start, end) = if total == 0 {
        (0, 0)
    } else {
        let start = (page - 1) * per_page;
        (start, (start + per_page).min(total))
    };

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        page_count,
        total,
        showing_from: if total == 0 { 0 } else { start + 1 },
        showing_to: end,
    }
}
