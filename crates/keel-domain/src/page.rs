//! Paged query results

use serde::Serialize;

/// Immutable snapshot of one page of a query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedResult<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total matching items across all pages
    pub total_count: usize,
    /// One-based page number this snapshot covers
    pub page_number: usize,
    /// Page window size the query ran with
    pub page_size: usize,
}

impl<T> PagedResult<T> {
    /// Create a page snapshot
    pub fn new(items: Vec<T>, total_count: usize, page_number: usize, page_size: usize) -> Self {
        Self {
            items,
            total_count,
            page_number,
            page_size,
        }
    }

    /// Total pages: ceiling of total count over page size
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(self.page_size)
        }
    }

    /// Whether a page precedes this one
    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    /// Whether a page follows this one
    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages()
    }
}
