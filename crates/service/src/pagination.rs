//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Fixed page size of the invoice listing.
pub const ITEMS_PER_PAGE: u32 = 6;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Invoice listing page; page 0 is read as page 1.
    pub fn invoices(page: u32) -> Self {
        Self { page, per_page: ITEMS_PER_PAGE }
    }

    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }

    /// Rows to skip: `(page - 1) * per_page`.
    pub fn offset(self) -> u64 {
        let (page_idx, per_page) = self.normalize();
        page_idx * per_page
    }
}

impl Default for Pagination {
    fn default() -> Self { Self::invoices(1) }
}

/// `ceil(count / per_page)`; zero rows means zero pages.
pub fn total_pages(count: u64, per_page: u32) -> u64 {
    count.div_ceil(per_page.max(1) as u64)
}
