use serde::Serialize;

/// Largest offset a database driver accepts (`BIGINT`).
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A 1-based page request with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Build a request, clamping `per_page` to `1..=max_per_page` and `page`
    /// to `1..=` the last page whose offset still fits a signed 64-bit
    /// SQL parameter.
    pub fn new(
        page: Option<u64>,
        per_page: Option<u64>,
        default_per_page: u64,
        max_per_page: u64,
    ) -> Self {
        let max_per_page = max_per_page.max(1);
        let per_page = per_page.unwrap_or(default_per_page).clamp(1, max_per_page);
        let max_page = MAX_OFFSET / per_page + 1;
        Self {
            page: page.unwrap_or(1).clamp(1, max_page),
            per_page,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
