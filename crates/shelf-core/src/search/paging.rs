//! Page arithmetic for catalog searches

use serde::{Deserialize, Serialize};

use super::SearchError;

/// Largest page the catalog will return in one request
pub const MAX_PAGE_SIZE: u32 = 40;

/// Fixed page size plus a local cap on addressable results
///
/// The cap applies no matter what total the catalog reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPaging {
    page_size: u32,
    result_cap: u32,
}

impl SearchPaging {
    pub fn new(page_size: u32, result_cap: u32) -> Result<Self, SearchError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(SearchError::InvalidPaging(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if result_cap < page_size {
            return Err(SearchError::InvalidPaging(
                "result_cap must be at least one page".to_string(),
            ));
        }
        Ok(Self {
            page_size,
            result_cap,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn result_cap(&self) -> u32 {
        self.result_cap
    }

    /// Highest page reachable under the cap
    pub fn last_addressable_page(&self) -> u32 {
        self.result_cap.div_ceil(self.page_size)
    }

    /// Zero-based catalog offset of a one-based page
    pub fn start_index(&self, page: u32) -> Result<u32, SearchError> {
        let max_page = self.last_addressable_page();
        if page == 0 || page > max_page {
            return Err(SearchError::PageOutOfRange { page, max_page });
        }
        Ok((page - 1) * self.page_size)
    }

    /// Results to request starting at `start_index`, trimmed at the cap
    pub fn max_results(&self, start_index: u32) -> u32 {
        self.page_size
            .min(self.result_cap.saturating_sub(start_index))
    }

    pub fn addressable(&self, total_count: u64) -> u64 {
        total_count.min(u64::from(self.result_cap))
    }

    pub fn total_pages(&self, total_count: u64) -> u32 {
        // Bounded by result_cap, so it fits in u32
        self.addressable(total_count)
            .div_ceil(u64::from(self.page_size)) as u32
    }
}

impl Default for SearchPaging {
    fn default() -> Self {
        Self {
            page_size: 20,
            result_cap: 200,
        }
    }
}
