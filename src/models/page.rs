use serde::{Deserialize, Serialize};

use crate::models::CertificateSummary;

/// One page of listing or search results plus the total match count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificatePage {
    pub data: Vec<CertificateSummary>,
    pub count: u64,
}

impl CertificatePage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 1-based pagination over a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_count: u64,
}

impl Pagination {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_count: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.items_per_page as u64)
    }

    pub fn offset(&self) -> u64 {
        (self.current_page.max(1) as u64 - 1) * self.items_per_page as u64
    }

    pub fn has_next(&self) -> bool {
        (self.current_page as u64) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}
