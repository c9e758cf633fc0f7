use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::controller::RequestSequence;
use crate::graphql::Catalog;
use crate::models::{CertificateSummary, Pagination};
use crate::query::SearchFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListingStatus {
    Idle,
    Loading,
    Loaded,
    /// No rows, including after a failed fetch.
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub is_searching: bool,
    pub search_term: String,
}

impl SearchState {
    pub fn is_likely_id(&self) -> bool {
        is_likely_id(&self.search_term)
    }

    /// The filter the current term maps to, if a search is active.
    pub fn filter(&self) -> Option<SearchFilter> {
        if !self.is_searching || self.search_term.is_empty() {
            return None;
        }
        Some(if self.is_likely_id() {
            SearchFilter::Id(self.search_term.clone())
        } else {
            SearchFilter::Name(self.search_term.clone())
        })
    }
}

/// A term reads as an id when it starts with a digit, contains `0x`, or is
/// purely alphanumeric.
pub fn is_likely_id(term: &str) -> bool {
    term.starts_with(|c: char| c.is_ascii_digit())
        || term.contains("0x")
        || (!term.is_empty() && term.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSnapshot {
    pub status: ListingStatus,
    pub certificates: Vec<CertificateSummary>,
    pub pagination: Pagination,
    pub search: SearchState,
}

/// Marketplace listing: pagination, search mode and the visible page.
pub struct ListingController<C> {
    catalog: C,
    state: Mutex<ListingSnapshot>,
    sequence: RequestSequence,
}

impl<C: Catalog> ListingController<C> {
    pub fn new(catalog: C, items_per_page: u32) -> Self {
        Self {
            catalog,
            state: Mutex::new(ListingSnapshot {
                status: ListingStatus::Idle,
                certificates: Vec::new(),
                pagination: Pagination::new(items_per_page),
                search: SearchState::default(),
            }),
            sequence: RequestSequence::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub async fn snapshot(&self) -> ListingSnapshot {
        self.state.lock().await.clone()
    }

    /// Fetch page `page` (1-based) in the current search mode.
    ///
    /// Failures are logged and shown as an empty list. A response that was
    /// overtaken by a newer request is discarded.
    pub async fn load_page(&self, page: u32) {
        let (ticket, filter, limit, offset) = {
            let mut state = self.state.lock().await;
            state.pagination.current_page = page.max(1);
            state.status = ListingStatus::Loading;
            (
                self.sequence.issue(),
                state.search.filter(),
                state.pagination.items_per_page,
                state.pagination.offset(),
            )
        };

        let result = match &filter {
            Some(filter) => self.catalog.fetch_search(filter, limit, offset).await,
            None => self.catalog.fetch_list(limit, offset).await,
        };

        let mut state = self.state.lock().await;
        if !self.sequence.is_current(ticket) {
            debug!(?ticket, page, "discarding stale listing response");
            return;
        }
        match result {
            Ok(page) => {
                state.status = if page.is_empty() {
                    ListingStatus::Empty
                } else {
                    ListingStatus::Loaded
                };
                state.pagination.total_count = page.count;
                state.certificates = page.data;
            }
            Err(e) => {
                match &filter {
                    Some(f) => error!("error searching hypercerts for '{}': {}", f.term(), e),
                    None => error!("error fetching hypercerts: {}", e),
                }
                state.certificates.clear();
                state.status = ListingStatus::Empty;
            }
        }
    }

    /// Trim `term`, pick name or id search, and reload from page 1. An empty
    /// term leaves search mode.
    pub async fn submit_search(&self, term: &str) {
        self.search_page(term, 1).await;
    }

    /// Like [`submit_search`](Self::submit_search) but lands on `page` with a
    /// single fetch.
    pub async fn search_page(&self, term: &str, page: u32) {
        let term = term.trim();
        {
            let mut state = self.state.lock().await;
            state.search = SearchState {
                is_searching: !term.is_empty(),
                search_term: term.to_string(),
            };
        }
        self.load_page(page).await;
    }

    pub async fn clear_search(&self) {
        {
            let mut state = self.state.lock().await;
            state.search = SearchState::default();
        }
        self.load_page(1).await;
    }

    /// Returns `false` without fetching when already on the last page.
    pub async fn next_page(&self) -> bool {
        let next = {
            let state = self.state.lock().await;
            if !state.pagination.has_next() {
                return false;
            }
            state.pagination.current_page + 1
        };
        self.load_page(next).await;
        true
    }

    /// Returns `false` without fetching when already on page 1.
    pub async fn prev_page(&self) -> bool {
        let prev = {
            let state = self.state.lock().await;
            if !state.pagination.has_prev() {
                return false;
            }
            state.pagination.current_page - 1
        };
        self.load_page(prev).await;
        true
    }
}
