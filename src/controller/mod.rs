//! View-state controllers for the marketplace listing and the detail page.
//!
//! Each controller tags every fetch with a [`Ticket`] from its own
//! [`RequestSequence`]. A response is applied only if its ticket is still the
//! latest one issued; anything older is dropped, so a slow page-2 response can
//! never overwrite a page-1 response that was requested after it.

use std::sync::atomic::{AtomicU64, Ordering};

pub mod detail;
pub mod listing;

pub use detail::{DetailController, DetailStatus, DetailView};
pub use listing::{is_likely_id, ListingController, ListingSnapshot, ListingStatus, SearchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::error::CatalogError;
    use crate::graphql::Catalog;
    use crate::models::{CertificateDetail, CertificatePage, CertificateSummary, HypercertId};
    use crate::query::SearchFilter;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List { limit: u32, offset: u64 },
        Search { filter: SearchFilter, limit: u32, offset: u64 },
        Detail(String),
    }

    /// In-memory catalog with `total` generated hypercerts.
    ///
    /// Requests at a gated offset, or for a gated hypercert id, park until the
    /// gate is notified.
    #[derive(Default)]
    pub struct FakeCatalog {
        pub total: u64,
        pub fail: bool,
        pub details: HashMap<String, CertificateDetail>,
        pub gates: HashMap<u64, Arc<Notify>>,
        pub detail_gates: HashMap<String, Arc<Notify>>,
        pub calls: Mutex<Vec<Call>>,
        pub fetches: AtomicUsize,
    }

    impl FakeCatalog {
        pub fn with_total(total: u64) -> Self {
            Self {
                total,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn page(&self, limit: u32, offset: u64) -> CertificatePage {
            let end = (offset + limit as u64).min(self.total);
            let data = (offset..end)
                .map(|i| CertificateSummary {
                    id: format!("8453-0x0000000000000000000000000000000000000001-{}", i),
                    name: format!("Cert {}", i),
                    image: String::new(),
                    description: String::new(),
                    units: 1000,
                })
                .collect();
            CertificatePage {
                data,
                count: self.total,
            }
        }

        async fn wait_gate(&self, offset: u64) {
            if let Some(gate) = self.gates.get(&offset) {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn fetch_list(&self, limit: u32, offset: u64) -> Result<CertificatePage, CatalogError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(Call::List { limit, offset });
            self.wait_gate(offset).await;
            if self.fail {
                return Err(CatalogError::MalformedResponse("boom".to_string()));
            }
            Ok(self.page(limit, offset))
        }

        async fn fetch_search(
            &self,
            filter: &SearchFilter,
            limit: u32,
            offset: u64,
        ) -> Result<CertificatePage, CatalogError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(Call::Search {
                filter: filter.clone(),
                limit,
                offset,
            });
            self.wait_gate(offset).await;
            if self.fail {
                return Err(CatalogError::MalformedResponse("boom".to_string()));
            }
            Ok(self.page(limit, offset))
        }

        async fn fetch_by_id(&self, id: &HypercertId) -> Result<CertificateDetail, CatalogError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(Call::Detail(id.to_string()));
            if let Some(gate) = self.detail_gates.get(&id.to_string()) {
                gate.notified().await;
            }
            self.details
                .get(&id.to_string())
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
    }
}
