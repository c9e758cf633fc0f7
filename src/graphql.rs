use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::models::response::{decode_detail, decode_page};
use crate::models::{CertificateDetail, CertificatePage, HypercertId};
use crate::query::{
    build_detail_query, build_list_query, build_search_query, GraphqlRequest, SearchFilter,
};

/// Read access to the hypercert catalog.
///
/// Every call is a fresh round trip; implementations do not cache.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// One page of hypercerts on the configured chain.
    async fn fetch_list(&self, limit: u32, offset: u64) -> Result<CertificatePage, CatalogError>;

    async fn fetch_search(
        &self,
        filter: &SearchFilter,
        limit: u32,
        offset: u64,
    ) -> Result<CertificatePage, CatalogError>;

    /// Full record for one hypercert, or `CatalogError::NotFound`.
    async fn fetch_by_id(&self, id: &HypercertId) -> Result<CertificateDetail, CatalogError>;
}

pub struct HypercertsApi {
    api_url: String,
    chain_id: String,
    client: reqwest::Client,
}

impl HypercertsApi {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(&config.graph_url, &config.chain_id, client))
    }

    pub fn with_client(api_url: &str, chain_id: &str, client: reqwest::Client) -> Self {
        Self {
            api_url: crate::utils::remove_trailing_slash(api_url),
            chain_id: chain_id.to_string(),
            client,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    async fn post(&self, request: &GraphqlRequest) -> Result<Value, CatalogError> {
        debug!(operation = request.operation_name, "posting graphql request");
        let response = self.client.post(&self.api_url).json(request).send().await?;
        let status_error = response.error_for_status_ref().err();
        let body = response.text().await?;

        let parsed: Result<Value, _> = serde_json::from_str(&body);
        match (status_error, parsed) {
            (None, Ok(value)) => Ok(value),
            (None, Err(e)) => Err(CatalogError::MalformedResponse(format!(
                "response is not JSON: {}",
                e
            ))),
            // GraphQL servers report query errors with a 4xx and an `errors` body.
            (Some(status_error), Ok(value)) if value.get("errors").is_some() => {
                warn!(status = ?status_error.status(), "graphql request rejected");
                Ok(value)
            }
            (Some(status_error), _) => Err(CatalogError::Network(status_error)),
        }
    }

    /// Search with separate name and id terms, exactly one of which must be
    /// non-empty.
    pub async fn search_by_terms(
        &self,
        name: &str,
        id: &str,
        limit: u32,
        offset: u64,
    ) -> Result<CertificatePage, CatalogError> {
        let filter = SearchFilter::from_terms(name, id)?;
        self.fetch_search(&filter, limit, offset).await
    }

    /// Look up a hypercert by its raw `<chainId>-<contract>-<tokenId>` id.
    ///
    /// The id is validated and its address checksummed before any request
    /// goes out.
    pub async fn get_hypercert(&self, raw_id: &str) -> Result<CertificateDetail, CatalogError> {
        let id: HypercertId = raw_id.parse()?;
        self.fetch_by_id(&id).await
    }

    /// Every hypercert on the chain: read the count from a one-row page,
    /// then fetch that many rows at once.
    pub async fn fetch_all(&self) -> Result<CertificatePage, CatalogError> {
        let head = self.fetch_list(1, 0).await?;
        if head.count == 0 {
            return Ok(head);
        }
        let limit = u32::try_from(head.count).unwrap_or(u32::MAX);
        self.fetch_list(limit, 0).await
    }
}

#[async_trait]
impl Catalog for HypercertsApi {
    #[instrument(skip(self), fields(chain_id = %self.chain_id))]
    async fn fetch_list(&self, limit: u32, offset: u64) -> Result<CertificatePage, CatalogError> {
        let request = build_list_query(limit, offset, &self.chain_id);
        let body = self.post(&request).await?;
        let page = decode_page(body).into_result(|| {
            CatalogError::MalformedResponse("listing returned no page".to_string())
        })?;
        debug!(rows = page.data.len(), count = page.count, "listing fetched");
        Ok(page)
    }

    #[instrument(skip(self), fields(chain_id = %self.chain_id))]
    async fn fetch_search(
        &self,
        filter: &SearchFilter,
        limit: u32,
        offset: u64,
    ) -> Result<CertificatePage, CatalogError> {
        let request = build_search_query(filter, limit, offset, &self.chain_id);
        let body = self.post(&request).await?;
        let page = decode_page(body).into_result(|| {
            CatalogError::MalformedResponse("search returned no page".to_string())
        })?;
        debug!(rows = page.data.len(), count = page.count, "search fetched");
        Ok(page)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn fetch_by_id(&self, id: &HypercertId) -> Result<CertificateDetail, CatalogError> {
        let request = build_detail_query(id);
        let body = self.post(&request).await?;
        decode_detail(body).into_result(|| CatalogError::NotFound(id.to_string()))
    }
}
