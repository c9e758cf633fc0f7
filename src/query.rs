//! GraphQL documents for the hypercerts API.
//!
//! Query documents are static; every caller-supplied value (chain id, paging,
//! search text, hypercert id) travels in `variables`, so user input never
//! becomes part of the query text.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::CatalogError;
use crate::models::HypercertId;

const LIST_QUERY: &str = r#"
query Hypercerts($chain_id: BigInt!, $first: Int!, $offset: Int!) {
  hypercerts(
    where: { contract: { chain_id: { eq: $chain_id } } }
    first: $first
    offset: $offset
  ) {
    count
    data {
      hypercert_id
      metadata {
        name
        image
        description
      }
      units
    }
  }
}
"#;

const SEARCH_BY_NAME_QUERY: &str = r#"
query SearchHypercertsByName($chain_id: BigInt!, $name: String!, $first: Int!, $offset: Int!) {
  hypercerts(
    where: {
      contract: { chain_id: { eq: $chain_id } }
      metadata: { name: { contains: $name } }
    }
    first: $first
    offset: $offset
  ) {
    count
    data {
      hypercert_id
      metadata {
        name
        image
        description
      }
      units
    }
  }
}
"#;

const SEARCH_BY_ID_QUERY: &str = r#"
query SearchHypercertsById($chain_id: BigInt!, $hypercert_id: String!, $first: Int!, $offset: Int!) {
  hypercerts(
    where: {
      contract: { chain_id: { eq: $chain_id } }
      hypercert_id: { contains: $hypercert_id }
    }
    first: $first
    offset: $offset
  ) {
    count
    data {
      hypercert_id
      metadata {
        name
        image
        description
      }
      units
    }
  }
}
"#;

const DETAIL_QUERY: &str = r#"
query HypercertById($hypercert_id: String!) {
  hypercerts(where: { hypercert_id: { eq: $hypercert_id } }, first: 1) {
    data {
      hypercert_id
      units
      orders {
        totalUnitsForSale
        data {
          pricePerPercentInToken
          pricePerPercentInUSD
          chainId
          currency
          signature
          additionalParameters
          signer
          price
          itemIds
          strategyId
          amounts
          id
          collectionType
          collection
          createdAt
          endTime
          orderNonce
          subsetNonce
          startTime
          globalNonce
          quoteType
          validator_codes
          hypercert_id
        }
        cheapestOrder {
          amounts
        }
      }
      metadata {
        image
        name
        work_scope
        description
      }
    }
  }
}
"#;

/// A ready-to-POST GraphQL request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: &'static str,
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
    pub variables: Value,
}

/// Exactly one search filter is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    /// Case-sensitive substring of the metadata name.
    Name(String),
    /// Substring of the `<chainId>-<contract>-<tokenId>` identifier.
    Id(String),
}

impl SearchFilter {
    /// Build from a name term and an id term, exactly one of which must be
    /// non-empty.
    pub fn from_terms(name: &str, id: &str) -> Result<Self, CatalogError> {
        match (name.is_empty(), id.is_empty()) {
            (false, true) => Ok(SearchFilter::Name(name.to_string())),
            (true, false) => Ok(SearchFilter::Id(id.to_string())),
            (false, false) => Err(CatalogError::InvalidSearch(
                "name and id filters are mutually exclusive".to_string(),
            )),
            (true, true) => Err(CatalogError::InvalidSearch(
                "a search needs a name or id term".to_string(),
            )),
        }
    }

    pub fn term(&self) -> &str {
        match self {
            SearchFilter::Name(t) | SearchFilter::Id(t) => t,
        }
    }
}

pub fn build_list_query(limit: u32, offset: u64, chain_id: &str) -> GraphqlRequest {
    GraphqlRequest {
        query: LIST_QUERY,
        operation_name: "Hypercerts",
        variables: json!({
            "chain_id": chain_id,
            "first": limit,
            "offset": offset,
        }),
    }
}

pub fn build_search_query(
    filter: &SearchFilter,
    limit: u32,
    offset: u64,
    chain_id: &str,
) -> GraphqlRequest {
    match filter {
        SearchFilter::Name(name) => GraphqlRequest {
            query: SEARCH_BY_NAME_QUERY,
            operation_name: "SearchHypercertsByName",
            variables: json!({
                "chain_id": chain_id,
                "name": name,
                "first": limit,
                "offset": offset,
            }),
        },
        SearchFilter::Id(id) => GraphqlRequest {
            query: SEARCH_BY_ID_QUERY,
            operation_name: "SearchHypercertsById",
            variables: json!({
                "chain_id": chain_id,
                "hypercert_id": id,
                "first": limit,
                "offset": offset,
            }),
        },
    }
}

pub fn build_detail_query(id: &HypercertId) -> GraphqlRequest {
    GraphqlRequest {
        query: DETAIL_QUERY,
        operation_name: "HypercertById",
        variables: json!({ "hypercert_id": id.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_variables() {
        let req = build_list_query(5, 10, "8453");
        assert_eq!(req.operation_name, "Hypercerts");
        assert!(req.query.contains("count"));
        assert_eq!(
            req.variables,
            json!({ "chain_id": "8453", "first": 5, "offset": 10 })
        );
    }

    #[test]
    fn test_search_input_stays_out_of_query_text() {
        let hostile = r#"x" } }) { __typename } #"#;
        let req = build_search_query(&SearchFilter::Name(hostile.to_string()), 5, 0, "84532");
        assert!(!req.query.contains(hostile));
        assert_eq!(req.variables["name"], json!(hostile));
        assert!(req.variables.get("hypercert_id").is_none());

        let body = serde_json::to_string(&req).unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["variables"]["name"], json!(hostile));
    }

    #[test]
    fn test_search_by_id_uses_id_filter_only() {
        let req = build_search_query(&SearchFilter::Id("0xAbC".to_string()), 5, 5, "8453");
        assert_eq!(req.operation_name, "SearchHypercertsById");
        assert!(req.query.contains("hypercert_id: { contains: $hypercert_id }"));
        assert!(!req.query.contains("$name"));
        assert_eq!(req.variables["hypercert_id"], json!("0xAbC"));
        assert_eq!(req.variables["offset"], json!(5));
    }

    #[test]
    fn test_filter_from_terms() {
        assert_eq!(
            SearchFilter::from_terms("Trees", "").unwrap(),
            SearchFilter::Name("Trees".to_string())
        );
        assert_eq!(
            SearchFilter::from_terms("", "42").unwrap(),
            SearchFilter::Id("42".to_string())
        );
        assert!(matches!(
            SearchFilter::from_terms("Trees", "42"),
            Err(CatalogError::InvalidSearch(_))
        ));
        assert!(matches!(
            SearchFilter::from_terms("", ""),
            Err(CatalogError::InvalidSearch(_))
        ));
    }

    #[test]
    fn test_detail_query_uses_canonical_id() {
        let id: HypercertId = "8453-0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed-7"
            .parse()
            .unwrap();
        let req = build_detail_query(&id);
        assert_eq!(
            req.variables,
            json!({ "hypercert_id": "8453-0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed-7" })
        );
        assert!(req.query.contains("cheapestOrder"));
    }
}
