use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::flex::{u128_as_string, u128_lenient};
use crate::models::OrderBook;
use crate::utils::to_checksum_address;

/// Fully-qualified hypercert identifier: `<chainId>-<contractAddress>-<tokenId>`.
///
/// Parsing checksums the contract address, so `to_string()` always yields the
/// canonical form the API indexes by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HypercertId {
    pub chain_id: String,
    pub contract_address: String,
    pub token_id: String,
}

impl FromStr for HypercertId {
    type Err = CatalogError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        // Segments past the third are ignored.
        let mut parts = id.split('-');
        let (chain_id, contract_address, token_id) =
            match (parts.next(), parts.next(), parts.next()) {
                (Some(c), Some(a), Some(t)) if !c.is_empty() && !a.is_empty() && !t.is_empty() => {
                    (c, a, t)
                }
                _ => {
                    return Err(CatalogError::invalid_identifier(
                        id,
                        "expected <chainId>-<contractAddress>-<tokenId>",
                    ))
                }
            };

        let contract_address = to_checksum_address(contract_address)
            .map_err(|e| CatalogError::invalid_identifier(id, e.to_string()))?;

        Ok(HypercertId {
            chain_id: chain_id.to_string(),
            contract_address,
            token_id: token_id.to_string(),
        })
    }
}

impl fmt::Display for HypercertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.chain_id, self.contract_address, self.token_id)
    }
}

/// One hypercert as shown in the marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateSummary {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    #[serde(serialize_with = "u128_as_string", deserialize_with = "u128_lenient")]
    pub units: u128,
}

/// Scope of work as stored in hypercert metadata: either one comma-separated
/// string or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkScope {
    Text(String),
    List(Vec<String>),
}

impl WorkScope {
    pub fn entries(&self) -> Vec<String> {
        match self {
            WorkScope::Text(s) => s
                .split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
            WorkScope::List(items) => items.clone(),
        }
    }

    /// First `limit` entries joined with `", "`.
    pub fn preview(&self, limit: usize) -> String {
        self.entries()
            .into_iter()
            .take(limit)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateDetail {
    pub summary: CertificateSummary,
    pub work_scope: Option<WorkScope>,
    pub orders: OrderBook,
}

impl CertificateDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn units(&self) -> u128 {
        self.summary.units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x822F17A9A5EeCFd66dBAFf7946a8071C265D1d07";

    #[test]
    fn test_parse_checksums_address() {
        let raw = format!("8453-{}-42", ADDRESS.to_lowercase());
        let id: HypercertId = raw.parse().unwrap();
        assert_eq!(id.chain_id, "8453");
        assert_eq!(id.token_id, "42");
        assert_eq!(id.to_string(), format!("8453-{}-42", id.contract_address));
        assert_ne!(id.contract_address, ADDRESS.to_lowercase());
        assert_eq!(id.contract_address.to_lowercase(), ADDRESS.to_lowercase());
    }

    #[test]
    fn test_parse_rejects_too_few_parts() {
        for raw in ["onlyonepart", "8453-0xabc", "8453--42", "-0x00-1", ""] {
            let err = raw.parse::<HypercertId>().unwrap_err();
            assert!(
                matches!(err, CatalogError::InvalidIdentifier { .. }),
                "{} should be invalid",
                raw
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        let err = "8453-0xnothex-42".parse::<HypercertId>().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_parse_ignores_extra_segments() {
        let raw = format!("8453-{}-42-extra", ADDRESS.to_lowercase());
        let id: HypercertId = raw.parse().unwrap();
        assert_eq!(id.token_id, "42");
    }

    #[test]
    fn test_work_scope_preview() {
        let text = WorkScope::Text("Education, Climate,Health ,Water".to_string());
        assert_eq!(text.preview(3), "Education, Climate, Health");

        let list: WorkScope = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list, WorkScope::List(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(list.preview(3), "a, b");
    }
}
