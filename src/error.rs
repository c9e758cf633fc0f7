use thiserror::Error;

/// Errors surfaced by the catalog client.
///
/// Controllers never propagate these to the view: each one is logged and
/// folded into an empty or not-found state.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid hypercert id '{id}': {reason}")]
    InvalidIdentifier { id: String, reason: String },
    #[error("hypercert {0} not found")]
    NotFound(String),
    #[error("graphql error: {0}")]
    Graphql(String),
    #[error("invalid search: {0}")]
    InvalidSearch(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn invalid_identifier(id: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidIdentifier {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address must be 40 hex characters, got {0}")]
    InvalidLength(usize),
    #[error("address contains non-hex characters")]
    InvalidHex,
    #[error("address checksum mismatch, expected {0}")]
    BadChecksum(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("hypercert has no active order")]
    NotAvailable,
    #[error("order {0} is already being processed")]
    InProgress(String),
    #[error("cannot buy {requested} units: {reason}")]
    InvalidUnits { requested: u128, reason: String },
    #[error("purchase failed: {0}")]
    Rejected(String),
}
