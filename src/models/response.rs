//! Wire shapes of the `hypercerts` GraphQL connection and their one-time
//! decoding into domain types.
//!
//! Everything optional on the wire is resolved here, so callers only ever
//! see a [`ResponseEnvelope`]:
//!
//! ```text
//! { "data": { "hypercerts": { "count": 12, "data": [ ... ] } } }   -> Payload
//! { "data": { "hypercerts": { "data": [] } } }  (detail query)    -> Empty
//! { "data": { "hypercerts": null } }                               -> Malformed
//! { "errors": [ { "message": "..." } ] }                           -> Rejected
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::models::flex::{string_lenient, u128_lenient};
use crate::models::{CertificateDetail, CertificatePage, CertificateSummary, OrderBook, WorkScope};

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope<T> {
    Payload(T),
    /// Well-formed response with zero rows.
    Empty,
    Malformed(String),
    /// The API answered with GraphQL `errors`.
    Rejected(String),
}

impl<T> ResponseEnvelope<T> {
    /// Collapse into a `Result`, mapping `Empty` through `on_empty`.
    pub fn into_result<F>(self, on_empty: F) -> Result<T, CatalogError>
    where
        F: FnOnce() -> CatalogError,
    {
        match self {
            ResponseEnvelope::Payload(t) => Ok(t),
            ResponseEnvelope::Empty => Err(on_empty()),
            ResponseEnvelope::Malformed(reason) => Err(CatalogError::MalformedResponse(reason)),
            ResponseEnvelope::Rejected(message) => Err(CatalogError::Graphql(message)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlBody {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RawConnection<T> {
    count: Option<u64>,
    data: Option<Vec<T>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default, deserialize_with = "string_lenient")]
    name: String,
    #[serde(default, deserialize_with = "string_lenient")]
    image: String,
    #[serde(default, deserialize_with = "string_lenient")]
    description: String,
    #[serde(default)]
    work_scope: Option<WorkScope>,
}

#[derive(Debug, Deserialize)]
struct RawHypercert {
    hypercert_id: String,
    #[serde(default, deserialize_with = "u128_lenient")]
    units: u128,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default)]
    orders: Option<OrderBook>,
}

impl RawHypercert {
    fn into_summary(self) -> (CertificateSummary, Option<WorkScope>, Option<OrderBook>) {
        let metadata = self.metadata.unwrap_or_default();
        let summary = CertificateSummary {
            id: self.hypercert_id,
            name: metadata.name,
            image: metadata.image,
            description: metadata.description,
            units: self.units,
        };
        (summary, metadata.work_scope, self.orders)
    }
}

/// Strip the GraphQL wrapper down to the `hypercerts` connection.
fn connection(body: Value) -> Result<RawConnection<RawHypercert>, ResponseEnvelope<()>> {
    let body: GraphqlBody = serde_json::from_value(body)
        .map_err(|e| ResponseEnvelope::Malformed(format!("not a GraphQL response: {}", e)))?;

    if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ResponseEnvelope::Rejected(message));
    }

    let hypercerts = body
        .data
        .and_then(|mut d| d.get_mut("hypercerts").map(Value::take))
        .filter(|h| !h.is_null())
        .ok_or_else(|| ResponseEnvelope::Malformed("response lacks hypercerts".to_string()))?;

    serde_json::from_value(hypercerts)
        .map_err(|e| ResponseEnvelope::Malformed(format!("unexpected hypercert shape: {}", e)))
}

fn retag<T>(envelope: ResponseEnvelope<()>) -> ResponseEnvelope<T> {
    match envelope {
        ResponseEnvelope::Payload(()) | ResponseEnvelope::Empty => ResponseEnvelope::Empty,
        ResponseEnvelope::Malformed(reason) => ResponseEnvelope::Malformed(reason),
        ResponseEnvelope::Rejected(message) => ResponseEnvelope::Rejected(message),
    }
}

/// Decode a listing or search response. A page with zero rows is still a
/// `Payload`, since `count` may be non-zero past the last page.
pub fn decode_page(body: Value) -> ResponseEnvelope<CertificatePage> {
    let connection = match connection(body) {
        Ok(c) => c,
        Err(envelope) => return retag(envelope),
    };
    let Some(rows) = connection.data else {
        return ResponseEnvelope::Malformed("response lacks a data array".to_string());
    };

    let count = connection.count.unwrap_or(rows.len() as u64);
    let data = rows.into_iter().map(|r| r.into_summary().0).collect();
    ResponseEnvelope::Payload(CertificatePage { data, count })
}

/// Decode a by-id response; the first row wins.
pub fn decode_detail(body: Value) -> ResponseEnvelope<CertificateDetail> {
    let connection = match connection(body) {
        Ok(c) => c,
        Err(envelope) => return retag(envelope),
    };
    let Some(rows) = connection.data else {
        return ResponseEnvelope::Malformed("response lacks a data array".to_string());
    };

    match rows.into_iter().next() {
        Some(row) => {
            let (summary, work_scope, orders) = row.into_summary();
            ResponseEnvelope::Payload(CertificateDetail {
                summary,
                work_scope,
                orders: orders.unwrap_or_default(),
            })
        }
        None => ResponseEnvelope::Empty,
    }
}
