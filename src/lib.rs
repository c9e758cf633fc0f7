//! # hypercert-market-rs
//!
//! A Rust client for the Hypercerts marketplace mini-app.
//! Browses, searches and inspects hypercerts through the Hypercerts GraphQL API
//! and drives the buy flow through a pluggable wallet-side coordinator.
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | `query` | Static GraphQL documents + variables for list, search and by-id |
//! | `graphql` | `HypercertsApi` HTTP client and the `Catalog` trait |
//! | `models` | Hypercert, order book and page types; response decoding |
//! | `controller` | Listing and detail view state with stale-response guard |
//! | `purchase` | `PurchaseCoordinator` seam and buy-flow state |
//! | `frame` | Host runtime handshake (context, ready, teardown) |
//! | `manifest` | `/.well-known/farcaster.json` document |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hypercert_market_rs::{CatalogConfig, HypercertsApi, ListingController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CatalogConfig::from_env();
//!     let api = HypercertsApi::new(&config)?;
//!     let listing = ListingController::new(api, config.items_per_page);
//!
//!     listing.load_page(1).await;
//!     listing.submit_search("0x822f").await;
//!
//!     for cert in listing.snapshot().await.certificates {
//!         println!("{} {} ({} units)", cert.id, cert.name, cert.units);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # First page of the marketplace
//! cargo run --release -- list
//!
//! # Search by name or id fragment
//! cargo run --release -- search "Clean Water" 2
//!
//! # One hypercert with prices and availability
//! cargo run --release -- detail 8453-0x822f17a9a5eecfd66dbaff7946a8071c265d1d07-1234
//!
//! # Export every hypercert on the chain to JSON
//! cargo run --release -- export hypercerts.json
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod frame;
pub mod graphql;
pub mod manifest;
pub mod models;
pub mod pricing;
pub mod purchase;
pub mod query;
pub mod utils;

pub use config::{CatalogConfig, Environment};
pub use controller::{DetailController, DetailStatus, DetailView, ListingController, ListingStatus};
pub use error::{CatalogError, PurchaseError};
pub use export::{
    export_catalog, load_catalog, load_from_file, save_to_file, CatalogExport,
};
pub use frame::{FrameHost, FrameSession};
pub use graphql::{Catalog, HypercertsApi};
pub use manifest::FrameManifest;
pub use models::{
    CertificateDetail, CertificatePage, CertificateSummary, HypercertId, Order, OrderBook,
    Pagination,
};
pub use purchase::{PurchaseCoordinator, PurchaseReceipt, PurchaseRequest};
pub use query::SearchFilter;
