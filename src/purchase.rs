//! Purchase hand-off to the wallet side.
//!
//! Building, signing and submitting the fill transaction belongs to a
//! [`PurchaseCoordinator`]. The detail controller only tracks which order is
//! in flight and what came back: the coordinator's future resolves to a
//! receipt or an error for that one invocation.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::EXPLORER_TX_URL;
use crate::error::PurchaseError;
use crate::models::Order;

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub hypercert_id: String,
    pub order: Order,
    pub units: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub transaction_hash: String,
}

#[async_trait]
pub trait PurchaseCoordinator: Send + Sync {
    async fn buy(&self, request: PurchaseRequest) -> Result<PurchaseReceipt, PurchaseError>;
}

/// Buy-flow UI flags of the detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PurchaseState {
    pub active_order_nonce: Option<String>,
    pub show_success: bool,
    pub transaction_hash: Option<String>,
    pub error_message: Option<String>,
    #[serde(skip)]
    completed: HashSet<String>,
}

impl PurchaseState {
    pub fn on_buy_order_start(&mut self, order_nonce: &str) {
        self.active_order_nonce = Some(order_nonce.to_string());
        self.error_message = None;
    }

    /// Record a finished purchase. Returns `false` for a notification that
    /// arrives with nothing in flight or repeats an already handled hash.
    pub fn on_buy_order_complete(&mut self, receipt: &PurchaseReceipt) -> bool {
        if self.active_order_nonce.is_none() || self.completed.contains(&receipt.transaction_hash) {
            debug!(hash = %receipt.transaction_hash, "ignoring duplicate purchase completion");
            return false;
        }
        self.completed.insert(receipt.transaction_hash.clone());
        self.active_order_nonce = None;
        self.transaction_hash = Some(receipt.transaction_hash.clone());
        self.show_success = true;
        true
    }

    pub fn on_buy_order_failed(&mut self, error: &PurchaseError) {
        self.active_order_nonce = None;
        self.error_message = Some(error.to_string());
    }

    pub fn is_processing(&self, order_nonce: &str) -> bool {
        self.active_order_nonce.as_deref() == Some(order_nonce)
    }

    pub fn dismiss_success(&mut self) {
        self.show_success = false;
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn explorer_url(&self) -> Option<String> {
        self.transaction_hash
            .as_ref()
            .map(|hash| format!("{}{}", EXPLORER_TX_URL, hash))
    }
}
