use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::config::TOKEN_SYMBOL;
use crate::controller::RequestSequence;
use crate::error::PurchaseError;
use crate::graphql::Catalog;
use crate::models::{CertificateDetail, HypercertId};
use crate::pricing::{availability_ratio, format_unit_price};
use crate::purchase::{PurchaseCoordinator, PurchaseReceipt, PurchaseRequest, PurchaseState};
use crate::utils::shorten_id;

pub const TITLE_PLACEHOLDER: &str = "Hypercert Title";
pub const UNKNOWN_ID: &str = "Unknown";
pub const NOT_FOR_SALE: &str = "Not for sale";
pub const DESCRIPTION_PLACEHOLDER: &str = "This hypercert represents a unique contribution to a public good. Own a fraction to support the creator and their work.";
const WORK_SCOPE_PREVIEW: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum DetailStatus {
    #[default]
    Idle,
    Loading,
    Found(Box<CertificateDetail>),
    NotFound,
    /// The route carried no id; nothing was fetched.
    NoContent,
}

#[derive(Debug, Default)]
struct DetailState {
    route_id: Option<String>,
    status: DetailStatus,
    purchase: PurchaseState,
}

impl DetailState {
    fn found(&self) -> Option<&CertificateDetail> {
        match &self.status {
            DetailStatus::Found(detail) => Some(detail.as_ref()),
            _ => None,
        }
    }
}

/// Display-ready values for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub short_id: String,
    pub image: Option<String>,
    pub description: String,
    pub work_scope: Option<String>,
    pub unit_price_token: String,
    pub unit_price_usd: String,
    pub minimum_order: String,
    pub availability: String,
    pub availability_ratio: f64,
    pub for_sale: bool,
}

impl DetailView {
    pub fn new(route_id: Option<&str>, detail: Option<&CertificateDetail>) -> Self {
        let Some(detail) = detail else {
            return Self {
                title: TITLE_PLACEHOLDER.to_string(),
                short_id: route_id.unwrap_or(UNKNOWN_ID).to_string(),
                image: None,
                description: DESCRIPTION_PLACEHOLDER.to_string(),
                work_scope: None,
                unit_price_token: NOT_FOR_SALE.to_string(),
                unit_price_usd: NOT_FOR_SALE.to_string(),
                minimum_order: NOT_FOR_SALE.to_string(),
                availability: "0/0".to_string(),
                availability_ratio: 0.0,
                for_sale: false,
            };
        };

        let summary = &detail.summary;
        let orders = &detail.orders;
        let units = summary.units;
        let active = orders.active_order();

        let unit_price_token = active
            .and_then(|o| format_unit_price(&o.price_per_percent_in_token, units))
            .map(|p| format!("{} {}", p, TOKEN_SYMBOL))
            .unwrap_or_else(|| NOT_FOR_SALE.to_string());
        let unit_price_usd = active
            .and_then(|o| format_unit_price(&o.price_per_percent_in_usd, units))
            .map(|p| format!("${}", p))
            .unwrap_or_else(|| NOT_FOR_SALE.to_string());
        let minimum_order = orders
            .cheapest_order
            .as_ref()
            .map(|c| {
                c.amounts
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_else(|| NOT_FOR_SALE.to_string());

        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        Self {
            title: non_empty(&summary.name).unwrap_or_else(|| TITLE_PLACEHOLDER.to_string()),
            short_id: shorten_id(&summary.id),
            image: non_empty(&summary.image),
            description: non_empty(&summary.description)
                .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string()),
            work_scope: detail
                .work_scope
                .as_ref()
                .map(|w| w.preview(WORK_SCOPE_PREVIEW))
                .filter(|w| !w.is_empty()),
            unit_price_token,
            unit_price_usd,
            minimum_order,
            availability: format!("{}/{}", orders.total_units_for_sale, units),
            availability_ratio: availability_ratio(orders.total_units_for_sale, units),
            for_sale: orders.is_for_sale(),
        }
    }
}

/// Single-hypercert page: fetch state plus the buy flow.
pub struct DetailController<C> {
    catalog: C,
    state: Mutex<DetailState>,
    sequence: RequestSequence,
}

impl<C: Catalog> DetailController<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            state: Mutex::new(DetailState::default()),
            sequence: RequestSequence::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub async fn status(&self) -> DetailStatus {
        self.state.lock().await.status.clone()
    }

    pub async fn view(&self) -> DetailView {
        let state = self.state.lock().await;
        DetailView::new(state.route_id.as_deref(), state.found())
    }

    pub async fn purchase(&self) -> PurchaseState {
        self.state.lock().await.purchase.clone()
    }

    /// Load the hypercert named by the route's `id` parameter.
    ///
    /// Ids that do not split into three parts or carry an invalid contract
    /// address resolve to `NotFound` without touching the network.
    pub async fn load(&self, id: Option<&str>) {
        let ticket = {
            let mut state = self.state.lock().await;
            let ticket = self.sequence.issue();
            state.route_id = id.map(str::to_string);
            if id.is_none() {
                state.status = DetailStatus::NoContent;
                return;
            }
            state.status = DetailStatus::Loading;
            ticket
        };
        let raw = id.unwrap_or_default();

        let result = match raw.parse::<HypercertId>() {
            Ok(parsed) => self.catalog.fetch_by_id(&parsed).await,
            Err(e) => Err(e),
        };

        let mut state = self.state.lock().await;
        if !self.sequence.is_current(ticket) {
            debug!(?ticket, id = raw, "discarding stale detail response");
            return;
        }
        state.status = match result {
            Ok(detail) => DetailStatus::Found(Box::new(detail)),
            Err(e) => {
                error!("error fetching hypercert details for '{}': {}", raw, e);
                DetailStatus::NotFound
            }
        };
    }

    /// True while the active order's nonce is in flight.
    pub async fn is_processing(&self) -> bool {
        let state = self.state.lock().await;
        state
            .found()
            .and_then(|d| d.orders.active_order())
            .is_some_and(|o| state.purchase.is_processing(&o.order_nonce))
    }

    pub async fn on_buy_order_start(&self, order_nonce: &str) {
        info!(order_nonce, "buy order in progress");
        self.state.lock().await.purchase.on_buy_order_start(order_nonce);
    }

    pub async fn on_buy_order_complete(&self, receipt: &PurchaseReceipt) -> bool {
        self.state.lock().await.purchase.on_buy_order_complete(receipt)
    }

    pub async fn dismiss_success(&self) {
        self.state.lock().await.purchase.dismiss_success();
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.purchase.dismiss_error();
    }

    /// Buy `units` from the active order through `coordinator`.
    pub async fn buy<P>(&self, coordinator: &P, units: u128) -> Result<PurchaseReceipt, PurchaseError>
    where
        P: PurchaseCoordinator + ?Sized,
    {
        let request = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let detail = match &state.status {
                DetailStatus::Found(detail) => detail,
                _ => return Err(PurchaseError::NotAvailable),
            };
            let order = detail
                .orders
                .active_order()
                .ok_or(PurchaseError::NotAvailable)?;
            if let Some(active) = &state.purchase.active_order_nonce {
                return Err(PurchaseError::InProgress(active.clone()));
            }
            validate_units(detail, units)?;

            state.purchase.on_buy_order_start(&order.order_nonce);
            PurchaseRequest {
                hypercert_id: detail.id().to_string(),
                order: order.clone(),
                units,
            }
        };
        info!(order_nonce = %request.order.order_nonce, units = %units, "buy order in progress");

        let result = coordinator.buy(request).await;

        let mut state = self.state.lock().await;
        match &result {
            Ok(receipt) => {
                state.purchase.on_buy_order_complete(receipt);
            }
            Err(e) => {
                error!("buy order failed: {}", e);
                state.purchase.on_buy_order_failed(e);
            }
        }
        result
    }
}

fn validate_units(detail: &CertificateDetail, units: u128) -> Result<(), PurchaseError> {
    let invalid = |reason: String| PurchaseError::InvalidUnits {
        requested: units,
        reason,
    };
    let minimum = detail.orders.minimum_units().unwrap_or(1).max(1);
    if units < minimum {
        return Err(invalid(format!("minimum order is {} units", minimum)));
    }
    let available = detail.orders.total_units_for_sale;
    if units > available {
        return Err(invalid(format!("only {} units for sale", available)));
    }
    Ok(())
}
