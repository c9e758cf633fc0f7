use serde::{Deserialize, Serialize};

use crate::models::flex::{
    string_lenient, u128_as_string, u128_lenient, u128_vec_as_string, u128_vec_lenient,
};

/// A resting sell order for hypercert fractions.
///
/// Prices are quoted per 1% of the hypercert's total supply, not per unit.
/// Fields this crate does not interpret land in `extra` and are handed to the
/// purchase coordinator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "string_lenient")]
    pub order_nonce: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub price_per_percent_in_token: String,
    #[serde(
        rename = "pricePerPercentInUSD",
        default,
        deserialize_with = "string_lenient"
    )]
    pub price_per_percent_in_usd: String,
    #[serde(
        default,
        serialize_with = "u128_vec_as_string",
        deserialize_with = "u128_vec_lenient"
    )]
    pub amounts: Vec<u128>,
    #[serde(default, deserialize_with = "string_lenient")]
    pub signature: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub chain_id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub currency: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheapestOrder {
    /// Minimum purchasable unit count per fill.
    #[serde(
        default,
        serialize_with = "u128_vec_as_string",
        deserialize_with = "u128_vec_lenient"
    )]
    pub amounts: Vec<u128>,
}

/// Sale-side state of one hypercert.
///
/// A missing `totalUnitsForSale` decodes as 0, so "absent" and "zero" are the
/// same value everywhere downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    #[serde(
        default,
        serialize_with = "u128_as_string",
        deserialize_with = "u128_lenient"
    )]
    pub total_units_for_sale: u128,
    #[serde(default)]
    pub data: Vec<Order>,
    #[serde(default)]
    pub cheapest_order: Option<CheapestOrder>,
}

impl OrderBook {
    /// The first server-provided order is the one offered to buyers.
    pub fn active_order(&self) -> Option<&Order> {
        self.data.first()
    }

    pub fn is_for_sale(&self) -> bool {
        self.total_units_for_sale > 0
    }

    pub fn minimum_units(&self) -> Option<u128> {
        self.cheapest_order
            .as_ref()
            .and_then(|c| c.amounts.first().copied())
    }
}
