//! Price conversions for hypercert orders.
//!
//! Orders quote a price for 1% of the hypercert's total supply. With
//! `units` total units, 1% is `units / 100` units, so
//!
//! ```text
//! unit price = price per percent / (units / 100)
//! ```

/// Per-unit price as a float, or `None` when the quote is not a number or
/// the hypercert has no units.
pub fn unit_price(price_per_percent: &str, units: u128) -> Option<f64> {
    let percent_price: f64 = price_per_percent.trim().parse().ok()?;
    if units == 0 || !percent_price.is_finite() {
        return None;
    }
    let units_per_percent = units as f64 / 100.0;
    Some(percent_price / units_per_percent)
}

/// Two-decimal display form of a price.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

pub fn format_unit_price(price_per_percent: &str, units: u128) -> Option<String> {
    unit_price(price_per_percent, units).map(format_price)
}

/// Integer per-unit price in the token's base denomination.
///
/// `units / 100` is truncated first, so `None` for fewer than 100 units or a
/// non-integer quote.
pub fn price_per_unit(price_per_percent: &str, units: u128) -> Option<u128> {
    let percent_price: u128 = price_per_percent.trim().parse().ok()?;
    let units_per_percent = units / 100;
    percent_price.checked_div(units_per_percent)
}

/// Share of total supply currently listed, in `[0, 1]`.
pub fn availability_ratio(units_for_sale: u128, units: u128) -> f64 {
    if units == 0 {
        return 0.0;
    }
    (units_for_sale as f64 / units as f64).min(1.0)
}
