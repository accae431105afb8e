//! Booking totals calculator
//!
//! Pure computation: line totals, aggregate totals, tax amounts.
//! Arithmetic runs on `Decimal`; the model surface stays `f64`.
//!
//! - `total_items` = Σ quantity over lines with quantity > 0, 1dp
//! - `total_cost`  = Σ (quantity × price), 2dp
//! - GST enabled: `sgst = total_cost × sgst%`, `cgst = total_cost × cgst%`,
//!   `grand_total = total_cost + sgst + cgst`, each 2dp
//! - GST disabled: `sgst = cgst = 0`, `grand_total = total_cost`

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{BookingItem, GstPolicy, Totals};
use std::collections::BTreeMap;

/// Decimal places for monetary amounts
const MONEY_DP: u32 = 2;
/// Decimal places for the item-count sum (fractional kg quantities)
const QUANTITY_DP: u32 = 1;

/// Convert f64 to Decimal for precise arithmetic
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round a monetary Decimal back to f64, 2dp midpoint-away-from-zero
#[inline]
pub fn to_money(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a quantity Decimal back to f64, 1dp
#[inline]
fn to_quantity(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(QUANTITY_DP, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Total for one line: quantity × snapshot price
pub fn line_total(item: &BookingItem) -> f64 {
    to_money(to_decimal(item.quantity) * to_decimal(item.price))
}

/// Compute aggregate totals for a set of booking lines
///
/// Lines with quantity ≤ 0 contribute nothing (and are dropped before
/// persistence by the editor). Tax amounts are computed from the
/// rounded subtotal so the stored fields always satisfy
/// `grand_total = total_cost + sgst + cgst` exactly.
pub fn compute_totals(items: &BTreeMap<String, BookingItem>, gst: &GstPolicy) -> Totals {
    let hundred = Decimal::ONE_HUNDRED;

    let mut quantity_sum = Decimal::ZERO;
    let mut cost_sum = Decimal::ZERO;
    for item in items.values() {
        if item.quantity <= 0.0 {
            continue;
        }
        let qty = to_decimal(item.quantity);
        quantity_sum += qty;
        cost_sum += qty * to_decimal(item.price);
    }

    let total_cost =
        cost_sum.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);

    let (sgst, cgst) = if gst.enabled {
        let sgst = (total_cost * to_decimal(gst.sgst_percentage) / hundred)
            .round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
        let cgst = (total_cost * to_decimal(gst.cgst_percentage) / hundred)
            .round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
        (sgst, cgst)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let grand_total = total_cost + sgst + cgst;

    Totals {
        total_items: to_quantity(quantity_sum),
        total_cost: to_money(total_cost),
        sgst: to_money(sgst),
        cgst: to_money(cgst),
        grand_total: to_money(grand_total),
    }
}

// ==================== Tests ====================
