//! Booking model and edit payloads

use super::status::OrderStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// One booked line: quantity at a snapshot unit price
///
/// Quantity may be fractional (weight-based services). The price is a
/// copy taken from the matrix at creation/edit time, never a live
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookingItem {
    pub quantity: f64,
    pub price: f64,
}

/// Aggregate totals computed by the pricing calculator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub total_items: f64,
    pub total_cost: f64,
    pub sgst: f64,
    pub cgst: f64,
    pub grand_total: f64,
}

/// A customer order covering one or more cloth items under one service
///
/// `order_id` is the sequential zero-padded identifier, immutable once
/// assigned, and doubles as the storage record key. `version` is the
/// compare-and-swap token: every successful write increments it, and
/// writers carrying a stale version fail with a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    /// Service type id; every item price is sourced from this service's row
    pub service_type: String,
    #[serde(default)]
    pub urgent_delivery: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Cloth id -> line; only lines with quantity > 0 are persisted
    #[serde(default)]
    pub items: BTreeMap<String, BookingItem>,
    pub total_items: f64,
    pub total_cost: f64,
    pub sgst: f64,
    pub cgst: f64,
    pub grand_total: f64,
    /// GST snapshot applied to this booking
    pub gst_enabled: bool,
    pub sgst_percentage: f64,
    pub cgst_percentage: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: i64,
    pub last_modified: i64,
    pub version: u64,
}

impl Booking {
    /// Copy computed totals onto the persisted fields
    pub fn apply_totals(&mut self, totals: Totals) {
        self.total_items = totals.total_items;
        self.total_cost = totals.total_cost;
        self.sgst = totals.sgst;
        self.cgst = totals.cgst;
        self.grand_total = totals.grand_total;
    }

    /// Current totals as a value (for comparison against a recompute)
    pub fn totals(&self) -> Totals {
        Totals {
            total_items: self.total_items,
            total_cost: self.total_cost,
            sgst: self.sgst,
            cgst: self.cgst,
            grand_total: self.grand_total,
        }
    }
}

/// Creation payload for the booking flow
///
/// Items map cloth id -> quantity; unit prices are sourced from the
/// current service's price matrix at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookingDraft {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "service type is required"))]
    pub service_type: String,
    #[serde(default)]
    pub urgent_delivery: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Cloth id -> quantity
    #[serde(default)]
    pub items: BTreeMap<String, f64>,
}

/// Partial edit applied to a booking under an edit session
///
/// Named optional fields; the editor applies the whole patch and
/// recomputes totals in one step, so items and totals are never
/// observable in an inconsistent state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Changing the service re-prices every selected line from the new
    /// service's matrix (missing entries default to 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent_delivery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_draft_requires_core_fields() {
        let draft = BookingDraft::default();
        let errs = draft.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("customer_name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("service_type"));
    }

    #[test]
    fn test_draft_valid() {
        let draft = BookingDraft {
            customer_name: "Asha".into(),
            phone: "9876543210".into(),
            service_type: "ironing".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_status_defaults_to_pending_when_absent() {
        let json = r#"{
            "order_id": "0001",
            "customer_name": "Asha",
            "phone": "9876543210",
            "service_type": "ironing",
            "total_items": 0.0,
            "total_cost": 0.0,
            "sgst": 0.0,
            "cgst": 0.0,
            "grand_total": 0.0,
            "gst_enabled": false,
            "sgst_percentage": 0.0,
            "cgst_percentage": 0.0,
            "created_at": 0,
            "last_modified": 0,
            "version": 1
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, OrderStatus::Pending);
        assert!(booking.items.is_empty());
    }
}
