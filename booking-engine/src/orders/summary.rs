//! Order summary text
//!
//! Renders a booking into the plain-text summary handed to an external
//! messaging channel. The engine only produces the string; delivery is
//! someone else's job.

use shared::models::{Booking, ClothCatalog};

/// Character width of the rendered summary
const WIDTH: usize = 42;

/// Render a booking as a plain-text order summary
///
/// Cloth ids are resolved to display names through the catalog;
/// unknown ids fall back to the raw id.
pub fn render_summary(booking: &Booking, cloths: &ClothCatalog) -> String {
    let mut out = String::new();

    // Header
    center(&mut out, &format!("ORDER #{}", booking.order_id));
    rule(&mut out);
    row(&mut out, "Customer", &booking.customer_name);
    row(&mut out, "Phone", &booking.phone);
    row(&mut out, "Service", &booking.service_type);
    if booking.urgent_delivery {
        center(&mut out, "*** URGENT DELIVERY ***");
    }
    if let Some(pickup) = &booking.pickup_date {
        row(&mut out, "Pickup", pickup);
    }
    if let Some(delivery) = &booking.delivery_date {
        row(&mut out, "Delivery", delivery);
    }
    rule(&mut out);

    // Items: name, quantity x price, amount
    for (cloth_id, item) in &booking.items {
        let name = cloths
            .get(cloth_id)
            .map(|c| c.name.as_str())
            .unwrap_or(cloth_id.as_str());
        let qty = trim_quantity(item.quantity);
        let left = format!("{name} ({qty} x {:.2})", item.price);
        let amount = crate::pricing::line_total(item);
        row(&mut out, &left, &format!("{amount:.2}"));
    }
    rule(&mut out);

    // Totals
    row(
        &mut out,
        "Items",
        &trim_quantity(booking.total_items),
    );
    row(&mut out, "Subtotal", &format!("{:.2}", booking.total_cost));
    if booking.gst_enabled {
        row(
            &mut out,
            &format!("SGST @ {}%", trim_quantity(booking.sgst_percentage)),
            &format!("{:.2}", booking.sgst),
        );
        row(
            &mut out,
            &format!("CGST @ {}%", trim_quantity(booking.cgst_percentage)),
            &format!("{:.2}", booking.cgst),
        );
    }
    row(&mut out, "TOTAL", &format!("{:.2}", booking.grand_total));

    if let Some(instructions) = &booking.instructions
        && !instructions.trim().is_empty()
    {
        rule(&mut out);
        row(&mut out, "Note", instructions);
    }

    out
}

/// Left/right aligned row padded to WIDTH
fn row(out: &mut String, left: &str, right: &str) {
    let used = left.chars().count() + right.chars().count();
    let pad = WIDTH.saturating_sub(used).max(1);
    out.push_str(left);
    out.extend(std::iter::repeat_n(' ', pad));
    out.push_str(right);
    out.push('\n');
}

/// Centered line
fn center(out: &mut String, text: &str) {
    let pad = WIDTH.saturating_sub(text.chars().count()) / 2;
    out.extend(std::iter::repeat_n(' ', pad));
    out.push_str(text);
    out.push('\n');
}

/// Horizontal rule
fn rule(out: &mut String) {
    out.extend(std::iter::repeat_n('-', WIDTH));
    out.push('\n');
}

/// Format a quantity without trailing zeros (3.0 -> "3", 2.5 -> "2.5")
fn trim_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BookingItem, ClothItem, OrderStatus};
    use std::collections::BTreeMap;

    fn cloths() -> ClothCatalog {
        ClothCatalog {
            cloths: vec![
                ClothItem {
                    id: "shirt".into(),
                    name: "Shirt".into(),
                    icon_ref: None,
                    enabled: true,
                },
                ClothItem {
                    id: "pant".into(),
                    name: "Pant".into(),
                    icon_ref: None,
                    enabled: true,
                },
            ],
        }
    }

    fn booking() -> Booking {
        let mut items = BTreeMap::new();
        items.insert(
            "shirt".to_string(),
            BookingItem {
                quantity: 2.0,
                price: 70.0,
            },
        );
        items.insert(
            "pant".to_string(),
            BookingItem {
                quantity: 1.0,
                price: 70.0,
            },
        );
        Booking {
            order_id: "0001".into(),
            customer_name: "Asha".into(),
            phone: "9876543210".into(),
            service_type: "ironing".into(),
            urgent_delivery: true,
            pickup_date: Some("2026-09-01".into()),
            delivery_date: Some("2026-09-03".into()),
            instructions: Some("Light starch".into()),
            items,
            total_items: 3.0,
            total_cost: 210.0,
            sgst: 18.9,
            cgst: 18.9,
            grand_total: 247.8,
            gst_enabled: true,
            sgst_percentage: 9.0,
            cgst_percentage: 9.0,
            status: OrderStatus::Pending,
            created_at: 0,
            last_modified: 0,
            version: 1,
        }
    }

    #[test]
    fn test_summary_contains_core_fields() {
        let text = render_summary(&booking(), &cloths());
        assert!(text.contains("ORDER #0001"));
        assert!(text.contains("Asha"));
        assert!(text.contains("9876543210"));
        assert!(text.contains("URGENT DELIVERY"));
        assert!(text.contains("Shirt (2 x 70.00)"));
        assert!(text.contains("140.00"));
        assert!(text.contains("SGST @ 9%"));
        assert!(text.contains("247.80"));
        assert!(text.contains("Light starch"));
    }

    #[test]
    fn test_summary_omits_gst_lines_when_disabled() {
        let mut b = booking();
        b.gst_enabled = false;
        b.sgst = 0.0;
        b.cgst = 0.0;
        b.grand_total = 210.0;
        let text = render_summary(&b, &cloths());
        assert!(!text.contains("SGST"));
        assert!(!text.contains("CGST"));
        assert!(text.contains("210.00"));
    }

    #[test]
    fn test_unknown_cloth_falls_back_to_id() {
        let mut b = booking();
        b.items.insert(
            "dupatta".into(),
            BookingItem {
                quantity: 1.0,
                price: 5.0,
            },
        );
        let text = render_summary(&b, &cloths());
        assert!(text.contains("dupatta"));
    }
}
