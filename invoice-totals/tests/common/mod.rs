//! Test helper module for invoice-totals integration tests.

#![allow(dead_code)]

use invoice_totals::models::{Discount, InvoiceDraft, LineItem};

/// Line item from quantity and price strings.
pub fn item(quantity: &str, unit_price: &str) -> LineItem {
    LineItem::new(quantity, unit_price)
}

/// Line item bound to a product, as the entry form sends it.
pub fn product_item(product_id: &str, quantity: &str, unit_price: &str) -> LineItem {
    LineItem::new(quantity, unit_price).with_product(product_id)
}

/// The worked example used across tests: two rows, 10.00 tax, 10% off.
pub fn sample_draft() -> InvoiceDraft {
    InvoiceDraft::new(vec![
        product_item("1", "2", "50.00"),
        product_item("2", "1", "25.00"),
    ])
    .with_tax("10.00")
    .with_discount(Discount::percent("10"))
}

/// Parse a draft from inline JSON.
pub fn draft_from_json(json: &str) -> InvoiceDraft {
    serde_json::from_str(json).expect("Failed to parse draft JSON")
}
