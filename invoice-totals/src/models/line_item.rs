//! Line item model for invoice-totals.

use crate::services::amount::RawAmount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One invoice row as entered: quantity × unit price, plus the product it
/// refers to when one has been picked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, alias = "product", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<RawAmount>,
    #[serde(default, alias = "unit_price", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<RawAmount>,
}

impl LineItem {
    pub fn new(quantity: impl Into<RawAmount>, unit_price: impl Into<RawAmount>) -> Self {
        Self {
            product_id: None,
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }

    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Quantity for calculation: 1 when the field is absent, 0 when unparsable.
    pub fn quantity(&self) -> Decimal {
        self.quantity
            .as_ref()
            .map_or(Decimal::ONE, RawAmount::to_decimal)
    }

    /// Unit price for calculation: 0 when absent or unparsable.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
            .as_ref()
            .map_or(Decimal::ZERO, RawAmount::to_decimal)
    }
}
