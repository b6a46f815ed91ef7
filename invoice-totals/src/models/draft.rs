//! Invoice draft (calculator input) and totals (calculator output).

use crate::models::{Discount, LineItem, PaymentMode, PaymentSplit, SplitCheck};
use crate::services::amount::{format_currency, RawAmount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the totals depend on, captured from the form in one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<RawAmount>,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default, alias = "payment_mode")]
    pub payment_mode: PaymentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<PaymentSplit>,
}

impl InvoiceDraft {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_tax(mut self, tax: impl Into<RawAmount>) -> Self {
        self.tax = Some(tax.into());
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    /// Switch to split payment with the given amounts.
    pub fn with_split(mut self, split: PaymentSplit) -> Self {
        self.payment_mode = PaymentMode::Split;
        self.split = Some(split);
        self
    }

    /// Parsed tax, 0 when absent or unparsable.
    pub fn tax(&self) -> Decimal {
        self.tax.as_ref().map_or(Decimal::ZERO, RawAmount::to_decimal)
    }
}

/// Derived values for one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub line_totals: Vec<Decimal>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,
    /// Present only in split payment mode.
    pub split: Option<SplitCheck>,
}

impl InvoiceTotals {
    pub fn has_items(&self) -> bool {
        !self.line_totals.is_empty()
    }

    pub fn is_positive(&self) -> bool {
        self.grand_total > Decimal::ZERO
    }

    /// `true` unless a split payment is present and does not reconcile.
    pub fn split_valid(&self) -> bool {
        self.split.map_or(true, |check| check.valid)
    }

    /// Display form of the totals.
    pub fn report(&self) -> TotalsReport {
        TotalsReport {
            line_totals: self.line_totals.iter().copied().map(format_currency).collect(),
            subtotal: format_currency(self.subtotal),
            tax: format_currency(self.tax),
            discount_amount: format_currency(self.discount_amount),
            grand_total: format_currency(self.grand_total),
            split_total: self.split.map(|check| format_currency(check.total_split)),
            split_valid: self.split.map(|check| check.valid),
            split_difference: self.split.map(|check| check.difference),
            split_message: self.split.and_then(|check| check.message()),
        }
    }
}

/// Totals formatted for display: amounts as fixed two-place strings, the split
/// difference as a plain number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsReport {
    pub line_totals: Vec<String>,
    pub subtotal: String,
    pub tax: String,
    pub discount_amount: String,
    pub grand_total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_valid: Option<bool>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub split_difference: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_message: Option<String>,
}
