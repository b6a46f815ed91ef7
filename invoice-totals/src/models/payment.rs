//! Payment mode and split-payment models for invoice-totals.

use crate::services::amount::{format_currency, RawAmount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the invoice is settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PaymentMode {
    #[default]
    Cash,
    Credit,
    Pos,
    Split,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Credit => "credit",
            PaymentMode::Pos => "pos",
            PaymentMode::Split => "split",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => PaymentMode::Credit,
            "pos" => PaymentMode::Pos,
            "split" => PaymentMode::Split,
            _ => PaymentMode::Cash,
        }
    }
}

impl From<String> for PaymentMode {
    fn from(value: String) -> Self {
        PaymentMode::from_string(&value)
    }
}

/// Amounts entered for a split payment. Missing fields count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSplit {
    #[serde(default, alias = "cash_amount", skip_serializing_if = "Option::is_none")]
    pub cash: Option<RawAmount>,
    #[serde(default, alias = "pos_amount", skip_serializing_if = "Option::is_none")]
    pub pos: Option<RawAmount>,
    #[serde(default, alias = "other_amount", skip_serializing_if = "Option::is_none")]
    pub other: Option<RawAmount>,
}

impl PaymentSplit {
    pub fn new(
        cash: impl Into<RawAmount>,
        pos: impl Into<RawAmount>,
        other: impl Into<RawAmount>,
    ) -> Self {
        Self {
            cash: Some(cash.into()),
            pos: Some(pos.into()),
            other: Some(other.into()),
        }
    }

    pub fn cash_amount(&self) -> Decimal {
        amount_or_zero(&self.cash)
    }

    pub fn pos_amount(&self) -> Decimal {
        amount_or_zero(&self.pos)
    }

    pub fn other_amount(&self) -> Decimal {
        amount_or_zero(&self.other)
    }
}

fn amount_or_zero(raw: &Option<RawAmount>) -> Decimal {
    raw.as_ref().map_or(Decimal::ZERO, RawAmount::to_decimal)
}

/// Result of reconciling a split payment against the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitCheck {
    pub cash: Decimal,
    pub pos: Decimal,
    pub other: Decimal,
    pub total_split: Decimal,
    pub grand_total: Decimal,
    /// `total_split - grand_total`; negative when the split falls short.
    pub difference: Decimal,
    pub valid: bool,
}

impl SplitCheck {
    /// Warning text for an invalid split, `None` when the split reconciles.
    pub fn message(&self) -> Option<String> {
        if self.valid {
            return None;
        }
        Some(format!(
            "Split total ({}) must equal grand total ({})",
            format_currency(self.total_split),
            format_currency(self.grand_total)
        ))
    }
}
