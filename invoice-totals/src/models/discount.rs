//! Discount model for invoice-totals.

use crate::services::amount::RawAmount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DiscountKind {
    #[default]
    Percent,
    Flat,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Percent => "percent",
            DiscountKind::Flat => "flat",
        }
    }

    /// Value posted with a submission; the invoice backend calls a flat
    /// discount "amount".
    pub fn as_form_value(&self) -> &'static str {
        match self {
            DiscountKind::Percent => "percent",
            DiscountKind::Flat => "amount",
        }
    }

    /// Anything that does not name a percentage is a flat amount.
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "percentage" => DiscountKind::Percent,
            _ => DiscountKind::Flat,
        }
    }
}

impl From<String> for DiscountKind {
    fn from(value: String) -> Self {
        DiscountKind::from_string(&value)
    }
}

/// What a percentage discount is taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentBase {
    #[default]
    Subtotal,
    SubtotalPlusTax,
}

impl PercentBase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PercentBase::Subtotal => "subtotal",
            PercentBase::SubtotalPlusTax => "subtotal_plus_tax",
        }
    }
}

/// Discount as entered: a kind and a raw value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(default, alias = "type")]
    pub kind: DiscountKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawAmount>,
}

impl Discount {
    pub fn percent(value: impl Into<RawAmount>) -> Self {
        Self {
            kind: DiscountKind::Percent,
            value: Some(value.into()),
        }
    }

    pub fn flat(value: impl Into<RawAmount>) -> Self {
        Self {
            kind: DiscountKind::Flat,
            value: Some(value.into()),
        }
    }

    /// Parsed value, 0 when absent or unparsable.
    pub fn value(&self) -> Decimal {
        self.value
            .as_ref()
            .map_or(Decimal::ZERO, RawAmount::to_decimal)
    }
}
