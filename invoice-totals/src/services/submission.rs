//! Submission gate: turns a draft into the payload posted to the invoice
//! backend, or reports why it cannot be submitted yet.

use crate::models::{InvoiceDraft, InvoiceTotals, LineItem, PaymentMode, SplitCheck};
use crate::services::amount::{format_currency, RawAmount};
use crate::services::calculator::Calculator;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Reasons a draft is not ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Split payment amounts must equal the grand total")]
    SplitMismatch {
        total_split: Decimal,
        grand_total: Decimal,
    },

    #[error("Please add at least one product to the invoice")]
    NoItems,

    #[error("Invoice total must be greater than zero")]
    NonPositiveTotal(Decimal),
}

impl SubmissionError {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionError::SplitMismatch { .. } => "split_mismatch",
            SubmissionError::NoItems => "no_items",
            SubmissionError::NonPositiveTotal(_) => "non_positive_total",
        }
    }
}

/// One row of the posted `items` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionItem {
    pub product: String,
    pub quantity: String,
    pub unit_price: String,
    pub selling_price: String,
}

/// Split amounts recorded with the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitDetails {
    #[serde(with = "rust_decimal::serde::float")]
    pub cash: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pos: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub other: Decimal,
}

impl From<&SplitCheck> for SplitDetails {
    fn from(check: &SplitCheck) -> Self {
        Self {
            cash: check.cash,
            pos: check.pos,
            other: check.other,
        }
    }
}

/// Fields posted with a new invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSubmission {
    pub items: Vec<SubmissionItem>,
    pub subtotal: String,
    pub tax: String,
    pub discount_type: String,
    pub discount_value: String,
    pub discount_amount: String,
    pub grand_total: String,
    pub payment_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_details: Option<SplitDetails>,
}

/// Rows that will be posted.
///
/// A row is kept when it has a product id with a numeric prefix and numeric
/// quantity and price. A blank quantity is sent as `"1"` and a blank price as
/// `"0"`.
pub fn collect_items(items: &[LineItem]) -> Vec<SubmissionItem> {
    items.iter().filter_map(submission_item).collect()
}

fn submission_item(item: &LineItem) -> Option<SubmissionItem> {
    let product = product_number(item.product_id.as_deref()?)?;
    let quantity = field_text(item.quantity.as_ref(), "1");
    let unit_price = field_text(item.unit_price.as_ref(), "0");

    let quantity_ok = RawAmount::from(quantity.as_str()).try_decimal().is_some();
    let price_ok = RawAmount::from(unit_price.as_str()).try_decimal().is_some();
    if !(quantity_ok && price_ok) {
        warn!(
            product = %product,
            quantity = %quantity,
            unit_price = %unit_price,
            "Skipping row with non-numeric values"
        );
        return None;
    }

    Some(SubmissionItem {
        product,
        selling_price: unit_price.clone(),
        quantity,
        unit_price,
    })
}

/// Leading digits of a product id, without leading zeros.
fn product_number(raw: &str) -> Option<String> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
}

fn field_text(raw: Option<&RawAmount>, fallback: &str) -> String {
    match raw {
        Some(value) if !value.is_blank() => value.as_text(),
        _ => fallback.to_string(),
    }
}

/// Every reason `draft` cannot be submitted, in the order they are checked.
/// Empty when the draft is ready.
pub fn submission_issues(draft: &InvoiceDraft, totals: &InvoiceTotals) -> Vec<SubmissionError> {
    let mut issues = Vec::new();

    if let Some(check) = totals.split.filter(|check| !check.valid) {
        issues.push(SubmissionError::SplitMismatch {
            total_split: check.total_split,
            grand_total: check.grand_total,
        });
    }

    if collect_items(&draft.items).is_empty() {
        issues.push(SubmissionError::NoItems);
    }

    if !totals.is_positive() {
        issues.push(SubmissionError::NonPositiveTotal(totals.grand_total));
    }

    issues
}

/// Build the submission payload, or return the first blocking issue.
#[instrument(
    skip_all,
    fields(items = draft.items.len(), payment_mode = draft.payment_mode.as_str())
)]
pub fn prepare_submission(
    calculator: &Calculator,
    draft: &InvoiceDraft,
) -> Result<InvoiceSubmission, SubmissionError> {
    let totals = calculator.calculate(draft);

    if let Some(issue) = submission_issues(draft, &totals).into_iter().next() {
        warn!(reason = issue.as_str(), error = %issue, "Invoice submission rejected");
        return Err(issue);
    }

    let items = collect_items(&draft.items);
    let split_details = match draft.payment_mode {
        PaymentMode::Split => totals.split.as_ref().map(SplitDetails::from),
        _ => None,
    };

    info!(
        items = items.len(),
        grand_total = %totals.grand_total,
        "Invoice submission prepared"
    );

    Ok(InvoiceSubmission {
        items,
        subtotal: format_currency(totals.subtotal),
        tax: format_currency(totals.tax),
        discount_type: draft.discount.kind.as_form_value().to_string(),
        discount_value: field_text(draft.discount.value.as_ref(), "0"),
        discount_amount: format_currency(totals.discount_amount),
        grand_total: format_currency(totals.grand_total),
        payment_mode: draft.payment_mode.as_str().to_string(),
        split_details,
    })
}
