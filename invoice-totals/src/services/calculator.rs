//! Invoice totals calculator.
//!
//! Every function here is a pure derivation over its arguments. The free
//! functions apply the canonical rules (percentage of the subtotal, uncapped
//! flat discount, 0.01 split tolerance); [`Calculator`] carries the configured
//! rule set and applies it to a whole [`InvoiceDraft`].

use crate::config::CalculatorConfig;
use crate::models::{
    Discount, DiscountKind, InvoiceDraft, InvoiceTotals, LineItem, PaymentMode, PaymentSplit,
    PercentBase, SplitCheck,
};
use crate::services::amount::round_currency;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Largest gap between the split total and the grand total that still counts
/// as reconciled.
pub const DEFAULT_SPLIT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// `quantity × unit price`, rounded half-up to two places.
///
/// Arithmetic saturates at the `Decimal` range instead of panicking.
pub fn compute_line_total(item: &LineItem) -> Decimal {
    round_currency(item.quantity().saturating_mul(item.unit_price()))
}

/// Sum of the rounded line totals.
pub fn compute_subtotal(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(compute_line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Discount amount under the canonical rules.
pub fn compute_discount(subtotal: Decimal, tax: Decimal, discount: &Discount) -> Decimal {
    Calculator::default().discount_amount(subtotal, tax, discount)
}

/// `subtotal + tax - discount_amount`. Not clamped at zero.
pub fn compute_grand_total(subtotal: Decimal, tax: Decimal, discount_amount: Decimal) -> Decimal {
    round_currency(subtotal.saturating_add(tax).saturating_sub(discount_amount))
}

/// Reconcile split amounts against a grand total with the default tolerance.
pub fn validate_split_payment(
    grand_total: Decimal,
    cash: Decimal,
    pos: Decimal,
    other: Decimal,
) -> SplitCheck {
    reconcile(grand_total, cash, pos, other, DEFAULT_SPLIT_TOLERANCE)
}

fn reconcile(
    grand_total: Decimal,
    cash: Decimal,
    pos: Decimal,
    other: Decimal,
    tolerance: Decimal,
) -> SplitCheck {
    let total_split = cash.saturating_add(pos).saturating_add(other);
    let difference = total_split.saturating_sub(grand_total);

    SplitCheck {
        cash,
        pos,
        other,
        total_split,
        grand_total,
        difference,
        valid: difference.abs() <= tolerance,
    }
}

/// Totals calculator bound to one discount rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    percent_base: PercentBase,
    cap_flat_discount: bool,
    split_tolerance: Decimal,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            percent_base: PercentBase::Subtotal,
            cap_flat_discount: false,
            split_tolerance: DEFAULT_SPLIT_TOLERANCE,
        }
    }
}

impl From<&CalculatorConfig> for Calculator {
    fn from(config: &CalculatorConfig) -> Self {
        Self {
            percent_base: config.percent_base,
            cap_flat_discount: config.cap_flat_discount,
            split_tolerance: config.split_tolerance.abs(),
        }
    }
}

impl Calculator {
    pub fn new(percent_base: PercentBase, cap_flat_discount: bool) -> Self {
        Self {
            percent_base,
            cap_flat_discount,
            ..Self::default()
        }
    }

    pub fn with_split_tolerance(mut self, tolerance: Decimal) -> Self {
        self.split_tolerance = tolerance.abs();
        self
    }

    pub fn split_tolerance(&self) -> Decimal {
        self.split_tolerance
    }

    /// Discount amount, rounded to two places so displayed values add up.
    pub fn discount_amount(&self, subtotal: Decimal, tax: Decimal, discount: &Discount) -> Decimal {
        let value = discount.value();

        let amount = match discount.kind {
            DiscountKind::Percent => {
                let base = match self.percent_base {
                    PercentBase::Subtotal => subtotal,
                    PercentBase::SubtotalPlusTax => subtotal.saturating_add(tax),
                };
                base.saturating_mul(value) / Decimal::ONE_HUNDRED
            }
            DiscountKind::Flat if self.cap_flat_discount => value.min(subtotal.saturating_add(tax)),
            DiscountKind::Flat => value,
        };

        round_currency(amount)
    }

    pub fn check_split(&self, grand_total: Decimal, split: &PaymentSplit) -> SplitCheck {
        reconcile(
            grand_total,
            split.cash_amount(),
            split.pos_amount(),
            split.other_amount(),
            self.split_tolerance,
        )
    }

    /// Recompute every derived value for `draft`.
    #[instrument(
        level = "debug",
        skip_all,
        fields(items = draft.items.len(), discount_kind = draft.discount.kind.as_str())
    )]
    pub fn calculate(&self, draft: &InvoiceDraft) -> InvoiceTotals {
        let line_totals: Vec<Decimal> = draft.items.iter().map(compute_line_total).collect();
        let subtotal = line_totals
            .iter()
            .copied()
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let tax = draft.tax();
        let discount_amount = self.discount_amount(subtotal, tax, &draft.discount);
        let grand_total = compute_grand_total(subtotal, tax, discount_amount);

        let split = match draft.payment_mode {
            PaymentMode::Split => {
                let empty = PaymentSplit::default();
                let check = self.check_split(grand_total, draft.split.as_ref().unwrap_or(&empty));
                if !check.valid {
                    debug!(
                        total_split = %check.total_split,
                        grand_total = %grand_total,
                        difference = %check.difference,
                        "Split payment does not reconcile"
                    );
                }
                Some(check)
            }
            _ => None,
        };

        debug!(
            subtotal = %subtotal,
            tax = %tax,
            discount_amount = %discount_amount,
            grand_total = %grand_total,
            "Totals recomputed"
        );

        InvoiceTotals {
            line_totals,
            subtotal,
            tax,
            discount_amount,
            grand_total,
            split,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn flat_discount_cap_uses_subtotal_plus_tax() {
        let capped = Calculator::new(PercentBase::Subtotal, true);
        let amount = capped.discount_amount(dec!(40), dec!(5), &Discount::flat("100"));
        assert_eq!(amount, dec!(45));

        let uncapped = Calculator::default();
        let amount = uncapped.discount_amount(dec!(40), dec!(5), &Discount::flat("100"));
        assert_eq!(amount, dec!(100));
    }

    #[test]
    fn configured_tolerance_is_applied() {
        let loose = Calculator::default().with_split_tolerance(dec!(1));
        let check = loose.check_split(dec!(100), &PaymentSplit::new("60", "39.50", "0"));
        assert!(check.valid);
        assert_eq!(check.difference, dec!(-0.50));
    }

    #[test]
    fn negative_tolerance_is_treated_as_magnitude() {
        let calculator = Calculator::default().with_split_tolerance(dec!(-0.01));
        assert_eq!(calculator.split_tolerance(), dec!(0.01));
    }
}
