//! Totals calculation tests for invoice-totals.

mod common;

use common::{draft_from_json, item, sample_draft};
use invoice_totals::models::{Discount, InvoiceDraft, LineItem, PercentBase};
use invoice_totals::services::amount::round_currency;
use invoice_totals::services::{
    compute_discount, compute_grand_total, compute_line_total, compute_subtotal, Calculator,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn line_total_multiplies_quantity_by_price() {
    assert_eq!(compute_line_total(&item("3", "19.99")), dec!(59.97));
    assert_eq!(compute_line_total(&item("0", "19.99")), Decimal::ZERO);
}

#[test]
fn line_total_rounds_half_up() {
    let report = Calculator::default()
        .calculate(&InvoiceDraft::new(vec![item("2", "10.005")]))
        .report();
    assert_eq!(report.line_totals, vec!["20.01".to_string()]);
    assert_eq!(compute_line_total(&item("1", "0.125")), dec!(0.13));
}

#[test]
fn unparsable_fields_read_as_zero() {
    assert_eq!(compute_line_total(&item("abc", "10")), Decimal::ZERO);
    assert_eq!(compute_line_total(&item("2", "")), Decimal::ZERO);
}

#[test]
fn absent_quantity_defaults_to_one() {
    let row = LineItem {
        unit_price: Some("12.50".into()),
        ..LineItem::default()
    };
    assert_eq!(compute_line_total(&row), dec!(12.50));
}

#[test]
fn negative_values_pass_through() {
    assert_eq!(compute_line_total(&item("-2", "5")), dec!(-10));
    assert_eq!(compute_line_total(&item("2", "-5")), dec!(-10));
}

#[test]
fn subtotal_sums_rounded_line_totals() {
    let items = vec![item("1", "0.005"), item("1", "0.005")];
    // Each row rounds to 0.01 before summing.
    assert_eq!(compute_subtotal(&items), dec!(0.02));
}

#[test]
fn zero_percent_discount_is_zero() {
    let discount = Discount::percent("0");
    assert_eq!(compute_discount(dec!(125), dec!(10), &discount), Decimal::ZERO);
}

#[test]
fn full_percent_discount_equals_subtotal() {
    let discount = Discount::percent("100");
    assert_eq!(compute_discount(dec!(125), dec!(10), &discount), dec!(125));
}

#[test]
fn percent_of_subtotal_plus_tax_when_configured() {
    let calculator = Calculator::new(PercentBase::SubtotalPlusTax, false);
    let amount = calculator.discount_amount(dec!(125), dec!(10), &Discount::percent("10"));
    assert_eq!(amount, dec!(13.50));
}

#[test]
fn flat_discount_is_taken_as_is() {
    let amount = compute_discount(dec!(40), dec!(5), &Discount::flat("12.345"));
    assert_eq!(amount, dec!(12.35));
}

#[test]
fn grand_total_is_not_clamped() {
    let grand_total = compute_grand_total(dec!(40), dec!(5), dec!(100));
    assert_eq!(grand_total, dec!(-55));
}

#[test]
fn end_to_end_percent_discount() {
    let totals = Calculator::default().calculate(&sample_draft());
    let report = totals.report();

    assert_eq!(report.line_totals, vec!["100.00", "25.00"]);
    assert_eq!(report.subtotal, "125.00");
    assert_eq!(report.tax, "10.00");
    assert_eq!(report.discount_amount, "12.50");
    assert_eq!(report.grand_total, "122.50");
    assert!(totals.split.is_none());
}

#[test]
fn empty_items_leave_tax_minus_discount() {
    let draft = InvoiceDraft::new(vec![])
        .with_tax("10.00")
        .with_discount(Discount::flat("4"));
    let totals = Calculator::default().calculate(&draft);

    assert!(!totals.has_items());
    assert_eq!(totals.report().subtotal, "0.00");
    assert_eq!(totals.grand_total, dec!(6.00));
}

#[test]
fn recomputation_is_idempotent() {
    let calculator = Calculator::default();
    let draft = sample_draft();
    assert_eq!(calculator.calculate(&draft), calculator.calculate(&draft));
}

#[test]
fn draft_accepts_numbers_and_strings() {
    let draft = draft_from_json(
        r#"{
            "items": [
                {"quantity": 2, "unitPrice": "50.00"},
                {"quantity": "1", "unit_price": 25}
            ],
            "tax": 10,
            "discount": {"kind": "percentage", "value": "10"}
        }"#,
    );

    let report = Calculator::default().calculate(&draft).report();
    assert_eq!(report.grand_total, "122.50");
}

#[test]
fn unknown_discount_kind_is_flat() {
    let draft = draft_from_json(
        r#"{"items": [{"quantity": 1, "unitPrice": 100}], "discount": {"kind": "amount", "value": 15}}"#,
    );
    let totals = Calculator::default().calculate(&draft);
    assert_eq!(totals.discount_amount, dec!(15));
    assert_eq!(totals.grand_total, dec!(85));
}

#[test]
fn missing_fields_use_defaults() {
    let draft = draft_from_json(r#"{"items": [{"unitPrice": "7.50"}]}"#);
    let totals = Calculator::default().calculate(&draft);
    assert_eq!(totals.subtotal, dec!(7.50));
    assert_eq!(totals.tax, Decimal::ZERO);
    assert_eq!(totals.discount_amount, Decimal::ZERO);
    assert_eq!(totals.grand_total, dec!(7.50));
}

#[test]
fn report_serializes_fixed_point_strings() {
    let report = Calculator::default().calculate(&sample_draft()).report();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["subtotal"], "125.00");
    assert_eq!(json["discountAmount"], "12.50");
    assert_eq!(json["grandTotal"], "122.50");
    assert!(json.get("splitValid").is_none());
}

#[test]
fn oversized_quantity_saturates_line_total() {
    assert_eq!(compute_line_total(&item("1e100", "2")), Decimal::MAX);
    assert_eq!(compute_line_total(&item("-1e100", "2")), Decimal::MIN);
}

#[test]
fn saturated_totals_keep_two_decimal_places() {
    let report = Calculator::default()
        .calculate(&InvoiceDraft::new(vec![LineItem::new("1e28", "1e28")]))
        .report();

    assert_eq!(report.subtotal, "79228162514264337593543950335.00");
    assert_eq!(report.grand_total, "79228162514264337593543950335.00");
    assert_eq!(report.line_totals, vec!["79228162514264337593543950335.00".to_string()]);
}

fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|c| Decimal::new(c, 3))
}

fn quantities() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|q| Decimal::new(q, 2))
}

proptest! {
    #[test]
    fn line_total_matches_rounded_product(q in quantities(), p in cents()) {
        let row = item(&q.to_string(), &p.to_string());
        prop_assert_eq!(compute_line_total(&row), round_currency(q * p));
    }

    #[test]
    fn subtotal_ignores_item_order(
        (rows, shuffled) in prop::collection::vec((quantities(), cents()), 0..12)
            .prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle())),
    ) {
        let to_items = |rows: &[(Decimal, Decimal)]| -> Vec<LineItem> {
            rows.iter()
                .map(|(q, p)| item(&q.to_string(), &p.to_string()))
                .collect()
        };

        prop_assert_eq!(
            compute_subtotal(&to_items(&rows)),
            compute_subtotal(&to_items(&shuffled))
        );
    }

    #[test]
    fn zero_percent_never_discounts(subtotal in cents(), tax in cents()) {
        prop_assert_eq!(compute_discount(subtotal, tax, &Discount::percent("0")), Decimal::ZERO);
    }
}
