//! Property-based tests for totals and the editor.
//!
//! Run with: `cargo test --test proptest_tests`

use chrono::NaiveDate;
use invoiceswift::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Prices in cents, up to 100k.
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Percentages with up to two decimals in [0, 100].
fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    ("[a-zA-Z ]{0,20}", 0u32..1000, price())
        .prop_map(|(description, quantity, unit_price)| {
            LineItem::new(description, quantity, unit_price)
        })
}

proptest! {
    #[test]
    fn total_is_subtotal_plus_tax_minus_discount(
        items in prop::collection::vec(line_item(), 0..30),
        tax in percent(),
        discount in percent(),
    ) {
        let totals = compute_totals(&items, tax, discount).unwrap();
        let subtotal: Decimal = items
            .iter()
            .map(|i| Decimal::from(i.quantity) * i.unit_price)
            .sum();
        let hundred = Decimal::ONE_HUNDRED;

        prop_assert_eq!(totals.subtotal, subtotal);
        prop_assert_eq!(totals.tax_amount, subtotal * tax / hundred);
        prop_assert_eq!(totals.discount_amount, subtotal * discount / hundred);
        prop_assert_eq!(
            totals.total,
            subtotal + subtotal * tax / hundred - subtotal * discount / hundred
        );
    }

    #[test]
    fn total_matches_integer_cents(
        lines in prop::collection::vec((0u32..1000, 0i64..10_000_000), 0..30),
        tax_bp in 0i64..=10_000,
        discount_bp in 0i64..=10_000,
    ) {
        // Prices in cents and percentages in hundredths, so the exact total in
        // millionths is an integer product.
        let items: Vec<LineItem> = lines
            .iter()
            .map(|&(qty, cents)| LineItem::new("item", qty, Decimal::new(cents, 2)))
            .collect();
        let subtotal_cents: i128 = lines
            .iter()
            .map(|&(qty, cents)| i128::from(qty) * i128::from(cents))
            .sum();
        let factor = i128::from(10_000 + tax_bp - discount_bp);
        let tax = Decimal::new(tax_bp, 2);
        let discount = Decimal::new(discount_bp, 2);

        let totals = compute_totals(&items, tax, discount).unwrap();
        prop_assert_eq!(totals.subtotal, Decimal::from_i128_with_scale(subtotal_cents, 2));
        prop_assert_eq!(
            totals.total,
            Decimal::from_i128_with_scale(subtotal_cents * factor, 6)
        );
        let rate = Decimal::ONE_HUNDRED + tax - discount;
        prop_assert_eq!(totals.total, totals.subtotal * rate / Decimal::ONE_HUNDRED);
    }

    #[test]
    fn arbitrary_amounts_never_panic(
        lines in prop::collection::vec(
            (any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28),
            0..5,
        ),
        tax in percent(),
        discount in percent(),
    ) {
        let items: Vec<LineItem> = lines
            .into_iter()
            .map(|(qty, lo, mid, hi, scale)| {
                LineItem::new("x", qty, Decimal::from_parts(lo, mid, hi, false, scale))
            })
            .collect();
        let result = compute_totals(&items, tax, discount);
        prop_assert!(
            matches!(result, Ok(_) | Err(InvoiceError::AmountOverflow { .. })),
            "unexpected result: {:?}",
            result
        );
    }

    #[test]
    fn empty_items_always_zero(tax in percent(), discount in percent()) {
        prop_assert_eq!(compute_totals(&[], tax, discount).unwrap(), Totals::ZERO);
    }

    #[test]
    fn total_never_negative(
        items in prop::collection::vec(line_item(), 0..10),
        tax in percent(),
        discount in percent(),
    ) {
        let totals = compute_totals(&items, tax, discount).unwrap();
        prop_assert!(totals.total >= Decimal::ZERO);
    }

    #[test]
    fn percent_above_hundred_rejected(excess in 1i64..1_000_000) {
        let tax = Decimal::ONE_HUNDRED + Decimal::new(excess, 2);
        let rejected = matches!(
            compute_totals(&[], tax, Decimal::ZERO),
            Err(InvoiceError::OutOfRange { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn editor_totals_follow_edits(
        items in prop::collection::vec(line_item(), 1..10),
        tax in percent(),
    ) {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let mut editor = InvoiceEditor::new(today, Vec::new(), Vec::new());
        editor.remove_line_item(0).unwrap();
        for item in &items {
            editor.add_line_item(Some(item.clone())).unwrap();
        }
        editor.set_tax(tax).unwrap();

        prop_assert_eq!(editor.line_items(), items.as_slice());
        prop_assert_eq!(
            editor.totals().unwrap(),
            compute_totals(&items, tax, Decimal::ZERO).unwrap()
        );
    }

    #[test]
    fn format_money_has_two_decimals(value in -10_000_000i64..10_000_000, scale in 0u32..6) {
        let formatted = format_money(Decimal::new(value, scale));
        let (_, cents) = formatted.rsplit_once('.').unwrap();
        prop_assert_eq!(cents.len(), 2);
        prop_assert!(formatted.starts_with('$') || formatted.starts_with("-$"));
    }
}
