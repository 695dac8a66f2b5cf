use rust_decimal::{Decimal, RoundingStrategy};

use super::error::InvoiceError;
use super::types::{LineItem, Totals};

/// Compute subtotal, tax, discount and total for a sequence of line items.
///
/// Tax and discount are both taken on the subtotal, so
/// `total = subtotal × (1 + tax/100 − discount/100)`. Arithmetic is exact
/// decimal; nothing is rounded here.
///
/// Percentages must already lie in `[0, 100]`. Out-of-range input is
/// rejected rather than clamped. Amounts too large for a `Decimal` fail with
/// [`InvoiceError::AmountOverflow`] naming the first quantity that overflowed.
///
/// ```
/// use invoiceswift::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = [
///     LineItem::new("Web Design Package", 1, dec!(2500)),
///     LineItem::new("Hosting Service", 1, dec!(240)),
/// ];
/// let totals = compute_totals(&items, dec!(8), dec!(0)).unwrap();
/// assert_eq!(totals.subtotal, dec!(2740.00));
/// assert_eq!(totals.tax_amount, dec!(219.20));
/// assert_eq!(totals.total, dec!(2959.20));
/// ```
pub fn compute_totals(
    items: &[LineItem],
    tax: Decimal,
    discount: Decimal,
) -> Result<Totals, InvoiceError> {
    check_percent("tax", tax)?;
    check_percent("discount", discount)?;

    let subtotal = subtotal(items)?;
    let tax_amount = percent_of(subtotal, tax).ok_or_else(|| InvoiceError::overflow("tax"))?;
    let discount_amount =
        percent_of(subtotal, discount).ok_or_else(|| InvoiceError::overflow("discount"))?;
    let total = subtotal
        .checked_add(tax_amount)
        .and_then(|t| t.checked_sub(discount_amount))
        .ok_or_else(|| InvoiceError::overflow("total"))?;

    Ok(Totals {
        subtotal,
        tax_amount,
        discount_amount,
        total,
    })
}

/// Σ quantity × unit_price; zero for an empty sequence.
pub fn subtotal(items: &[LineItem]) -> Result<Decimal, InvoiceError> {
    items.iter().enumerate().try_fold(Decimal::ZERO, |acc, (i, item)| {
        let line = item
            .line_total()
            .ok_or_else(|| InvoiceError::overflow(format!("line_items[{i}]")))?;
        acc.checked_add(line)
            .ok_or_else(|| InvoiceError::overflow("subtotal"))
    })
}

/// `amount × percent / 100`. The rate is scaled first so a percentage of at
/// most 100 never grows the amount.
pub(crate) fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount.checked_mul(percent.checked_div(Decimal::ONE_HUNDRED)?)
}

/// Reject a percentage outside `[0, 100]`.
pub fn check_percent(field: &str, value: Decimal) -> Result<(), InvoiceError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(InvoiceError::out_of_range(field, value));
    }
    Ok(())
}

/// Round to two places using half-up (commercial rounding). Display only.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, e.g. `$2959.20` or `-$180.00`.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_money(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_items_total_zero() {
        let totals = compute_totals(&[], dec!(8), dec!(10)).unwrap();
        assert_eq!(totals, Totals::ZERO);
    }

    #[test]
    fn discount_taken_on_subtotal_not_taxed_base() {
        let items = [LineItem::new("Consulting", 1, dec!(1000))];
        let totals = compute_totals(&items, dec!(10), dec!(10)).unwrap();
        assert_eq!(totals.tax_amount, dec!(100));
        assert_eq!(totals.discount_amount, dec!(100));
        assert_eq!(totals.total, dec!(1000));
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        let items = [LineItem::new("Consulting", 1, dec!(1000))];
        assert!(matches!(
            compute_totals(&items, dec!(100.01), dec!(0)),
            Err(InvoiceError::OutOfRange { ref field, .. }) if field == "tax"
        ));
        assert!(matches!(
            compute_totals(&items, dec!(0), dec!(-1)),
            Err(InvoiceError::OutOfRange { ref field, .. }) if field == "discount"
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(check_percent("tax", dec!(0)).is_ok());
        assert!(check_percent("tax", dec!(100)).is_ok());
    }

    #[test]
    fn cents_do_not_drift() {
        // 0.1 + 0.2 style accumulation stays exact.
        let items = [
            LineItem::new("a", 1, dec!(0.10)),
            LineItem::new("b", 1, dec!(0.20)),
        ];
        assert_eq!(subtotal(&items).unwrap(), dec!(0.30));
    }

    #[test]
    fn large_price_at_full_tax_still_computes() {
        let price = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        let items = [LineItem::new("Acquisition", 1, price)];
        let totals = compute_totals(&items, dec!(100), dec!(0)).unwrap();
        assert_eq!(totals.tax_amount, price);
        assert_eq!(totals.total, price * dec!(2));
    }

    #[test]
    fn line_total_overflow_is_an_error() {
        let items = [
            LineItem::new("ok", 1, dec!(1)),
            LineItem::new("huge", u32::MAX, Decimal::MAX / dec!(2)),
        ];
        assert!(matches!(
            compute_totals(&items, dec!(0), dec!(0)),
            Err(InvoiceError::AmountOverflow { ref field }) if field == "line_items[1]"
        ));
    }

    #[test]
    fn subtotal_overflow_is_an_error() {
        let items = [
            LineItem::new("a", 1, Decimal::MAX),
            LineItem::new("b", 1, dec!(1)),
        ];
        assert!(matches!(
            subtotal(&items),
            Err(InvoiceError::AmountOverflow { ref field }) if field == "subtotal"
        ));
    }

    #[test]
    fn total_overflow_is_an_error() {
        let price = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
        let items = [LineItem::new("a", 1, price)];
        assert!(matches!(
            compute_totals(&items, dec!(100), dec!(0)),
            Err(InvoiceError::AmountOverflow { ref field }) if field == "total"
        ));
    }

    #[test]
    fn money_formatting_rounds_half_up() {
        assert_eq!(format_money(dec!(2959.2)), "$2959.20");
        assert_eq!(format_money(dec!(0.005)), "$0.01");
        assert_eq!(format_money(dec!(-180)), "-$180.00");
        assert_eq!(format_money(dec!(0)), "$0.00");
    }
}
