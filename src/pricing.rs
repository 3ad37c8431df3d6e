//! Pricing
//!
//! Applies parsed discount codes to consolidated cart items. Every code is
//! evaluated against the same subtotal, the exact amounts are summed, and the
//! sum is rounded half-to-even exactly once before being capped at the
//! subtotal. Summing before rounding makes the result independent of code
//! order.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::{
    codes::DiscountCode,
    items::{ConsolidatedItem, cheapest_price},
    receipt::Receipt,
};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A subtotal or discount amount does not fit the supported range.
    #[error("Cart totals exceed the supported range.")]
    Overflow,
}

/// Prices the given items, applying every discount code.
///
/// An empty cart yields an all-zero receipt without evaluating any codes.
/// An empty code list is not an error; it simply produces no discount.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the subtotal or the summed discount
/// cannot be represented.
pub fn compute(
    items: &[ConsolidatedItem],
    codes: &[DiscountCode],
) -> Result<Receipt, PricingError> {
    if items.is_empty() {
        return Ok(Receipt::empty());
    }

    let subtotal = subtotal(items)?;

    let raw = codes.iter().try_fold(Decimal::ZERO, |sum, code| {
        sum.checked_add(raw_discount(code, items, subtotal)?)
            .ok_or(PricingError::Overflow)
    })?;

    let discount = capped_discount(raw, subtotal)?;
    let total = subtotal.saturating_sub(discount);

    Ok(Receipt::new(items.to_vec(), subtotal, discount, total))
}

/// Sum of `price × quantity` over all items.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in a `u64`.
pub fn subtotal(items: &[ConsolidatedItem]) -> Result<u64, PricingError> {
    items.iter().try_fold(0_u64, |sum, item| {
        item.line_total()
            .and_then(|line_total| sum.checked_add(line_total))
            .ok_or(PricingError::Overflow)
    })
}

/// The unrounded amount a single code takes off the cart.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the amount cannot be represented.
pub fn raw_discount(
    code: &DiscountCode,
    items: &[ConsolidatedItem],
    subtotal: u64,
) -> Result<Decimal, PricingError> {
    match code {
        DiscountCode::Flat(amount) => Ok(Decimal::from(*amount)),
        DiscountCode::Percent(percent) => Decimal::from(subtotal)
            .checked_mul(Decimal::from(percent.value()))
            .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PricingError::Overflow),
        DiscountCode::Bogo => bogo_discount(items),
    }
}

/// Every second unit of each item at the lowest unit price is free.
fn bogo_discount(items: &[ConsolidatedItem]) -> Result<Decimal, PricingError> {
    let Some(cheapest) = cheapest_price(items) else {
        return Ok(Decimal::ZERO);
    };

    items
        .iter()
        .filter(|item| item.price() == cheapest)
        .try_fold(0_u64, |sum, item| {
            (item.quantity() / 2)
                .checked_mul(cheapest)
                .and_then(|free| sum.checked_add(free))
        })
        .map(Decimal::from)
        .ok_or(PricingError::Overflow)
}

/// Rounds the summed discount half-to-even and caps it at the subtotal.
fn capped_discount(raw: Decimal, subtotal: u64) -> Result<u64, PricingError> {
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

    if rounded >= Decimal::from(subtotal) {
        return Ok(subtotal);
    }

    rounded.to_u64().ok_or(PricingError::Overflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::codes::parse;

    use super::*;

    fn codes(raw: &[&str]) -> Result<Vec<DiscountCode>, crate::codes::DiscountCodeError> {
        raw.iter().map(|code| parse(code)).collect()
    }

    fn single(name: &str, price: u64, quantity: u64) -> Vec<ConsolidatedItem> {
        vec![ConsolidatedItem::new(name, price, quantity)]
    }

    #[test]
    fn flat_subtracts_fixed_amount() -> TestResult {
        let receipt = compute(&single("cake", 1000, 5), &codes(&["FLAT_1000"])?)?;

        assert_eq!(receipt.subtotal(), 5000);
        assert_eq!(receipt.discount(), 1000);
        assert_eq!(receipt.total(), 4000);

        Ok(())
    }

    #[test]
    fn flat_exceeding_subtotal_is_capped() -> TestResult {
        let receipt = compute(&single("gum", 100, 1), &codes(&["FLAT_5000"])?)?;

        assert_eq!(receipt.discount(), 100);
        assert_eq!(receipt.total(), 0);

        Ok(())
    }

    #[test]
    fn percent_of_subtotal() -> TestResult {
        let receipt = compute(&single("cake", 1000, 10), &codes(&["PERCENT_15"])?)?;

        assert_eq!(receipt.subtotal(), 10_000);
        assert_eq!(receipt.discount(), 1500);
        assert_eq!(receipt.total(), 8500);

        Ok(())
    }

    #[test]
    fn midpoint_rounds_down_to_even() -> TestResult {
        // 150 * 15% = 22.5
        let receipt = compute(&single("item", 150, 1), &codes(&["PERCENT_15"])?)?;

        assert_eq!(receipt.discount(), 22);

        Ok(())
    }

    #[test]
    fn midpoint_rounds_up_to_even() -> TestResult {
        // 250 * 15% = 37.5
        let receipt = compute(&single("item", 250, 1), &codes(&["PERCENT_15"])?)?;

        assert_eq!(receipt.discount(), 38);

        Ok(())
    }

    #[test]
    fn fractions_are_summed_before_rounding() -> TestResult {
        // 150 * 15% = 22.5 twice sums to exactly 45; rounding each first would give 44.
        let receipt = compute(
            &single("item", 150, 1),
            &codes(&["PERCENT_15", "PERCENT_15"])?,
        )?;

        assert_eq!(receipt.discount(), 45);

        Ok(())
    }

    #[test]
    fn percent_bounds() -> TestResult {
        let none = compute(&single("cake", 1000, 5), &codes(&["PERCENT_0"])?)?;
        let all = compute(&single("cake", 1000, 5), &codes(&["PERCENT_100"])?)?;

        assert_eq!((none.discount(), none.total()), (0, 5000));
        assert_eq!((all.discount(), all.total()), (5000, 0));

        Ok(())
    }

    #[test]
    fn bogo_even_and_odd_quantities() -> TestResult {
        let even = compute(&single("cake", 500, 4), &codes(&["BOGO"])?)?;
        let odd = compute(&single("cake", 500, 5), &codes(&["BOGO"])?)?;
        let one = compute(&single("cake", 500, 1), &codes(&["BOGO"])?)?;

        assert_eq!((even.subtotal(), even.discount(), even.total()), (2000, 1000, 1000));
        assert_eq!((odd.subtotal(), odd.discount(), odd.total()), (2500, 1000, 1500));
        assert_eq!((one.subtotal(), one.discount(), one.total()), (500, 0, 500));

        Ok(())
    }

    #[test]
    fn bogo_only_discounts_cheapest_items() -> TestResult {
        let items = [
            ConsolidatedItem::new("cake", 1000, 2),
            ConsolidatedItem::new("cookie", 200, 4),
        ];

        let receipt = compute(&items, &codes(&["BOGO"])?)?;

        assert_eq!(receipt.subtotal(), 2800);
        assert_eq!(receipt.discount(), 400);
        assert_eq!(receipt.total(), 2400);

        Ok(())
    }

    #[test]
    fn bogo_discounts_every_item_tied_at_cheapest_price() -> TestResult {
        let items = [
            ConsolidatedItem::new("cookie", 200, 4),
            ConsolidatedItem::new("muffin", 200, 3),
        ];

        let receipt = compute(&items, &codes(&["BOGO"])?)?;

        assert_eq!(receipt.subtotal(), 1400);
        assert_eq!(receipt.discount(), 600);
        assert_eq!(receipt.total(), 800);

        Ok(())
    }

    #[test]
    fn bogo_with_free_cheapest_item_gives_nothing() -> TestResult {
        let items = [
            ConsolidatedItem::new("freebie", 0, 3),
            ConsolidatedItem::new("cake", 1000, 2),
        ];

        let receipt = compute(&items, &codes(&["BOGO"])?)?;

        assert_eq!(receipt.subtotal(), 2000);
        assert_eq!(receipt.discount(), 0);
        assert_eq!(receipt.total(), 2000);

        Ok(())
    }

    #[test]
    fn multiple_codes_are_independent_and_summed() -> TestResult {
        let receipt = compute(
            &single("cake", 1000, 10),
            &codes(&["FLAT_1000", "PERCENT_10"])?,
        )?;

        assert_eq!(receipt.discount(), 2000);
        assert_eq!(receipt.total(), 8000);

        Ok(())
    }

    #[test]
    fn summed_codes_are_capped_at_subtotal() -> TestResult {
        let receipt = compute(&single("cake", 500, 1), &codes(&["FLAT_300", "FLAT_300"])?)?;

        assert_eq!(receipt.discount(), 500);
        assert_eq!(receipt.total(), 0);

        Ok(())
    }

    #[test]
    fn code_order_does_not_change_result() -> TestResult {
        let items = [
            ConsolidatedItem::new("item", 150, 3),
            ConsolidatedItem::new("extra", 75, 1),
        ];

        let forward = compute(&items, &codes(&["PERCENT_15", "BOGO", "FLAT_7"])?)?;
        let backward = compute(&items, &codes(&["FLAT_7", "BOGO", "PERCENT_15"])?)?;
        let shuffled = compute(&items, &codes(&["BOGO", "FLAT_7", "PERCENT_15"])?)?;

        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);

        Ok(())
    }

    #[test]
    fn empty_cart_skips_codes() -> TestResult {
        let receipt = compute(&[], &codes(&["FLAT_1000", "BOGO"])?)?;

        assert_eq!(receipt, Receipt::empty());

        Ok(())
    }

    #[test]
    fn empty_code_list_gives_no_discount() -> TestResult {
        let receipt = compute(&single("cake", 1000, 2), &[])?;

        assert_eq!(receipt.subtotal(), 2000);
        assert_eq!(receipt.discount(), 0);
        assert_eq!(receipt.total(), 2000);

        Ok(())
    }

    #[test]
    fn items_are_returned_unchanged() -> TestResult {
        let items = vec![
            ConsolidatedItem::new("cookie", 200, 4),
            ConsolidatedItem::new("cake", 1000, 1),
        ];

        let receipt = compute(&items, &codes(&["FLAT_1"])?)?;

        assert_eq!(receipt.items(), items.as_slice());

        Ok(())
    }

    #[test]
    fn subtotal_overflow_is_reported() {
        let items = [
            ConsolidatedItem::new("a", u64::MAX, 1),
            ConsolidatedItem::new("b", 1, 1),
        ];

        assert_eq!(subtotal(&items), Err(PricingError::Overflow));
        assert_eq!(compute(&items, &[DiscountCode::Bogo]), Err(PricingError::Overflow));
    }

    #[test]
    fn huge_flat_codes_are_capped_rather_than_overflowing() -> TestResult {
        let receipt = compute(
            &single("cake", 1000, 1),
            &[DiscountCode::Flat(u64::MAX), DiscountCode::Flat(u64::MAX)],
        )?;

        assert_eq!(receipt.discount(), 1000);
        assert_eq!(receipt.total(), 0);

        Ok(())
    }

    #[test]
    fn raw_percent_discount_keeps_fractions() -> TestResult {
        let raw = raw_discount(&parse("PERCENT_15")?, &[], 150)?;

        assert_eq!(raw, Decimal::new(225, 1));

        Ok(())
    }
}
