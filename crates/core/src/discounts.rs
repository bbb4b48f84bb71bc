//! Discounts
//!
//! Pure discount arithmetic: mapping a valid voucher and an order subtotal to
//! a discount amount in whole rupiah. Percentage results round half-up
//! (`MidpointAwayFromZero`) so the same inputs always reproduce the same
//! amount.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

use crate::vouchers::{DiscountType, Voucher};

/// Errors specific to discount calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// The computed amount could not be represented in whole rupiah.
    #[error("discount conversion overflowed or was not finite")]
    Conversion,
}

/// Computes the discount a voucher grants on `subtotal`.
///
/// - Percentage: `subtotal * discount_value / 100`, rounded half-up, capped
///   by `max_discount` when set.
/// - Fixed: the configured amount.
///
/// Either way the result never exceeds `subtotal`, so the payable total can
/// never go negative.
///
/// # Errors
///
/// Returns a [`DiscountError`] when the amount cannot be represented.
pub fn compute_discount(voucher: &Voucher, subtotal: u64) -> Result<u64, DiscountError> {
    let raw = match voucher.discount_type {
        DiscountType::Percentage => {
            let percent_of = percent_of(voucher.discount_value, subtotal)?;

            match voucher.max_discount {
                Some(cap) => percent_of.min(cap),
                None => percent_of,
            }
        }
        DiscountType::Fixed => {
            let rounded = voucher
                .discount_value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

            rounded.to_u64().ok_or(DiscountError::Conversion)?
        }
    };

    Ok(raw.min(subtotal))
}

/// The final payable total after discounting; clamped at zero.
#[must_use]
pub fn payable_total(subtotal: u64, discount: u64) -> u64 {
    subtotal.saturating_sub(discount)
}

/// `value`% of `amount`, rounded half-up to whole rupiah.
fn percent_of(value: Decimal, amount: u64) -> Result<u64, DiscountError> {
    let Some(amount) = Decimal::from_u64(amount) else {
        return Err(DiscountError::Conversion);
    };

    let Some(scaled) = value.checked_mul(amount) else {
        return Err(DiscountError::Conversion);
    };

    let Some(applied) = scaled.checked_div(Decimal::ONE_HUNDRED) else {
        return Err(DiscountError::Conversion);
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::Conversion)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn percentage(value: u32, max_discount: Option<u64>) -> Voucher {
        Voucher {
            id: "v-pct".to_string(),
            code: "PCT".to_string(),
            name: "Percentage voucher".to_string(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(value),
            min_purchase: 0,
            max_discount,
            usage_limit: None,
            used_count: 0,
            is_active: true,
            valid_until: None,
        }
    }

    fn fixed(value: u64) -> Voucher {
        Voucher {
            discount_type: DiscountType::Fixed,
            discount_value: Decimal::from(value),
            ..percentage(0, None)
        }
    }

    #[test]
    fn percentage_discount_without_cap() -> TestResult {
        assert_eq!(compute_discount(&percentage(10, None), 200_000)?, 20_000);

        Ok(())
    }

    #[test]
    fn percentage_discount_capped_by_max_discount() -> TestResult {
        // raw 10% of 200_000 is 20_000; the cap wins
        assert_eq!(
            compute_discount(&percentage(10, Some(15_000)), 200_000)?,
            15_000
        );

        Ok(())
    }

    #[test]
    fn percentage_cap_is_ignored_below_threshold() -> TestResult {
        assert_eq!(
            compute_discount(&percentage(10, Some(15_000)), 100_000)?,
            10_000
        );

        Ok(())
    }

    #[test]
    fn percentage_rounds_half_up() -> TestResult {
        // 15% of 30 = 4.5, rounds to 5
        assert_eq!(compute_discount(&percentage(15, None), 30)?, 5);
        // 15% of 29 = 4.35, rounds to 4
        assert_eq!(compute_discount(&percentage(15, None), 29)?, 4);

        Ok(())
    }

    #[test]
    fn hundred_percent_discounts_entire_subtotal() -> TestResult {
        assert_eq!(compute_discount(&percentage(100, None), 75_000)?, 75_000);

        Ok(())
    }

    #[test]
    fn fixed_discount_below_subtotal_is_returned_whole() -> TestResult {
        assert_eq!(compute_discount(&fixed(20_000), 100_000)?, 20_000);

        Ok(())
    }

    #[test]
    fn fixed_discount_never_exceeds_subtotal() -> TestResult {
        assert_eq!(compute_discount(&fixed(20_000), 15_000)?, 15_000);
        assert_eq!(compute_discount(&fixed(20_000), 0)?, 0);

        Ok(())
    }

    #[test]
    fn payable_total_subtracts_discount() {
        assert_eq!(payable_total(100_000, 20_000), 80_000);
        assert_eq!(payable_total(200_000, 15_000), 185_000);
    }

    #[test]
    fn payable_total_never_goes_negative() {
        assert_eq!(payable_total(10_000, 20_000), 0);
    }

    #[test]
    fn zero_subtotal_yields_zero_discount() -> TestResult {
        assert_eq!(compute_discount(&percentage(50, None), 0)?, 0);

        Ok(())
    }
}
