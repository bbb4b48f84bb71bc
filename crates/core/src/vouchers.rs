//! Vouchers
//!
//! Discount code records and the eligibility rules a code must pass before a
//! discount is computed. Checks run in a fixed order because the first
//! failure decides the user-facing message.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, compute_discount},
    prices::format_rupiah,
};

/// How a voucher's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the subtotal, conventionally in
    /// `(0, 100]`.
    Percentage,

    /// `discount_value` is a fixed rupiah amount.
    Fixed,
}

/// A discount code with its eligibility rules and usage counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// Store-assigned identifier, used to record usage.
    pub id: String,

    /// Redemption code; canonically upper-cased, unique per store.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,

    /// Interpretation of `discount_value`.
    pub discount_type: DiscountType,

    /// Percentage or fixed amount, depending on `discount_type`.
    pub discount_value: Decimal,

    /// Minimum subtotal required; zero means no minimum.
    #[serde(default)]
    pub min_purchase: u64,

    /// Cap applied to percentage discounts.
    #[serde(default)]
    pub max_discount: Option<u64>,

    /// Maximum number of redemptions; unlimited when absent.
    #[serde(default)]
    pub usage_limit: Option<u32>,

    /// Redemptions recorded so far.
    #[serde(default)]
    pub used_count: u32,

    /// Whether the voucher can currently be applied at all.
    pub is_active: bool,

    /// Expiry moment; never expires when absent.
    #[serde(default)]
    pub valid_until: Option<Timestamp>,
}

/// Why a voucher could not be applied, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
    /// No code was entered.
    #[error("please enter a voucher code")]
    EmptyCode,

    /// No active voucher matches the code.
    #[error("voucher code not found or inactive")]
    NotFoundOrInactive,

    /// The voucher's `valid_until` lies in the past.
    #[error("voucher has expired")]
    Expired,

    /// Every allowed redemption has been used.
    #[error("voucher usage limit reached")]
    UsageLimitReached,

    /// The order subtotal is below the voucher's minimum (carried for the
    /// user-facing message).
    #[error("minimum purchase of {} required", format_rupiah(*.0))]
    BelowMinimumPurchase(u64),
}

/// A voucher paired with its computed discount for the current checkout
/// session. Only ever produced by [`apply`], so holding one implies the
/// voucher passed validation at application time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedVoucher {
    /// Snapshot of the voucher at application time.
    pub voucher: Voucher,

    /// Discount in whole rupiah, never exceeding the subtotal it was
    /// computed against.
    pub discount: u64,
}

/// Canonicalizes a raw code: trims whitespace and upper-cases.
///
/// # Errors
///
/// Returns [`VoucherError::EmptyCode`] when nothing remains after trimming.
pub fn normalize_code(raw: &str) -> Result<String, VoucherError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(VoucherError::EmptyCode);
    }

    Ok(trimmed.to_uppercase())
}

/// Runs the ordered eligibility checks for a fetched voucher against an order
/// subtotal. The lookup itself (code → voucher) happens upstream; an inactive
/// voucher still fails here so the function is total over its inputs.
///
/// Expiry is compared against `now`, the moment of validation — an already
/// applied voucher is not re-checked when it later crosses its expiry
/// boundary.
///
/// # Errors
///
/// Returns the first failing check as a [`VoucherError`].
pub fn check_eligibility(
    voucher: &Voucher,
    subtotal: u64,
    now: Timestamp,
) -> Result<(), VoucherError> {
    if !voucher.is_active {
        return Err(VoucherError::NotFoundOrInactive);
    }

    if let Some(valid_until) = voucher.valid_until
        && valid_until < now
    {
        return Err(VoucherError::Expired);
    }

    if let Some(limit) = voucher.usage_limit
        && voucher.used_count >= limit
    {
        return Err(VoucherError::UsageLimitReached);
    }

    if subtotal < voucher.min_purchase {
        return Err(VoucherError::BelowMinimumPurchase(voucher.min_purchase));
    }

    Ok(())
}

/// Errors raised while applying a voucher.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The voucher failed an eligibility check.
    #[error(transparent)]
    Ineligible(#[from] VoucherError),

    /// The discount amount could not be represented.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Validates `voucher` against `subtotal` and, on success, pairs it with its
/// computed discount. This is the only way an `AppliedVoucher` comes into
/// being.
///
/// # Errors
///
/// Returns an [`ApplyError`] when validation fails or the discount cannot be
/// computed.
pub fn apply(
    voucher: Voucher,
    subtotal: u64,
    now: Timestamp,
) -> Result<AppliedVoucher, ApplyError> {
    check_eligibility(&voucher, subtotal, now)?;

    let discount = compute_discount(&voucher, subtotal)?;

    Ok(AppliedVoucher { voucher, discount })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn save20k() -> Voucher {
        Voucher {
            id: "v-1".to_string(),
            code: "SAVE20K".to_string(),
            name: "Hemat 20 ribu".to_string(),
            description: None,
            discount_type: DiscountType::Fixed,
            discount_value: Decimal::from(20_000_u32),
            min_purchase: 50_000,
            max_discount: None,
            usage_limit: None,
            used_count: 0,
            is_active: true,
            valid_until: None,
        }
    }

    #[test]
    fn normalize_code_trims_and_uppercases() -> TestResult {
        assert_eq!(normalize_code("  save20k ")?, "SAVE20K");

        Ok(())
    }

    #[test]
    fn normalize_code_rejects_blank_input() {
        assert_eq!(normalize_code("   "), Err(VoucherError::EmptyCode));
        assert_eq!(normalize_code(""), Err(VoucherError::EmptyCode));
    }

    #[test]
    fn eligibility_passes_for_valid_voucher() -> TestResult {
        check_eligibility(&save20k(), 100_000, Timestamp::now())?;

        Ok(())
    }

    #[test]
    fn inactive_voucher_fails_as_not_found() {
        let voucher = Voucher {
            is_active: false,
            ..save20k()
        };

        assert_eq!(
            check_eligibility(&voucher, 100_000, Timestamp::now()),
            Err(VoucherError::NotFoundOrInactive)
        );
    }

    #[test]
    fn expired_voucher_fails() -> TestResult {
        let voucher = Voucher {
            valid_until: Some("2024-01-01T00:00:00Z".parse()?),
            ..save20k()
        };

        let now: Timestamp = "2024-06-01T00:00:00Z".parse()?;

        assert_eq!(
            check_eligibility(&voucher, 100_000, now),
            Err(VoucherError::Expired)
        );

        Ok(())
    }

    #[test]
    fn voucher_valid_until_in_the_future_passes() -> TestResult {
        let voucher = Voucher {
            valid_until: Some("2024-06-01T00:00:00Z".parse()?),
            ..save20k()
        };

        let now: Timestamp = "2024-01-01T00:00:00Z".parse()?;

        check_eligibility(&voucher, 100_000, now)?;

        Ok(())
    }

    #[test]
    fn exhausted_usage_limit_fails_regardless_of_other_fields() {
        let voucher = Voucher {
            usage_limit: Some(5),
            used_count: 5,
            ..save20k()
        };

        assert_eq!(
            check_eligibility(&voucher, 1_000_000, Timestamp::now()),
            Err(VoucherError::UsageLimitReached)
        );
    }

    #[test]
    fn subtotal_below_minimum_fails_with_required_amount() {
        assert_eq!(
            check_eligibility(&save20k(), 40_000, Timestamp::now()),
            Err(VoucherError::BelowMinimumPurchase(50_000))
        );
    }

    #[test]
    fn below_minimum_message_formats_rupiah() {
        let error = VoucherError::BelowMinimumPurchase(50_000);

        assert_eq!(error.to_string(), "minimum purchase of Rp 50.000 required");
    }

    #[test]
    fn zero_minimum_means_no_minimum() -> TestResult {
        let voucher = Voucher {
            min_purchase: 0,
            ..save20k()
        };

        check_eligibility(&voucher, 0, Timestamp::now())?;

        Ok(())
    }

    #[test]
    fn expiry_outranks_usage_limit_in_check_order() -> TestResult {
        let voucher = Voucher {
            valid_until: Some("2024-01-01T00:00:00Z".parse()?),
            usage_limit: Some(1),
            used_count: 1,
            ..save20k()
        };

        let now: Timestamp = "2024-06-01T00:00:00Z".parse()?;

        assert_eq!(
            check_eligibility(&voucher, 10_000, now),
            Err(VoucherError::Expired)
        );

        Ok(())
    }

    #[test]
    fn apply_pairs_voucher_with_discount() -> TestResult {
        let applied = apply(save20k(), 100_000, Timestamp::now())?;

        assert_eq!(applied.discount, 20_000);
        assert_eq!(applied.voucher.code, "SAVE20K");

        Ok(())
    }

    #[test]
    fn apply_is_idempotent_for_unchanged_inputs() -> TestResult {
        let now = Timestamp::now();

        let first = apply(save20k(), 100_000, now)?;
        let second = apply(save20k(), 100_000, now)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn apply_refuses_ineligible_voucher() {
        let result = apply(save20k(), 40_000, Timestamp::now());

        assert!(
            matches!(
                result,
                Err(ApplyError::Ineligible(VoucherError::BelowMinimumPurchase(
                    50_000
                )))
            ),
            "expected BelowMinimumPurchase, got {result:?}"
        );
    }
}
