//! Vouchers Data

use jiff::Timestamp;
use kiosk::vouchers::{AppliedVoucher, DiscountType};
use rust_decimal::Decimal;

use crate::domain::vouchers::records::VoucherUuid;

/// New Voucher Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewVoucher {
    pub uuid: VoucherUuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_purchase: u64,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u32>,
    pub is_active: bool,
    pub valid_until: Option<Timestamp>,
}

/// Voucher Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherUpdate {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_purchase: u64,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u32>,
    pub is_active: bool,
    pub valid_until: Option<Timestamp>,
}

/// A voucher that passed validation against a specific subtotal, still tied
/// to the row usage will be recorded against.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVoucher {
    pub uuid: VoucherUuid,
    pub applied: AppliedVoucher,
}
