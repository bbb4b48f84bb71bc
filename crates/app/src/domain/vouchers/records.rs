//! Voucher Records

use jiff::Timestamp;
use kiosk::vouchers::{DiscountType, Voucher};
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Voucher UUID
pub type VoucherUuid = TypedUuid<VoucherRecord>;

/// Voucher Record
///
/// The persisted row; [`VoucherRecord::into_voucher`] turns it into the pure
/// rules model eligibility and discount math run against.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherRecord {
    pub uuid: VoucherUuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_purchase: u64,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    pub is_active: bool,
    pub valid_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VoucherRecord {
    /// The rules-model view of this record.
    #[must_use]
    pub fn into_voucher(self) -> Voucher {
        Voucher {
            id: self.uuid.to_string(),
            code: self.code,
            name: self.name,
            description: self.description,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_purchase: self.min_purchase,
            max_discount: self.max_discount,
            usage_limit: self.usage_limit,
            used_count: self.used_count,
            is_active: self.is_active,
            valid_until: self.valid_until,
        }
    }
}
