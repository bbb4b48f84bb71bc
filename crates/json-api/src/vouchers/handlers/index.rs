//! Voucher Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk::vouchers::DiscountType;
use kiosk_app::domain::vouchers::records::VoucherRecord;

use crate::{extensions::*, state::State};

/// How a voucher's value is interpreted, mirrored for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DiscountTypeBody {
    Percentage,
    Fixed,
}

impl From<DiscountType> for DiscountTypeBody {
    fn from(discount_type: DiscountType) -> Self {
        match discount_type {
            DiscountType::Percentage => DiscountTypeBody::Percentage,
            DiscountType::Fixed => DiscountTypeBody::Fixed,
        }
    }
}

impl From<DiscountTypeBody> for DiscountType {
    fn from(discount_type: DiscountTypeBody) -> Self {
        match discount_type {
            DiscountTypeBody::Percentage => DiscountType::Percentage,
            DiscountTypeBody::Fixed => DiscountType::Fixed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VoucherResponse {
    /// The unique identifier of the voucher
    pub uuid: Uuid,

    /// Redemption code, canonically upper-cased
    pub code: String,

    /// Display name
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Interpretation of `discount_value`
    pub discount_type: DiscountTypeBody,

    /// Percentage or fixed rupiah amount, as a decimal string
    pub discount_value: String,

    /// Minimum subtotal required; zero means no minimum
    pub min_purchase: u64,

    /// Cap applied to percentage discounts
    pub max_discount: Option<u64>,

    /// Maximum number of redemptions; unlimited when absent
    pub usage_limit: Option<u32>,

    /// Redemptions recorded so far
    pub used_count: u32,

    /// Whether the voucher can currently be applied
    pub is_active: bool,

    /// Expiry moment; never expires when absent
    pub valid_until: Option<String>,

    /// The date and time the voucher was created
    pub created_at: String,

    /// The date and time the voucher was last updated
    pub updated_at: String,
}

impl From<VoucherRecord> for VoucherResponse {
    fn from(voucher: VoucherRecord) -> Self {
        VoucherResponse {
            uuid: voucher.uuid.into(),
            code: voucher.code,
            name: voucher.name,
            description: voucher.description,
            discount_type: voucher.discount_type.into(),
            discount_value: voucher.discount_value.to_string(),
            min_purchase: voucher.min_purchase,
            max_discount: voucher.max_discount,
            usage_limit: voucher.usage_limit,
            used_count: voucher.used_count,
            is_active: voucher.is_active,
            valid_until: voucher.valid_until.map(|until| until.to_string()),
            created_at: voucher.created_at.to_string(),
            updated_at: voucher.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VouchersResponse {
    /// The list of vouchers, newest first
    pub vouchers: Vec<VoucherResponse>,
}

/// Voucher Index Handler
///
/// Returns every voucher, active or not.
#[endpoint(
    tags("admin", "vouchers"),
    summary = "List Vouchers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VouchersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let vouchers = state
        .app
        .vouchers
        .list_vouchers()
        .await
        .or_500("failed to fetch vouchers")?;

    Ok(Json(VouchersResponse {
        vouchers: vouchers.into_iter().map(Into::into).collect(),
    }))
}
