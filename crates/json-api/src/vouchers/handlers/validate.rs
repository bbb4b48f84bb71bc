//! Validate Voucher Handler
//!
//! Public preview endpoint: runs the eligibility checks and discount math
//! against the shopper's current subtotal without consuming a redemption.
//! The first failed check decides the message shown in the cart.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, vouchers::errors::into_status_error};

/// Validate Voucher Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateVoucherRequest {
    /// Raw code as typed by the shopper; canonicalized server-side
    pub code: String,

    /// Current cart subtotal in whole rupiah
    pub subtotal: u64,
}

/// Validated Voucher Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidatedVoucherResponse {
    /// Canonical voucher code
    pub code: String,

    /// Voucher display name
    pub name: String,

    /// Discount in whole rupiah, never exceeding the subtotal
    pub discount: u64,

    /// The subtotal the discount was computed against
    pub subtotal: u64,

    /// Subtotal minus discount
    pub total: u64,
}

/// Validate Voucher Handler
#[endpoint(
    tags("vouchers"),
    summary = "Validate Voucher",
    responses(
        (status_code = StatusCode::OK, description = "Voucher applies to the subtotal"),
        (status_code = StatusCode::BAD_REQUEST, description = "Code is ineligible or malformed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateVoucherRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidatedVoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let validated = state
        .app
        .vouchers
        .validate(&request.code, request.subtotal)
        .await
        .map_err(into_status_error)?;

    let discount = validated.applied.discount;

    Ok(Json(ValidatedVoucherResponse {
        code: validated.applied.voucher.code,
        name: validated.applied.voucher.name,
        discount,
        subtotal: request.subtotal,
        total: request.subtotal.saturating_sub(discount),
    }))
}
