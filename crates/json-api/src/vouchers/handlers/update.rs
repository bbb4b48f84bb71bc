//! Update Voucher Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk_app::domain::vouchers::data::VoucherUpdate;

use crate::{
    extensions::*,
    state::State,
    vouchers::{
        errors::into_status_error,
        handlers::{
            create::{parse_discount_value, parse_valid_until},
            index::{DiscountTypeBody, VoucherResponse},
        },
    },
};

/// Update Voucher Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateVoucherRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_type: DiscountTypeBody,
    pub discount_value: String,
    #[serde(default)]
    pub min_purchase: u64,
    #[serde(default)]
    pub max_discount: Option<u64>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    pub is_active: bool,
    #[serde(default)]
    pub valid_until: Option<String>,
}

impl UpdateVoucherRequest {
    fn into_update(self) -> Result<VoucherUpdate, StatusError> {
        let discount_value = parse_discount_value(&self.discount_value)?;
        let valid_until = parse_valid_until(self.valid_until.as_deref())?;

        Ok(VoucherUpdate {
            code: self.code,
            name: self.name,
            description: self.description,
            discount_type: self.discount_type.into(),
            discount_value,
            min_purchase: self.min_purchase,
            max_discount: self.max_discount,
            usage_limit: self.usage_limit,
            is_active: self.is_active,
            valid_until,
        })
    }
}

/// Voucher Update Handler
#[endpoint(
    tags("admin", "vouchers"),
    summary = "Update Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Voucher updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Voucher not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    voucher: PathParam<Uuid>,
    json: JsonBody<UpdateVoucherRequest>,
    depot: &mut Depot,
) -> Result<Json<VoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = json.into_inner().into_update()?;

    let voucher = state
        .app
        .vouchers
        .update_voucher(voucher.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(voucher_uuid = %voucher.uuid, "updated voucher");

    Ok(Json(voucher.into()))
}
