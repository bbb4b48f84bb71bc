//! Create Voucher Handler

use std::{str::FromStr, sync::Arc};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kiosk_app::domain::vouchers::{data::NewVoucher, records::VoucherUuid};

use crate::{
    extensions::*,
    state::State,
    vouchers::{
        errors::into_status_error,
        handlers::index::{DiscountTypeBody, VoucherResponse},
    },
};

/// Create Voucher Request
///
/// `discount_value` travels as a decimal string so percentage values like
/// `"12.5"` survive the wire exactly.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVoucherRequest {
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
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub valid_until: Option<String>,
}

fn default_active() -> bool {
    true
}

pub(super) fn parse_discount_value(value: &str) -> Result<Decimal, StatusError> {
    Decimal::from_str(value)
        .map_err(|_error| StatusError::bad_request().brief("Invalid discount value"))
}

pub(super) fn parse_valid_until(value: Option<&str>) -> Result<Option<Timestamp>, StatusError> {
    value
        .map(|raw| {
            raw.parse()
                .map_err(|_error| StatusError::bad_request().brief("Invalid expiry timestamp"))
        })
        .transpose()
}

impl CreateVoucherRequest {
    fn into_new_voucher(self, uuid: VoucherUuid) -> Result<NewVoucher, StatusError> {
        let discount_value = parse_discount_value(&self.discount_value)?;
        let valid_until = parse_valid_until(self.valid_until.as_deref())?;

        Ok(NewVoucher {
            uuid,
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

/// Create Voucher Handler
#[endpoint(
    tags("admin", "vouchers"),
    summary = "Create Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Voucher created"),
        (status_code = StatusCode::CONFLICT, description = "Voucher code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateVoucherRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let new_voucher = json.into_inner().into_new_voucher(VoucherUuid::new())?;

    let voucher = state
        .app
        .vouchers
        .create_voucher(new_voucher)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/admin/vouchers/{}", voucher.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(voucher.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use kiosk::vouchers::DiscountType;
    use kiosk_app::domain::vouchers::{MockVouchersService, VouchersServiceError};

    use crate::test_helpers::{make_voucher, vouchers_service};

    use super::*;

    fn make_service(repo: MockVouchersService) -> Service {
        vouchers_service(repo, Router::with_path("admin/vouchers").post(handler))
    }

    #[tokio::test]
    async fn test_create_voucher_returns_201() -> TestResult {
        let mut repo = MockVouchersService::new();

        repo.expect_create_voucher()
            .once()
            .withf(|new| {
                new.code == "HEMAT10"
                    && new.discount_type == DiscountType::Percentage
                    && new.discount_value == Decimal::from(10_u32)
                    && new.is_active
            })
            .returning(|new| {
                let mut voucher = make_voucher(new.uuid);

                voucher.code = new.code;

                Ok(voucher)
            });

        let mut res = TestClient::post("http://example.com/admin/vouchers")
            .json(&json!({
                "code": "HEMAT10",
                "name": "Hemat 10%",
                "discount_type": "percentage",
                "discount_value": "10",
            }))
            .send(&make_service(repo))
            .await;

        let body: VoucherResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.code, "HEMAT10");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_voucher_malformed_discount_value_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/admin/vouchers")
            .json(&json!({
                "code": "HEMAT10",
                "name": "Hemat 10%",
                "discount_type": "percentage",
                "discount_value": "ten",
            }))
            .send(&make_service(MockVouchersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_voucher_duplicate_code_returns_409() -> TestResult {
        let mut repo = MockVouchersService::new();

        repo.expect_create_voucher()
            .once()
            .return_once(|_| Err(VouchersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/vouchers")
            .json(&json!({
                "code": "HEMAT10",
                "name": "Hemat 10%",
                "discount_type": "percentage",
                "discount_value": "10",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_voucher_malformed_expiry_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/admin/vouchers")
            .json(&json!({
                "code": "HEMAT10",
                "name": "Hemat 10%",
                "discount_type": "fixed",
                "discount_value": "20000",
                "valid_until": "tomorrow",
            }))
            .send(&make_service(MockVouchersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
