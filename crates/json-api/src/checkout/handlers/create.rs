//! Create Checkout Handler
//!
//! Turns a client cart into the WhatsApp handoff. The cart is re-validated
//! server-side against live stock before anything irreversible happens, so a
//! stale client snapshot can never oversell.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk::checkout::{CustomerInfo, PaymentMethod};
use kiosk_app::domain::checkout::data::{CheckoutRequest, CheckoutSummary, OrderLine};

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// One requested order line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineBody {
    /// Product being bought
    pub product: Uuid,

    /// Units requested
    pub quantity: u32,
}

/// Customer details from the checkout form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerBody {
    pub name: String,
    pub roblox_username: String,
    pub whatsapp: String,
}

/// Payment methods offered at checkout, mirrored for the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentMethodBody {
    Dana,
    Gopay,
    ShopeePay,
    SeaBank,
    Qris,
}

impl From<PaymentMethodBody> for PaymentMethod {
    fn from(method: PaymentMethodBody) -> Self {
        match method {
            PaymentMethodBody::Dana => PaymentMethod::Dana,
            PaymentMethodBody::Gopay => PaymentMethod::Gopay,
            PaymentMethodBody::ShopeePay => PaymentMethod::ShopeePay,
            PaymentMethodBody::SeaBank => PaymentMethod::SeaBank,
            PaymentMethodBody::Qris => PaymentMethod::Qris,
        }
    }
}

/// Create Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCheckoutRequest {
    pub lines: Vec<OrderLineBody>,
    pub customer: CustomerBody,
    pub payment_method: PaymentMethodBody,
    #[serde(default)]
    pub voucher_code: Option<String>,
}

impl From<CreateCheckoutRequest> for CheckoutRequest {
    fn from(request: CreateCheckoutRequest) -> Self {
        CheckoutRequest {
            lines: request
                .lines
                .into_iter()
                .map(|line| OrderLine {
                    product: line.product.into(),
                    quantity: line.quantity,
                })
                .collect(),
            customer: CustomerInfo {
                name: request.customer.name,
                roblox_username: request.customer.roblox_username,
                whatsapp: request.customer.whatsapp,
            },
            payment_method: request.payment_method.into(),
            voucher_code: request.voucher_code,
        }
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// The rendered order message
    pub message: String,

    /// `wa.me` link the shopper opens to finish the purchase
    pub whatsapp_url: String,

    /// Sum of line totals in whole rupiah
    pub subtotal: u64,

    /// Discount applied, zero without a voucher
    pub discount: u64,

    /// Subtotal minus discount
    pub total: u64,

    /// Canonical code of the applied voucher, if any
    pub voucher_code: Option<String>,
}

impl From<CheckoutSummary> for CheckoutResponse {
    fn from(summary: CheckoutSummary) -> Self {
        CheckoutResponse {
            message: summary.message,
            whatsapp_url: summary.whatsapp_url,
            subtotal: summary.subtotal,
            discount: summary.discount,
            total: summary.total,
            voucher_code: summary.voucher_code,
        }
    }
}

/// Create Checkout Handler
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Order handed off to WhatsApp"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart or voucher is invalid"),
        (status_code = StatusCode::CONFLICT, description = "Stock or voucher changed since the cart was filled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let summary = state
        .app
        .checkout
        .checkout(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
