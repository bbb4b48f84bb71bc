//! Checkout Errors
//!
//! Shopper mistakes map to 400 with the reason; conflicts with live data
//! that arose since the cart was filled map to 409 so the storefront knows
//! to refresh and retry.

use salvo::http::StatusError;
use tracing::error;

use kiosk_app::domain::{checkout::CheckoutServiceError, vouchers::VouchersServiceError};

use crate::vouchers::errors::into_status_error as voucher_status_error;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart | CheckoutServiceError::InvalidQuantity { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        CheckoutServiceError::UnknownProduct { .. } => {
            StatusError::bad_request().brief("Cart references a product that no longer exists")
        }
        CheckoutServiceError::ItemUnavailable { .. }
        | CheckoutServiceError::StockInsufficient { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        CheckoutServiceError::Vouchers(VouchersServiceError::UsageRecordFailed) => {
            StatusError::conflict().brief("Voucher is no longer redeemable")
        }
        CheckoutServiceError::Vouchers(source) => voucher_status_error(source),
        CheckoutServiceError::Products(source) => {
            error!("checkout product lookup failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
