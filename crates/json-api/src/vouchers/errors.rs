//! Voucher Errors

use salvo::http::StatusError;
use tracing::error;

use kiosk_app::domain::vouchers::VouchersServiceError;

pub(crate) fn into_status_error(error: VouchersServiceError) -> StatusError {
    match error {
        VouchersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Voucher code already exists")
        }
        VouchersServiceError::MissingRequiredData | VouchersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid voucher payload")
        }
        // The eligibility message is written for shoppers; pass it through.
        VouchersServiceError::Ineligible(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        VouchersServiceError::Discount(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        VouchersServiceError::UsageRecordFailed => {
            StatusError::conflict().brief("Voucher is no longer redeemable")
        }
        VouchersServiceError::Sql(source) => {
            error!("voucher storage error: {source}");

            StatusError::internal_server_error()
        }
        VouchersServiceError::NotFound => StatusError::not_found().brief("Voucher not found"),
    }
}
