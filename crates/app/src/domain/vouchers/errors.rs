//! Vouchers service errors.

use kiosk::{discounts::DiscountError, vouchers::VoucherError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VouchersServiceError {
    #[error("voucher already exists")]
    AlreadyExists,

    #[error("voucher not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    /// The voucher exists but failed an eligibility check; carries the
    /// user-facing reason.
    #[error(transparent)]
    Ineligible(#[from] VoucherError),

    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The bounded usage increment matched no row: the voucher was
    /// deactivated or exhausted between validation and completion.
    #[error("voucher usage could not be recorded")]
    UsageRecordFailed,
}

impl From<Error> for VouchersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
