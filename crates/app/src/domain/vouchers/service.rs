//! Vouchers service.

use async_trait::async_trait;
use jiff::Timestamp;
use kiosk::vouchers::{self, ApplyError, VoucherError};
use mockall::automock;

use crate::{
    database::Db,
    domain::vouchers::{
        data::{NewVoucher, ValidatedVoucher, VoucherUpdate},
        errors::VouchersServiceError,
        records::{VoucherRecord, VoucherUuid},
        repository::PgVouchersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgVouchersService {
    db: Db,
    repository: PgVouchersRepository,
}

impl PgVouchersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVouchersRepository::new(),
        }
    }
}

#[async_trait]
impl VouchersService for PgVouchersService {
    async fn list_vouchers(&self) -> Result<Vec<VoucherRecord>, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_vouchers(&mut tx).await?;

        tx.commit().await?;

        Ok(records)
    }

    async fn create_voucher(
        &self,
        voucher: NewVoucher,
    ) -> Result<VoucherRecord, VouchersServiceError> {
        let voucher = NewVoucher {
            code: vouchers::normalize_code(&voucher.code)?,
            ..voucher
        };

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_voucher(&mut tx, &voucher).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_voucher(
        &self,
        voucher: VoucherUuid,
        update: VoucherUpdate,
    ) -> Result<VoucherRecord, VouchersServiceError> {
        let update = VoucherUpdate {
            code: vouchers::normalize_code(&update.code)?,
            ..update
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_voucher(&mut tx, voucher, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_voucher(&self, voucher: VoucherUuid) -> Result<(), VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_voucher(&mut tx, voucher).await?;

        if rows_affected == 0 {
            return Err(VouchersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn validate(
        &self,
        code: &str,
        subtotal: u64,
    ) -> Result<ValidatedVoucher, VouchersServiceError> {
        let code = vouchers::normalize_code(code)?;

        let mut tx = self.db.begin().await?;

        let record = match self.repository.find_active_by_code(&mut tx, &code).await {
            Ok(record) => record,
            Err(sqlx::Error::RowNotFound) => {
                return Err(VoucherError::NotFoundOrInactive.into());
            }
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        let uuid = record.uuid;

        let applied =
            vouchers::apply(record.into_voucher(), subtotal, Timestamp::now()).map_err(
                |error| match error {
                    ApplyError::Ineligible(inner) => VouchersServiceError::Ineligible(inner),
                    ApplyError::Discount(inner) => VouchersServiceError::Discount(inner),
                },
            )?;

        Ok(ValidatedVoucher { uuid, applied })
    }

    async fn record_usage(&self, voucher: VoucherUuid) -> Result<u32, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let used_count = self.repository.record_usage(&mut tx, voucher).await?;

        let Some(used_count) = used_count else {
            return Err(VouchersServiceError::UsageRecordFailed);
        };

        tx.commit().await?;

        Ok(used_count)
    }

    async fn set_active(&self, code: &str, active: bool) -> Result<(), VouchersServiceError> {
        let code = vouchers::normalize_code(code)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.set_active(&mut tx, &code, active).await?;

        if rows_affected == 0 {
            return Err(VouchersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// All vouchers, newest first. Admin surface; includes inactive ones.
    async fn list_vouchers(&self) -> Result<Vec<VoucherRecord>, VouchersServiceError>;

    /// Creates a voucher; the code is canonicalized before persisting.
    async fn create_voucher(
        &self,
        voucher: NewVoucher,
    ) -> Result<VoucherRecord, VouchersServiceError>;

    /// Updates a voucher with the given UUID and update.
    async fn update_voucher(
        &self,
        voucher: VoucherUuid,
        update: VoucherUpdate,
    ) -> Result<VoucherRecord, VouchersServiceError>;

    /// Deletes a voucher with the given UUID.
    async fn delete_voucher(&self, voucher: VoucherUuid) -> Result<(), VouchersServiceError>;

    /// Looks a code up and runs the eligibility checks against `subtotal`.
    /// Does not consume a redemption.
    async fn validate(
        &self,
        code: &str,
        subtotal: u64,
    ) -> Result<ValidatedVoucher, VouchersServiceError>;

    /// Consumes one redemption atomically; the increment never pushes
    /// `used_count` past the limit even under concurrent checkouts.
    async fn record_usage(&self, voucher: VoucherUuid) -> Result<u32, VouchersServiceError>;

    /// Flips a voucher on or off by code.
    async fn set_active(&self, code: &str, active: bool) -> Result<(), VouchersServiceError>;
}
