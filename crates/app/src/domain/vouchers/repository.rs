//! Vouchers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use kiosk::vouchers::DiscountType;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::vouchers::{
    data::{NewVoucher, VoucherUpdate},
    records::{VoucherRecord, VoucherUuid},
};

const LIST_VOUCHERS_SQL: &str = include_str!("sql/list_vouchers.sql");
const FIND_ACTIVE_VOUCHER_BY_CODE_SQL: &str = include_str!("sql/find_active_voucher_by_code.sql");
const CREATE_VOUCHER_SQL: &str = include_str!("sql/create_voucher.sql");
const UPDATE_VOUCHER_SQL: &str = include_str!("sql/update_voucher.sql");
const DELETE_VOUCHER_SQL: &str = include_str!("sql/delete_voucher.sql");
const RECORD_VOUCHER_USAGE_SQL: &str = include_str!("sql/record_voucher_usage.sql");
const SET_VOUCHER_ACTIVE_SQL: &str = include_str!("sql/set_voucher_active.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVouchersRepository;

impl PgVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_vouchers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<VoucherRecord>, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(LIST_VOUCHERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_active_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(FIND_ACTIVE_VOUCHER_BY_CODE_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: &NewVoucher,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(CREATE_VOUCHER_SQL)
            .bind(voucher.uuid.into_uuid())
            .bind(&voucher.code)
            .bind(&voucher.name)
            .bind(voucher.description.as_deref())
            .bind(discount_type_to_db(voucher.discount_type))
            .bind(voucher.discount_value)
            .bind(amount_to_db(voucher.min_purchase, "min_purchase")?)
            .bind(
                voucher
                    .max_discount
                    .map(|v| amount_to_db(v, "max_discount"))
                    .transpose()?,
            )
            .bind(
                voucher
                    .usage_limit
                    .map(|v| count_to_db(v, "usage_limit"))
                    .transpose()?,
            )
            .bind(voucher.is_active)
            .bind(voucher.valid_until.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: VoucherUuid,
        update: &VoucherUpdate,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(UPDATE_VOUCHER_SQL)
            .bind(voucher.into_uuid())
            .bind(&update.code)
            .bind(&update.name)
            .bind(update.description.as_deref())
            .bind(discount_type_to_db(update.discount_type))
            .bind(update.discount_value)
            .bind(amount_to_db(update.min_purchase, "min_purchase")?)
            .bind(
                update
                    .max_discount
                    .map(|v| amount_to_db(v, "max_discount"))
                    .transpose()?,
            )
            .bind(
                update
                    .usage_limit
                    .map(|v| count_to_db(v, "usage_limit"))
                    .transpose()?,
            )
            .bind(update.is_active)
            .bind(update.valid_until.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: VoucherUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_VOUCHER_SQL)
            .bind(voucher.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Bounded increment. Returns the new count, or `None` when no row
    /// matched because the voucher was inactive or already at its limit.
    pub(crate) async fn record_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: VoucherUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        let used_count: Option<i32> = query_scalar(RECORD_VOUCHER_USAGE_SQL)
            .bind(voucher.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        used_count
            .map(|count| count_from_db(count, "used_count"))
            .transpose()
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        active: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_VOUCHER_ACTIVE_SQL)
            .bind(code)
            .bind(active)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

const fn discount_type_to_db(discount_type: DiscountType) -> &'static str {
    match discount_type {
        DiscountType::Percentage => "percentage",
        DiscountType::Fixed => "fixed",
    }
}

fn discount_type_from_db(raw: &str) -> Result<DiscountType, sqlx::Error> {
    match raw {
        "percentage" => Ok(DiscountType::Percentage),
        "fixed" => Ok(DiscountType::Fixed),
        other => Err(sqlx::Error::ColumnDecode {
            index: "discount_type".to_string(),
            source: format!("unknown discount type {other:?}").into(),
        }),
    }
}

fn amount_to_db(amount: u64, index: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn amount_from_db(amount: i64, index: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn count_to_db(count: u32, index: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn count_from_db(count: i32, index: &str) -> Result<u32, sqlx::Error> {
    u32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for VoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VoucherUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            discount_type: discount_type_from_db(row.try_get::<&str, _>("discount_type")?)?,
            discount_value: row.try_get("discount_value")?,
            min_purchase: amount_from_db(row.try_get("min_purchase")?, "min_purchase")?,
            max_discount: row
                .try_get::<Option<i64>, _>("max_discount")?
                .map(|v| amount_from_db(v, "max_discount"))
                .transpose()?,
            usage_limit: row
                .try_get::<Option<i32>, _>("usage_limit")?
                .map(|v| count_from_db(v, "usage_limit"))
                .transpose()?,
            used_count: count_from_db(row.try_get("used_count")?, "used_count")?,
            is_active: row.try_get("is_active")?,
            valid_until: row
                .try_get::<Option<SqlxTimestamp>, _>("valid_until")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
