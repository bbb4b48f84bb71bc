//! Testimonials Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::testimonials::{
    data::NewTestimonial,
    records::{Testimonial, TestimonialUuid},
};

const LIST_TESTIMONIALS_SQL: &str = include_str!("sql/list_testimonials.sql");
const CREATE_TESTIMONIAL_SQL: &str = include_str!("sql/create_testimonial.sql");
const APPROVE_TESTIMONIAL_SQL: &str = include_str!("sql/approve_testimonial.sql");
const DELETE_TESTIMONIAL_SQL: &str = include_str!("sql/delete_testimonial.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTestimonialsRepository;

impl PgTestimonialsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_testimonials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        approved_only: bool,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        query_as::<Postgres, Testimonial>(LIST_TESTIMONIALS_SQL)
            .bind(approved_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_testimonial(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        testimonial: &NewTestimonial,
    ) -> Result<Testimonial, sqlx::Error> {
        query_as::<Postgres, Testimonial>(CREATE_TESTIMONIAL_SQL)
            .bind(testimonial.uuid.into_uuid())
            .bind(&testimonial.username)
            .bind(i16::from(testimonial.rating))
            .bind(&testimonial.item_bought)
            .bind(&testimonial.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn approve_testimonial(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        testimonial: TestimonialUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(APPROVE_TESTIMONIAL_SQL)
            .bind(testimonial.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_testimonial(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        testimonial: TestimonialUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TESTIMONIAL_SQL)
            .bind(testimonial.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Testimonial {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating: i16 = row.try_get("rating")?;

        let rating = u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: TestimonialUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            rating,
            item_bought: row.try_get("item_bought")?,
            message: row.try_get("message")?,
            approved: row.try_get("approved")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
