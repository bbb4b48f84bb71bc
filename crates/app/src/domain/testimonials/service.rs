//! Testimonials service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::testimonials::{
        data::NewTestimonial,
        errors::TestimonialsServiceError,
        records::{Testimonial, TestimonialUuid},
        repository::PgTestimonialsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgTestimonialsService {
    db: Db,
    repository: PgTestimonialsRepository,
}

impl PgTestimonialsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTestimonialsRepository::new(),
        }
    }
}

#[async_trait]
impl TestimonialsService for PgTestimonialsService {
    async fn list_testimonials(
        &self,
        approved_only: bool,
    ) -> Result<Vec<Testimonial>, TestimonialsServiceError> {
        let mut tx = self.db.begin().await?;

        let testimonials = self
            .repository
            .list_testimonials(&mut tx, approved_only)
            .await?;

        tx.commit().await?;

        Ok(testimonials)
    }

    async fn submit_testimonial(
        &self,
        testimonial: NewTestimonial,
    ) -> Result<Testimonial, TestimonialsServiceError> {
        if !(1..=5).contains(&testimonial.rating) {
            return Err(TestimonialsServiceError::InvalidRating);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_testimonial(&mut tx, &testimonial)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn approve_testimonial(
        &self,
        testimonial: TestimonialUuid,
    ) -> Result<(), TestimonialsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .approve_testimonial(&mut tx, testimonial)
            .await?;

        if rows_affected == 0 {
            return Err(TestimonialsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete_testimonial(
        &self,
        testimonial: TestimonialUuid,
    ) -> Result<(), TestimonialsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_testimonial(&mut tx, testimonial)
            .await?;

        if rows_affected == 0 {
            return Err(TestimonialsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait TestimonialsService: Send + Sync {
    /// Newest first. `approved_only` is what the public storefront sees; the
    /// admin view passes `false` to moderate pending submissions.
    async fn list_testimonials(
        &self,
        approved_only: bool,
    ) -> Result<Vec<Testimonial>, TestimonialsServiceError>;

    /// Accepts a shopper submission, pending approval.
    async fn submit_testimonial(
        &self,
        testimonial: NewTestimonial,
    ) -> Result<Testimonial, TestimonialsServiceError>;

    /// Publishes a pending testimonial.
    async fn approve_testimonial(
        &self,
        testimonial: TestimonialUuid,
    ) -> Result<(), TestimonialsServiceError>;

    /// Deletes a testimonial with the given UUID.
    async fn delete_testimonial(
        &self,
        testimonial: TestimonialUuid,
    ) -> Result<(), TestimonialsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn submission(username: &str, rating: u8) -> NewTestimonial {
        NewTestimonial {
            uuid: TestimonialUuid::new(),
            username: username.to_string(),
            rating,
            item_bought: "Robux 800".to_string(),
            message: "Fast delivery, thanks!".to_string(),
        }
    }

    #[tokio::test]
    async fn submission_starts_unapproved_and_hidden_from_storefront() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .testimonials
            .submit_testimonial(submission("budi123", 5))
            .await?;

        assert!(!created.approved);

        let public = ctx.testimonials.list_testimonials(true).await?;
        assert!(public.is_empty());

        let moderation = ctx.testimonials.list_testimonials(false).await?;
        assert_eq!(moderation.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn approval_publishes_the_testimonial() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .testimonials
            .submit_testimonial(submission("budi123", 4))
            .await?;

        ctx.testimonials.approve_testimonial(created.uuid).await?;

        let public = ctx.testimonials.list_testimonials(true).await?;

        assert_eq!(public.len(), 1);
        assert_eq!(public.first().map(|t| t.uuid), Some(created.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_ratings_are_rejected() {
        let ctx = TestContext::new().await;

        for rating in [0, 6] {
            let result = ctx
                .testimonials
                .submit_testimonial(submission("budi123", rating))
                .await;

            assert!(
                matches!(result, Err(TestimonialsServiceError::InvalidRating)),
                "expected InvalidRating for {rating}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn approve_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .testimonials
            .approve_testimonial(TestimonialUuid::new())
            .await;

        assert!(
            matches!(result, Err(TestimonialsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_removes_the_testimonial() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .testimonials
            .submit_testimonial(submission("budi123", 5))
            .await?;

        ctx.testimonials.delete_testimonial(created.uuid).await?;

        let all = ctx.testimonials.list_testimonials(false).await?;

        assert!(all.is_empty());

        Ok(())
    }
}
