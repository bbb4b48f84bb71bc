//! Admin Testimonial Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    testimonials::handlers::index::TestimonialsResponse,
};

/// Admin Testimonial Index Handler
///
/// Returns every testimonial, approved or not, so pending submissions can be
/// moderated.
#[endpoint(
    tags("admin", "testimonials"),
    summary = "List Testimonials (admin)",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TestimonialsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let testimonials = state
        .app
        .testimonials
        .list_testimonials(false)
        .await
        .or_500("failed to fetch testimonials")?;

    Ok(Json(TestimonialsResponse {
        testimonials: testimonials.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use kiosk_app::domain::testimonials::{
        MockTestimonialsService, records::TestimonialUuid,
    };

    use crate::test_helpers::{make_testimonial, testimonials_service};

    use super::*;

    fn make_service(repo: MockTestimonialsService) -> Service {
        testimonials_service(repo, Router::with_path("admin/testimonials").get(handler))
    }

    #[tokio::test]
    async fn test_admin_index_includes_pending_testimonials() -> TestResult {
        let uuid = TestimonialUuid::new();

        let mut repo = MockTestimonialsService::new();

        repo.expect_list_testimonials()
            .once()
            .withf(|approved_only| !approved_only)
            .return_once(move |_| Ok(vec![make_testimonial(uuid, false)]));

        let response: TestimonialsResponse = TestClient::get("http://example.com/admin/testimonials")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.testimonials.len(), 1);
        assert!(!response.testimonials[0].approved);

        Ok(())
    }
}
