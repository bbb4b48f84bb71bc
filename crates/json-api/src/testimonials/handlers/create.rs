//! Create Testimonial Handler
//!
//! Public submission endpoint; everything lands unapproved and invisible
//! until an admin publishes it.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kiosk_app::domain::testimonials::{data::NewTestimonial, records::TestimonialUuid};

use crate::{
    extensions::*,
    state::State,
    testimonials::{errors::into_status_error, handlers::index::TestimonialResponse},
};

/// Create Testimonial Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTestimonialRequest {
    pub username: String,
    pub rating: u8,
    pub item_bought: String,
    pub message: String,
}

impl CreateTestimonialRequest {
    fn into_new_testimonial(self, uuid: TestimonialUuid) -> NewTestimonial {
        NewTestimonial {
            uuid,
            username: self.username,
            rating: self.rating,
            item_bought: self.item_bought,
            message: self.message,
        }
    }
}

/// Create Testimonial Handler
#[endpoint(
    tags("testimonials"),
    summary = "Submit Testimonial",
    responses(
        (status_code = StatusCode::CREATED, description = "Testimonial submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateTestimonialRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TestimonialResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let testimonial = state
        .app
        .testimonials
        .submit_testimonial(json.into_inner().into_new_testimonial(TestimonialUuid::new()))
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(testimonial.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use kiosk_app::domain::testimonials::{MockTestimonialsService, TestimonialsServiceError};

    use crate::test_helpers::{make_testimonial, testimonials_service};

    use super::*;

    fn make_service(repo: MockTestimonialsService) -> Service {
        testimonials_service(repo, Router::with_path("testimonials").post(handler))
    }

    #[tokio::test]
    async fn test_submit_testimonial_returns_201_unapproved() -> TestResult {
        let mut repo = MockTestimonialsService::new();

        repo.expect_submit_testimonial()
            .once()
            .withf(|new| new.username == "rizky" && new.rating == 5)
            .returning(|new| Ok(make_testimonial(new.uuid, false)));

        let mut res = TestClient::post("http://example.com/testimonials")
            .json(&json!({
                "username": "rizky",
                "rating": 5,
                "item_bought": "Permanent Dragon",
                "message": "Fast delivery, trusted seller",
            }))
            .send(&make_service(repo))
            .await;

        let body: TestimonialResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(!body.approved);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_testimonial_invalid_rating_returns_400() -> TestResult {
        let mut repo = MockTestimonialsService::new();

        repo.expect_submit_testimonial()
            .once()
            .withf(|new| new.rating == 9)
            .return_once(|_| Err(TestimonialsServiceError::InvalidRating));

        let res = TestClient::post("http://example.com/testimonials")
            .json(&json!({
                "username": "rizky",
                "rating": 9,
                "item_bought": "Permanent Dragon",
                "message": "Fast delivery, trusted seller",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
