//! Testimonial Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk_app::domain::testimonials::records::Testimonial;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TestimonialResponse {
    /// The unique identifier of the testimonial
    pub uuid: Uuid,

    /// Shopper username
    pub username: String,

    /// Star rating, 1 to 5
    pub rating: u8,

    /// The item the shopper bought
    pub item_bought: String,

    /// The review text
    pub message: String,

    /// Whether the testimonial has been approved for the storefront
    pub approved: bool,

    /// The date and time the testimonial was submitted
    pub created_at: String,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(testimonial: Testimonial) -> Self {
        TestimonialResponse {
            uuid: testimonial.uuid.into(),
            username: testimonial.username,
            rating: testimonial.rating,
            item_bought: testimonial.item_bought,
            message: testimonial.message,
            approved: testimonial.approved,
            created_at: testimonial.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TestimonialsResponse {
    /// The list of testimonials, newest first
    pub testimonials: Vec<TestimonialResponse>,
}

/// Testimonial Index Handler
///
/// Returns approved testimonials only; pending submissions stay out of
/// public view until moderated.
#[endpoint(tags("testimonials"), summary = "List Testimonials")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TestimonialsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let testimonials = state
        .app
        .testimonials
        .list_testimonials(true)
        .await
        .or_500("failed to fetch testimonials")?;

    Ok(Json(TestimonialsResponse {
        testimonials: testimonials.into_iter().map(Into::into).collect(),
    }))
}
