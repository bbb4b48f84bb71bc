//! Testimonials Data

use crate::domain::testimonials::records::TestimonialUuid;

/// New Testimonial Data
///
/// Submissions always start unapproved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTestimonial {
    pub uuid: TestimonialUuid,
    pub username: String,
    pub rating: u8,
    pub item_bought: String,
    pub message: String,
}
