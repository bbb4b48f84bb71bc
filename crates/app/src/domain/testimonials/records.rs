//! Testimonial Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Testimonial UUID
pub type TestimonialUuid = TypedUuid<Testimonial>;

/// Testimonial Record
///
/// Shopper-submitted reviews; only approved ones reach the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub uuid: TestimonialUuid,
    pub username: String,
    pub rating: u8,
    pub item_bought: String,
    pub message: String,
    pub approved: bool,
    pub created_at: Timestamp,
}
