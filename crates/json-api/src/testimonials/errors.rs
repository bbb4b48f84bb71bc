//! Testimonial Errors

use salvo::http::StatusError;
use tracing::error;

use kiosk_app::domain::testimonials::TestimonialsServiceError;

pub(crate) fn into_status_error(error: TestimonialsServiceError) -> StatusError {
    match error {
        TestimonialsServiceError::InvalidRating => {
            StatusError::bad_request().brief("Rating must be between 1 and 5")
        }
        TestimonialsServiceError::MissingRequiredData | TestimonialsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid testimonial payload")
        }
        TestimonialsServiceError::Sql(source) => {
            error!("testimonial storage error: {source}");

            StatusError::internal_server_error()
        }
        TestimonialsServiceError::NotFound => {
            StatusError::not_found().brief("Testimonial not found")
        }
    }
}
