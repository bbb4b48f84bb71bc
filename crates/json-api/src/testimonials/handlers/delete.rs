//! Delete Testimonial Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, testimonials::errors::into_status_error};

/// Delete Testimonial Handler
#[endpoint(
    tags("admin", "testimonials"),
    summary = "Delete Testimonial",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Testimonial deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Testimonial not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    testimonial: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .testimonials
        .delete_testimonial(testimonial.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
