//! Delete Voucher Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, vouchers::errors::into_status_error};

/// Delete Voucher Handler
#[endpoint(
    tags("admin", "vouchers"),
    summary = "Delete Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Voucher deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Voucher not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    voucher: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .vouchers
        .delete_voucher(voucher.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
