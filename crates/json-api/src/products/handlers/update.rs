//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::get::ProductResponse},
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<Uuid>,
    pub stock: u32,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            image_url: request.image_url,
            category: request.category.map(Into::into),
            stock: request.stock,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("admin", "products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .update_product(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product.uuid, "updated product");

    Ok(Json(product.into()))
}
