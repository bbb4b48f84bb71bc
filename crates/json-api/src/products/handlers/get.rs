//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk_app::domain::products::records::Product;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Product name
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Price in whole rupiah
    pub price: u64,

    /// Image URL, if one was uploaded
    pub image_url: Option<String>,

    /// Category the product belongs to
    pub category: Option<Uuid>,

    /// Units currently in stock
    pub stock: u32,

    /// Whether the product is purchasable on the storefront
    pub is_available: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category: product.category.map(Into::into),
            stock: product.stock,
            is_available: product.is_available,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
