//! Admin Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::QueryParam,
    prelude::*,
};
use uuid::Uuid;

use kiosk_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::handlers::index::ProductsResponse,
    state::State,
};

/// Admin Product Index Handler
///
/// Returns every product, including ones hidden from the storefront.
#[endpoint(
    tags("admin", "products"),
    summary = "List Products (admin)",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: QueryParam<Uuid, false>,
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner().map(Into::into),
        search: q.into_inner(),
        include_unavailable: true,
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
