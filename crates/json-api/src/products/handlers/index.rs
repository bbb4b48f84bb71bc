//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk_app::domain::products::data::ProductFilter;

use crate::{extensions::*, products::handlers::get::ProductResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns purchasable products, newest first. Hidden products never appear
/// here; the admin listing includes them.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category: QueryParam<Uuid, false>,
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner().map(Into::into),
        search: q.into_inner(),
        include_unavailable: false,
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

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use kiosk_app::domain::{
        categories::records::CategoryUuid,
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_excludes_unavailable_products() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(|filter| !filter.include_unavailable)
            .return_once(|_| Ok(vec![]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert!(response.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .return_once(move |_| Ok(vec![make_product(uuid_a), make_product(uuid_b)]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.products[1].uuid, uuid_b.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_category_and_search_filters() -> TestResult {
        let category = CategoryUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .withf(move |filter| {
                filter.category == Some(category) && filter.search.as_deref() == Some("dragon")
            })
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get(format!(
            "http://example.com/products?category={category}&q=dragon"
        ))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
