//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
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

impl CreateProductRequest {
    fn into_new_product(self, uuid: ProductUuid) -> NewProduct {
        NewProduct {
            uuid,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category: self.category.map(Into::into),
            stock: self.stock,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("admin", "products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().into_new_product(ProductUuid::new()))
        .await
        .map_err(into_status_error)?;

    let uuid = product.uuid;

    res.add_header(LOCATION, format!("/products/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use kiosk_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("admin/products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_returns_201_with_location() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| new.name == "Permanent Dragon" && new.price == 150_000 && new.stock == 5)
            .returning(|new| {
                let mut product = make_product(new.uuid);

                product.name = new.name;

                Ok(product)
            });

        let mut res = TestClient::post("http://example.com/admin/products")
            .json(&json!({ "name": "Permanent Dragon", "price": 150_000, "stock": 5 }))
            .send(&make_service(repo))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{}", body.uuid).as_str()));
        assert_eq!(body.name, "Permanent Dragon");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unknown_category_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "name": "Permanent Dragon",
                "price": 150_000,
                "stock": 5,
                "category": Uuid::now_v7(),
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_duplicate_name_returns_409() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({ "name": "Permanent Dragon", "price": 150_000, "stock": 5 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
