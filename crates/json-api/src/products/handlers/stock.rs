//! Product Stock Handler
//!
//! Serves the stock snapshot carts reconcile against. The response mirrors
//! the inventory records checkout re-validates with, so the storefront and
//! the server agree on shape.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiosk::inventory::InventoryRecord;
use kiosk_app::domain::products::records::ProductUuid;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockItemResponse {
    /// Product identifier
    pub product_id: String,

    /// Units currently in stock
    pub stock_count: u32,

    /// Whether the product is purchasable at all
    pub is_available: bool,
}

impl From<InventoryRecord> for StockItemResponse {
    fn from(record: InventoryRecord) -> Self {
        StockItemResponse {
            product_id: record.product_id,
            stock_count: record.stock_count,
            is_available: record.is_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockResponse {
    /// One entry per requested product that still exists
    pub items: Vec<StockItemResponse>,
}

fn parse_ids(ids: &str) -> Result<Vec<ProductUuid>, StatusError> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            Uuid::parse_str(id)
                .map(Into::into)
                .map_err(|_error| StatusError::bad_request().brief("Invalid product id"))
        })
        .collect()
}

/// Product Stock Handler
///
/// Returns current stock levels for a comma-separated list of product ids.
/// Unknown ids are silently absent from the response.
#[endpoint(tags("products"), summary = "Stock Levels")]
pub(crate) async fn handler(
    ids: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<StockResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let products = parse_ids(&ids.into_inner())?;

    let levels = state
        .app
        .products
        .stock_levels(products)
        .await
        .or_500("failed to fetch stock levels")?;

    Ok(Json(StockResponse {
        items: levels.into_iter().map(Into::into).collect(),
    }))
}
