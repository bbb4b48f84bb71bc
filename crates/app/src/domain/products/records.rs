//! Product Records

use jiff::Timestamp;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub image_url: Option<String>,
    pub category: Option<CategoryUuid>,
    pub stock: u32,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stock Level Record
///
/// The slice of a product the storefront needs to reconcile a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub uuid: ProductUuid,
    pub stock: u32,
    pub is_available: bool,
}
