//! Products Data

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub image_url: Option<String>,
    pub category: Option<CategoryUuid>,
    pub stock: u32,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub image_url: Option<String>,
    pub category: Option<CategoryUuid>,
    pub stock: u32,
}

/// Product Listing Filter
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductFilter {
    /// Restrict to one category.
    pub category: Option<CategoryUuid>,

    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,

    /// Include products hidden from the storefront; admin listings set this.
    pub include_unavailable: bool,
}
