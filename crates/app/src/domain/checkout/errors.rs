//! Checkout service errors.

use thiserror::Error;

use crate::domain::{
    products::{ProductsServiceError, records::ProductUuid},
    vouchers::VouchersServiceError,
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid quantity for product {product}")]
    InvalidQuantity { product: ProductUuid },

    /// The cart references a product that no longer exists.
    #[error("product {product} no longer exists")]
    UnknownProduct { product: ProductUuid },

    /// The product was pulled from sale since the cart was filled.
    #[error("{name} is no longer available")]
    ItemUnavailable { name: String },

    /// Requested more than the live stock count.
    #[error("only {available} of {name} left in stock")]
    StockInsufficient { name: String, available: u32 },

    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Vouchers(#[from] VouchersServiceError),
}
