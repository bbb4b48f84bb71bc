//! Storefront Domain Concerns

pub mod categories;
pub mod checkout;
pub mod products;
pub mod testimonials;
pub mod vouchers;
