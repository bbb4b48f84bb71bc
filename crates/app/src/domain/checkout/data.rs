//! Checkout Data

use kiosk::checkout::{CustomerInfo, PaymentMethod};
use serde::Serialize;

use crate::domain::products::records::ProductUuid;

/// One requested order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product: ProductUuid,
    pub quantity: u32,
}

/// Everything a checkout needs: the requested lines, who is buying, how they
/// pay and an optional voucher code.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub lines: Vec<OrderLine>,
    pub customer: CustomerInfo,
    pub payment_method: PaymentMethod,
    pub voucher_code: Option<String>,
}

/// The completed handoff: the rendered order message and the `wa.me` link
/// the shopper opens, plus the totals shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub message: String,
    pub whatsapp_url: String,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
    pub voucher_code: Option<String>,
}
