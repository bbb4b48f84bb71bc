//! Kiosk
//!
//! Kiosk is the business-rule core of a small storefront: cart management,
//! inventory reconciliation, voucher validation and discounting, and
//! checkout message composition for the WhatsApp order handoff.

pub mod cart;
pub mod checkout;
pub mod discounts;
pub mod inventory;
pub mod lists;
pub mod prices;
pub mod storage;
pub mod vouchers;
