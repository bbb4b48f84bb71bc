//! Checkout
//!
//! Composition of the outbound order message. Checkout is a handoff, not a
//! committed order record: the cart, customer details and any applied voucher
//! are rendered into a WhatsApp deep link the shopper opens to finish the
//! purchase over chat.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    cart::CartLine,
    discounts::payable_total,
    prices::format_rupiah,
    vouchers::AppliedVoucher,
};

/// Customer details collected by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,

    /// Roblox account the purchase is for.
    pub roblox_username: String,

    /// WhatsApp number the customer can be reached on.
    pub whatsapp: String,
}

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Dana e-wallet.
    Dana,

    /// Gopay e-wallet.
    Gopay,

    /// Shopee Pay e-wallet.
    ShopeePay,

    /// Sea Bank transfer.
    SeaBank,

    /// QRIS code payment.
    Qris,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Dana => "Dana",
            PaymentMethod::Gopay => "Gopay",
            PaymentMethod::ShopeePay => "Shopee Pay",
            PaymentMethod::SeaBank => "Sea Bank",
            PaymentMethod::Qris => "QRIS",
        };

        f.write_str(label)
    }
}

/// Everything the composer needs to render one order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    /// Store name shown in the message header.
    pub store_name: &'a str,

    /// Cart lines being ordered.
    pub lines: &'a [CartLine],

    /// Customer details.
    pub customer: &'a CustomerInfo,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Order subtotal before discounting.
    pub subtotal: u64,

    /// Voucher applied to this checkout session, if any.
    pub voucher: Option<&'a AppliedVoucher>,
}

impl Order<'_> {
    /// The payable total after any voucher discount.
    #[must_use]
    pub fn total(&self) -> u64 {
        let discount = self.voucher.map_or(0, |applied| applied.discount);

        payable_total(self.subtotal, discount)
    }
}

/// Renders the order summary message sent to the store's WhatsApp.
#[must_use]
pub fn compose_message(order: &Order<'_>) -> String {
    let mut message = format!("\u{1f6d2} *New Order - {}*\n\n", order.store_name);

    message.push_str("\u{1f464} *Customer Info:*\n");
    message.push_str(&format!("Name: {}\n", order.customer.name));
    message.push_str(&format!(
        "Roblox Username: {}\n",
        order.customer.roblox_username
    ));
    message.push_str(&format!("WhatsApp: {}\n\n", order.customer.whatsapp));

    message.push_str("\u{1f4e6} *Order Details:*\n");

    for line in order.lines {
        message.push_str(&format!(
            "{} x{} - {}\n",
            line.name,
            line.quantity,
            format_rupiah(line.line_total())
        ));
    }

    if let Some(applied) = order.voucher {
        message.push_str(&format!(
            "\n\u{1f39f}\u{fe0f} *Voucher: {} (-{})*",
            applied.voucher.code,
            format_rupiah(applied.discount)
        ));
    }

    message.push_str(&format!(
        "\n\u{1f4b0} *Total: {}*\n",
        format_rupiah(order.total())
    ));
    message.push_str(&format!(
        "\u{1f4b3} *Payment Method: {}*\n\n",
        order.payment_method
    ));
    message.push_str("Please confirm this order and provide payment instructions.");

    message
}

/// Builds the `wa.me` deep link carrying `message`, URL-encoding the body so
/// customer-supplied text cannot break out of the query string.
#[must_use]
pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::vouchers::{DiscountType, Voucher};

    use super::*;

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine {
                product_id: "p1".to_string(),
                name: "Robux 800".to_string(),
                unit_price: 100_000,
                image_ref: "/images/robux-800.png".to_string(),
                quantity: 1,
            },
            CartLine {
                product_id: "p2".to_string(),
                name: "Gamepass Blox Fruits".to_string(),
                unit_price: 25_000,
                image_ref: "/images/gamepass.png".to_string(),
                quantity: 2,
            },
        ]
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Budi Santoso".to_string(),
            roblox_username: "budi123".to_string(),
            whatsapp: "081234567890".to_string(),
        }
    }

    fn applied_voucher() -> AppliedVoucher {
        AppliedVoucher {
            voucher: Voucher {
                id: "v-1".to_string(),
                code: "SAVE20K".to_string(),
                name: "Hemat 20 ribu".to_string(),
                description: None,
                discount_type: DiscountType::Fixed,
                discount_value: Decimal::from(20_000_u32),
                min_purchase: 50_000,
                max_discount: None,
                usage_limit: None,
                used_count: 0,
                is_active: true,
                valid_until: None,
            },
            discount: 20_000,
        }
    }

    #[test]
    fn message_lists_every_line_with_totals() {
        let lines = lines();
        let customer = customer();

        let order = Order {
            store_name: "XPawto Store",
            lines: &lines,
            customer: &customer,
            payment_method: PaymentMethod::Dana,
            subtotal: 150_000,
            voucher: None,
        };

        let message = compose_message(&order);

        assert!(message.contains("*New Order - XPawto Store*"));
        assert!(message.contains("Name: Budi Santoso"));
        assert!(message.contains("Roblox Username: budi123"));
        assert!(message.contains("Robux 800 x1 - Rp 100.000"));
        assert!(message.contains("Gamepass Blox Fruits x2 - Rp 50.000"));
        assert!(message.contains("*Total: Rp 150.000*"));
        assert!(message.contains("*Payment Method: Dana*"));
        assert!(!message.contains("Voucher:"));
    }

    #[test]
    fn message_includes_voucher_line_and_discounted_total() {
        let lines = lines();
        let customer = customer();
        let applied = applied_voucher();

        let order = Order {
            store_name: "XPawto Store",
            lines: &lines,
            customer: &customer,
            payment_method: PaymentMethod::Qris,
            subtotal: 150_000,
            voucher: Some(&applied),
        };

        let message = compose_message(&order);

        assert!(message.contains("*Voucher: SAVE20K (-Rp 20.000)*"));
        assert!(message.contains("*Total: Rp 130.000*"));
        assert!(message.contains("*Payment Method: QRIS*"));
    }

    #[test]
    fn total_never_goes_below_zero() {
        let lines = lines();
        let customer = customer();

        let mut applied = applied_voucher();
        applied.discount = 999_999;

        let order = Order {
            store_name: "XPawto Store",
            lines: &lines,
            customer: &customer,
            payment_method: PaymentMethod::Gopay,
            subtotal: 150_000,
            voucher: Some(&applied),
        };

        assert_eq!(order.total(), 0);
    }

    #[test]
    fn whatsapp_url_percent_encodes_the_message() {
        let url = whatsapp_url("6285128048534", "order & details\nline two");

        assert!(url.starts_with("https://wa.me/6285128048534?text="));
        assert!(url.contains("%26"), "ampersand must be encoded");
        assert!(url.contains("%0A"), "newline must be encoded");
        assert!(!url.contains('\n'));
    }

    #[test]
    fn payment_method_labels_match_the_storefront() {
        assert_eq!(PaymentMethod::ShopeePay.to_string(), "Shopee Pay");
        assert_eq!(PaymentMethod::SeaBank.to_string(), "Sea Bank");
        assert_eq!(PaymentMethod::Dana.to_string(), "Dana");
    }
}
