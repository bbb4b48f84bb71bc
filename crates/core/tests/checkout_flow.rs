//! End-to-end storefront scenarios: cart, reconciliation, voucher
//! application and message composition working together.

use jiff::Timestamp;
use rust_decimal::Decimal;
use testresult::TestResult;

use kiosk::{
    cart::{Cart, CartLine},
    checkout::{CustomerInfo, Order, PaymentMethod, compose_message, whatsapp_url},
    discounts::payable_total,
    inventory::{InventoryRecord, InventorySnapshot},
    storage::MemoryStore,
    vouchers::{self, DiscountType, Voucher, VoucherError},
};

fn line(product_id: &str, name: &str, unit_price: u64, quantity: u32) -> CartLine {
    CartLine {
        product_id: product_id.to_string(),
        name: name.to_string(),
        unit_price,
        image_ref: format!("/images/{product_id}.png"),
        quantity,
    }
}

fn save20k() -> Voucher {
    Voucher {
        id: "v-save20k".to_string(),
        code: "SAVE20K".to_string(),
        name: "Hemat 20 ribu".to_string(),
        description: Some("Potongan tetap Rp 20.000".to_string()),
        discount_type: DiscountType::Fixed,
        discount_value: Decimal::from(20_000_u32),
        min_purchase: 50_000,
        max_discount: None,
        usage_limit: None,
        used_count: 0,
        is_active: true,
        valid_until: None,
    }
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        name: "Budi Santoso".to_string(),
        roblox_username: "budi123".to_string(),
        whatsapp: "081234567890".to_string(),
    }
}

#[test]
fn fixed_voucher_checkout_end_to_end() -> TestResult {
    let mut cart = Cart::load(MemoryStore::new())?;

    cart.add_item(line("p1", "Robux 800", 100_000, 1))?;

    let subtotal = cart.subtotal();
    assert_eq!(subtotal, 100_000);

    let applied = vouchers::apply(save20k(), subtotal, Timestamp::now())?;
    assert_eq!(applied.discount, 20_000);
    assert_eq!(payable_total(subtotal, applied.discount), 80_000);

    let customer = customer();
    let order = Order {
        store_name: "XPawto Store",
        lines: cart.lines(),
        customer: &customer,
        payment_method: PaymentMethod::Dana,
        subtotal,
        voucher: Some(&applied),
    };

    assert_eq!(order.total(), 80_000);

    let message = compose_message(&order);
    let url = whatsapp_url("6285128048534", &message);

    assert!(message.contains("*Total: Rp 80.000*"));
    assert!(url.starts_with("https://wa.me/6285128048534?text="));

    Ok(())
}

#[test]
fn fixed_voucher_rejects_subtotal_below_minimum() -> TestResult {
    let mut cart = Cart::load(MemoryStore::new())?;

    cart.add_item(line("p1", "Robux 400", 40_000, 1))?;

    let result = vouchers::apply(save20k(), cart.subtotal(), Timestamp::now());

    assert!(
        matches!(
            result,
            Err(vouchers::ApplyError::Ineligible(
                VoucherError::BelowMinimumPurchase(50_000)
            ))
        ),
        "expected BelowMinimumPurchase, got {result:?}"
    );

    Ok(())
}

#[test]
fn percentage_voucher_caps_at_max_discount() -> TestResult {
    let voucher = Voucher {
        code: "HEMAT10".to_string(),
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(10_u32),
        min_purchase: 0,
        max_discount: Some(15_000),
        ..save20k()
    };

    let applied = vouchers::apply(voucher, 200_000, Timestamp::now())?;

    assert_eq!(applied.discount, 15_000);
    assert_eq!(payable_total(200_000, applied.discount), 185_000);

    Ok(())
}

#[test]
fn exhausted_voucher_never_applies() {
    let voucher = Voucher {
        usage_limit: Some(5),
        used_count: 5,
        ..save20k()
    };

    let result = vouchers::apply(voucher, 1_000_000, Timestamp::now());

    assert!(
        matches!(
            result,
            Err(vouchers::ApplyError::Ineligible(
                VoucherError::UsageLimitReached
            ))
        ),
        "expected UsageLimitReached, got {result:?}"
    );
}

#[test]
fn stale_cart_is_reconciled_before_checkout() -> TestResult {
    let mut cart = Cart::load(MemoryStore::new())?;

    cart.add_item(line("p1", "Robux 800", 100_000, 10))?;
    cart.add_item(line("p2", "Gamepass", 25_000, 1))?;

    // Fresh inventory arrives: p1 has only 3 left, p2 was pulled from sale.
    let snapshot = InventorySnapshot::from_records([
        InventoryRecord {
            product_id: "p1".to_string(),
            stock_count: 3,
            is_available: true,
        },
        InventoryRecord {
            product_id: "p2".to_string(),
            stock_count: 4,
            is_available: false,
        },
    ]);

    let report = cart.reconcile(&snapshot)?;

    assert_eq!(report.clamped.len(), 1);
    assert_eq!(report.removed.len(), 1);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.subtotal(), 300_000);

    Ok(())
}
