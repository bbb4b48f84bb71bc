//! Checkout service.
//!
//! Orchestrates a checkout against live data: re-validates the requested
//! lines against current stock, applies any voucher, renders the WhatsApp
//! handoff, and only then consumes a voucher redemption. Composing the link
//! is pure; recording usage is the one irreversible step, so it runs last.

use std::sync::Arc;

use async_trait::async_trait;
use kiosk::{
    cart::CartLine,
    checkout::{Order, compose_message, whatsapp_url},
};
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::domain::{
    checkout::{
        data::{CheckoutRequest, CheckoutSummary},
        errors::CheckoutServiceError,
    },
    products::{ProductsService, records::Product},
    vouchers::VouchersService,
};

/// Storefront identity rendered into every order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Name shown in the message header.
    pub store_name: String,

    /// Number the `wa.me` link points at.
    pub whatsapp_number: String,
}

pub struct StorefrontCheckoutService {
    products: Arc<dyn ProductsService>,
    vouchers: Arc<dyn VouchersService>,
    settings: StoreSettings,
}

impl StorefrontCheckoutService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        vouchers: Arc<dyn VouchersService>,
        settings: StoreSettings,
    ) -> Self {
        Self {
            products,
            vouchers,
            settings,
        }
    }
}

impl std::fmt::Debug for StorefrontCheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontCheckoutService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CheckoutService for StorefrontCheckoutService {
    async fn checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSummary, CheckoutServiceError> {
        if request.lines.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        if let Some(line) = request.lines.iter().find(|line| line.quantity == 0) {
            return Err(CheckoutServiceError::InvalidQuantity {
                product: line.product,
            });
        }

        let uuids = request.lines.iter().map(|line| line.product).collect();
        let products = self.products.get_products(uuids).await?;

        let by_uuid: FxHashMap<_, _> = products
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let mut cart_lines = Vec::with_capacity(request.lines.len());

        for line in &request.lines {
            let Some(product) = by_uuid.get(&line.product) else {
                return Err(CheckoutServiceError::UnknownProduct {
                    product: line.product,
                });
            };

            if !product.is_available {
                return Err(CheckoutServiceError::ItemUnavailable {
                    name: product.name.clone(),
                });
            }

            if line.quantity > product.stock {
                return Err(CheckoutServiceError::StockInsufficient {
                    name: product.name.clone(),
                    available: product.stock,
                });
            }

            cart_lines.push(into_cart_line(product, line.quantity));
        }

        let subtotal = cart_lines
            .iter()
            .fold(0_u64, |acc, line| acc.saturating_add(line.line_total()));

        let validated = match &request.voucher_code {
            Some(code) => Some(self.vouchers.validate(code, subtotal).await?),
            None => None,
        };

        let order = Order {
            store_name: &self.settings.store_name,
            lines: &cart_lines,
            customer: &request.customer,
            payment_method: request.payment_method,
            subtotal,
            voucher: validated.as_ref().map(|v| &v.applied),
        };

        let total = order.total();
        let message = compose_message(&order);
        let whatsapp_url = whatsapp_url(&self.settings.whatsapp_number, &message);

        // The handoff is final from here on; consume the redemption now.
        if let Some(validated) = &validated {
            let used_count = self.vouchers.record_usage(validated.uuid).await?;

            tracing::info!(
                voucher = %validated.applied.voucher.code,
                used_count,
                "voucher redemption recorded"
            );
        }

        let (discount, voucher_code) = match validated {
            Some(validated) => (
                validated.applied.discount,
                Some(validated.applied.voucher.code),
            ),
            None => (0, None),
        };

        Ok(CheckoutSummary {
            message,
            whatsapp_url,
            subtotal,
            discount,
            total,
            voucher_code,
        })
    }
}

fn into_cart_line(product: &Product, quantity: u32) -> CartLine {
    CartLine {
        product_id: product.uuid.to_string(),
        name: product.name.clone(),
        unit_price: product.price,
        image_ref: product.image_url.clone().unwrap_or_default(),
        quantity,
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Runs one checkout end to end and returns the WhatsApp handoff.
    async fn checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSummary, CheckoutServiceError>;
}
