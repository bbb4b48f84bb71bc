//! Cart
//!
//! The authoritative line-item list for one browsing session. The cart is an
//! explicit store object with an injected storage handle; it persists itself
//! as JSON under the `"cart"` key on every successful mutation and notifies
//! registered change listeners afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    inventory::InventorySnapshot,
    storage::{KeyValueStore, StorageError},
};

/// Storage key the cart persists under.
pub const CART_KEY: &str = "cart";

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart could not be persisted or reloaded.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One line in the cart, unique by `product_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier.
    pub product_id: String,

    /// Display name captured at add time.
    pub name: String,

    /// Unit price in whole rupiah.
    pub unit_price: u64,

    /// Product image reference captured at add time.
    pub image_ref: String,

    /// Requested quantity; always at least one while the line exists.
    pub quantity: u32,
}

impl CartLine {
    /// The line total, `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// A line the last reconciliation clamped down to the available stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClampedLine {
    /// Product identifier.
    pub product_id: String,

    /// Display name, for the user-visible notice.
    pub name: String,

    /// Quantity before clamping.
    pub requested: u32,

    /// Quantity after clamping.
    pub available: u32,
}

/// Outcome of reconciling the cart against an inventory snapshot.
///
/// Removed lines carry a user-visible consequence (the item silently leaving
/// the cart would be worse than the notice), so they are returned whole.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Lines whose quantity was reduced to the stock ceiling.
    pub clamped: Vec<ClampedLine>,

    /// Lines removed because the product is unavailable or out of stock.
    pub removed: Vec<CartLine>,
}

impl ReconciliationReport {
    /// Whether reconciliation changed nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.clamped.is_empty() && self.removed.is_empty()
    }
}

type Listener = Box<dyn Fn(&[CartLine]) + Send + Sync>;

/// The session cart.
pub struct Cart<S: KeyValueStore> {
    lines: Vec<CartLine>,
    store: S,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> fmt::Debug for Cart<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Cart<S> {
    /// Loads the persisted cart from `store`, starting empty when nothing was
    /// persisted yet.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` when the store cannot be read or holds a payload
    /// that is not a cart.
    pub fn load(store: S) -> Result<Self, CartError> {
        let lines = match store.get(CART_KEY)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| StorageError::Deserialize {
                    key: CART_KEY.to_string(),
                    source,
                })?
            }
            None => Vec::new(),
        };

        Ok(Self {
            lines,
            store,
            listeners: Vec::new(),
        })
    }

    /// Registers a change listener invoked after every successful mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&[CartLine]) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals, in whole rupiah.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.line_total()))
    }

    /// Adds `line` to the cart. A line for the same product merges by
    /// incrementing the existing quantity; the original name, price and image
    /// are kept. Stock checks are the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` when persisting the cart fails.
    pub fn add_item(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Ok(());
        }

        match self
            .lines
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.lines.push(line),
        }

        self.commit()
    }

    /// Sets the quantity for `product_id`. A quantity of zero removes the
    /// line; unknown products are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` when persisting the cart fails.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        else {
            return Ok(());
        };

        line.quantity = quantity;

        self.commit()
    }

    /// Removes the line for `product_id` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` when persisting the cart fails.
    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_id != product_id);

        if self.lines.len() == before {
            return Ok(());
        }

        self.commit()
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` when persisting the cart fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        if self.lines.is_empty() {
            return Ok(());
        }

        self.lines.clear();

        self.commit()
    }

    /// Reconciles the cart against an inventory snapshot: each covered line is
    /// clamped to `min(quantity, stock)`, and lines that are unavailable or
    /// clamped to zero are removed. Products the snapshot does not cover are
    /// left untouched.
    ///
    /// Reconciliation is advisory; checkout must re-validate against fresh
    /// inventory rather than trust a previously reconciled cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` when persisting the cart fails.
    pub fn reconcile(
        &mut self,
        snapshot: &InventorySnapshot,
    ) -> Result<ReconciliationReport, CartError> {
        let mut report = ReconciliationReport::default();
        let mut kept = Vec::with_capacity(self.lines.len());

        for mut line in self.lines.drain(..) {
            let Some(record) = snapshot.get(&line.product_id) else {
                kept.push(line);
                continue;
            };

            if !record.is_available || record.stock_count == 0 {
                report.removed.push(line);
                continue;
            }

            if line.quantity > record.stock_count {
                report.clamped.push(ClampedLine {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    requested: line.quantity,
                    available: record.stock_count,
                });

                line.quantity = record.stock_count;
            }

            kept.push(line);
        }

        self.lines = kept;

        if !report.is_clean() {
            self.commit()?;
        }

        Ok(report)
    }

    fn commit(&mut self) -> Result<(), CartError> {
        let raw = serde_json::to_string(&self.lines).map_err(|source| StorageError::Serialize {
            key: CART_KEY.to_string(),
            source,
        })?;

        self.store.set(CART_KEY, &raw)?;

        for listener in &self.listeners {
            listener(&self.lines);
        }

        Ok(())
    }
}
