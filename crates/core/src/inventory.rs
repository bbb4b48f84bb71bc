//! Inventory
//!
//! Read-only stock snapshots fetched on demand from the product store. A
//! snapshot is stale the moment it is taken; it informs advisory cart
//! reconciliation and the availability gate on product listings, but checkout
//! must always re-validate against fresh data.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Stock and availability for one product at the moment of the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Product identifier.
    pub product_id: String,

    /// Units currently in stock.
    pub stock_count: u32,

    /// Whether the product may be purchased at all. Records from stores
    /// without the availability column omit the field and default to `true`.
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// A point-in-time view over a set of inventory records, keyed by product id.
#[derive(Debug, Default)]
pub struct InventorySnapshot {
    records: FxHashMap<String, InventoryRecord>,
}

impl InventorySnapshot {
    /// Builds a snapshot from fetched records.
    pub fn from_records(records: impl IntoIterator<Item = InventoryRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.product_id.clone(), record))
                .collect(),
        }
    }

    /// Returns the record for `product_id`, if the snapshot covers it.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&InventoryRecord> {
        self.records.get(product_id)
    }

    /// Whether the product may be purchased. Products the snapshot does not
    /// cover default to available.
    #[must_use]
    pub fn is_available(&self, product_id: &str) -> bool {
        self.get(product_id).is_none_or(|record| record.is_available)
    }

    /// The largest purchasable quantity for the product, or `None` when the
    /// snapshot does not cover it.
    #[must_use]
    pub fn ceiling(&self, product_id: &str) -> Option<u32> {
        self.get(product_id).map(|record| record.stock_count)
    }

    /// Number of products the snapshot covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot covers no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
