//! Stored Lists
//!
//! Small persisted product-id lists the storefront keeps alongside the cart:
//! wishlist, compare list and recently-viewed. Most-recent-first, duplicates
//! collapse to the front, and each list keeps at most its configured cap.

use crate::storage::{KeyValueStore, StorageError};

/// Conventional storage keys for the storefront lists.
pub mod keys {
    /// Wishlist storage key.
    pub const WISHLIST: &str = "wishlist";

    /// Compare-list storage key.
    pub const COMPARE_LIST: &str = "compareList";

    /// Recently-viewed storage key.
    pub const RECENTLY_VIEWED: &str = "recentlyViewed";
}

/// A persisted, capped, de-duplicating list of product ids.
#[derive(Debug)]
pub struct StoredList<S: KeyValueStore> {
    key: &'static str,
    cap: usize,
    ids: Vec<String>,
    store: S,
}

impl<S: KeyValueStore> StoredList<S> {
    /// Loads the list persisted under `key`, starting empty when nothing was
    /// persisted yet.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the store cannot be read or holds a
    /// payload that is not a string list.
    pub fn load(store: S, key: &'static str, cap: usize) -> Result<Self, StorageError> {
        let ids = match store.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Deserialize {
                key: key.to_string(),
                source,
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            key,
            cap,
            ids,
            store,
        })
    }

    /// Current ids, most recent first.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Whether `product_id` is in the list.
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    /// Moves `product_id` to the front, inserting it if absent and dropping
    /// the oldest entry when the cap is exceeded.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when persisting fails.
    pub fn touch(&mut self, product_id: &str) -> Result<(), StorageError> {
        self.ids.retain(|id| id != product_id);
        self.ids.insert(0, product_id.to_string());
        self.ids.truncate(self.cap);

        self.commit()
    }

    /// Removes `product_id` from the list; absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when persisting fails.
    pub fn remove(&mut self, product_id: &str) -> Result<(), StorageError> {
        let before = self.ids.len();

        self.ids.retain(|id| id != product_id);

        if self.ids.len() == before {
            return Ok(());
        }

        self.commit()
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.ids).map_err(|source| StorageError::Serialize {
            key: self.key.to_string(),
            source,
        })?;

        self.store.set(self.key, &raw)
    }
}
