//! Durable cart storage.
//!
//! Two layers:
//! - [`RecordStore`] - a raw key/value string store (in-memory or files on disk)
//! - [`CartStorage`] - the port the cart store talks to: `load` a cart, `save` a cart
//!
//! [`RecordCartStorage`] bridges the two through the record [`codec`]. Loading
//! never fails: a missing, unreadable, or malformed record hydrates as an
//! empty cart and is logged.

pub mod codec;
mod file;
mod memory;

use std::path::PathBuf;

use studio_core::Cart;
use thiserror::Error;
use tracing::{debug, warn};

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

/// Default key of the cart record.
pub const DEFAULT_CART_KEY: &str = "studio_cart";

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The record key cannot be used as a storage name.
    #[error("invalid storage key '{0}': use ASCII letters, digits, '_' or '-'")]
    InvalidKey(String),
}

/// Check that `key` is non-empty and only uses `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

/// Raw string storage keyed by record name.
pub trait RecordStore: Send + Sync {
    /// Read a record. `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a record, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a record. Deleting a missing record is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Port between the cart store and durable storage.
pub trait CartStorage: Send + Sync {
    /// Load the persisted cart, or an empty cart if none can be recovered.
    fn load(&self) -> Cart;

    /// Persist `cart`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be written.
    fn save(&self, cart: &Cart) -> Result<(), StorageError>;
}

/// [`CartStorage`] over a [`RecordStore`] under a single key.
#[derive(Debug, Clone)]
pub struct RecordCartStorage<R> {
    records: R,
    key: String,
}

impl<R: RecordStore> RecordCartStorage<R> {
    /// Store the cart under [`DEFAULT_CART_KEY`].
    #[must_use]
    pub fn new(records: R) -> Self {
        Self::with_key(records, DEFAULT_CART_KEY)
    }

    /// Store the cart under `key`.
    #[must_use]
    pub fn with_key(records: R, key: impl Into<String>) -> Self {
        Self {
            records,
            key: key.into(),
        }
    }

    /// Record key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying record store.
    pub const fn records(&self) -> &R {
        &self.records
    }

    /// Remove the stored record entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn evict(&self) -> Result<(), StorageError> {
        self.records.remove(&self.key)
    }
}

impl<R: RecordStore> CartStorage for RecordCartStorage<R> {
    fn load(&self) -> Cart {
        let record = match self.records.read(&self.key) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(key = %self.key, "No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart, starting empty");
                return Cart::new();
            }
        };

        match codec::decode(&record) {
            Ok(cart) => {
                debug!(key = %self.key, lines = cart.item_count(), "Hydrated stored cart");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding malformed stored cart");
                Cart::new()
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        self.records.write(&self.key, &codec::encode(cart))
    }
}

impl<T: CartStorage + ?Sized> CartStorage for std::sync::Arc<T> {
    fn load(&self) -> Cart {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        (**self).save(cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use studio_core::{CartAction, Catalog, ProductId, Size};

    use super::*;

    fn one_coat() -> Cart {
        let coat = Catalog::studio().get(ProductId::new(1)).unwrap().clone();
        Cart::new().reduce(&CartAction::Add {
            product: coat,
            size: Size::M,
        })
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("studio_cart").is_ok());
        assert!(validate_key("cart-2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a b").is_err());
    }

    #[test]
    fn test_missing_record_loads_empty() {
        let storage = RecordCartStorage::new(MemoryRecordStore::new());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = RecordCartStorage::new(MemoryRecordStore::new());
        let cart = one_coat();
        storage.save(&cart).unwrap();
        assert_eq!(storage.load(), cart);
        assert!(storage.records().read(DEFAULT_CART_KEY).unwrap().is_some());
    }

    #[test]
    fn test_malformed_record_loads_empty() {
        let records = MemoryRecordStore::new();
        records.write(DEFAULT_CART_KEY, "{definitely not a cart").unwrap();
        let storage = RecordCartStorage::new(records);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let storage = RecordCartStorage::with_key(MemoryRecordStore::new(), "guest_cart");
        storage.save(&one_coat()).unwrap();
        assert_eq!(storage.key(), "guest_cart");
        assert!(storage.records().read("guest_cart").unwrap().is_some());
        assert!(storage.records().read(DEFAULT_CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_evict() {
        let storage = RecordCartStorage::new(MemoryRecordStore::new());
        storage.save(&one_coat()).unwrap();
        storage.evict().unwrap();
        assert!(storage.load().is_empty());
        storage.evict().unwrap();
    }
}
