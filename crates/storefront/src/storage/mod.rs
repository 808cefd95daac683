//! Local key/value persistence.
//!
//! The stores never hold data in memory between operations. Each read goes
//! back to a [`KeyValueStore`], which mirrors the browser's `localStorage`:
//! string keys, string values, and no structure beyond that.
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map, for tests and throwaway sessions
//! - [`JsonFileStore`] - One JSON object on disk, shared by every key

use thiserror::Error;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage keys for persisted snapshots.
pub mod keys {
    /// Key for the cart snapshot (JSON array of line items).
    pub const CART: &str = "clothes_store_cart";

    /// Key for the wishlist snapshot (JSON array of wishlist items).
    pub const WISHLIST: &str = "clothes_store_wishlist";
}

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key/value area with `localStorage` semantics.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read at all.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
