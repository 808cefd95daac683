//! Integration tests for the clothes store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clothes-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart actions through the page, persisted to a file
//! - `wishlist_flow` - Wishlist actions through the page, persisted to a file
//! - `storage_file` - Reading snapshots written by other clients

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::rc::Rc;

use clothes_store_core::Product;
use clothes_store_storefront::{JsonFileStore, MemoryPage, StoreConfig, StorefrontPage};
use tempfile::TempDir;

/// A storage file in a scratch directory, removed on drop.
pub struct TestContext {
    _dir: TempDir,
    pub config: StoreConfig,
}

impl TestContext {
    /// Create a context with default pricing and an unused storage path.
    ///
    /// # Panics
    ///
    /// Panics if the scratch directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StoreConfig {
            storage_path: dir.path().join("store").join("local_storage.json"),
            ..StoreConfig::default()
        };
        Self { _dir: dir, config }
    }

    #[must_use]
    pub fn storage_path(&self) -> &Path {
        &self.config.storage_path
    }

    /// Open a fresh page over the storage file. Each call is a new "page load".
    #[must_use]
    pub fn open_page(&self, elements: &[&str]) -> StorefrontPage<MemoryPage> {
        let storage = Rc::new(JsonFileStore::new(self.config.storage_path.clone()));
        StorefrontPage::new(MemoryPage::with_elements(elements), storage, &self.config)
    }

    /// Write raw storage file contents, as another client would.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, contents: &str) {
        let path = self.storage_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create storage dir");
        }
        std::fs::write(path, contents).expect("Failed to write storage file");
    }

    /// Read raw storage file contents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(self.storage_path()).expect("Failed to read storage file")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a product from card-style string fields.
///
/// # Panics
///
/// Panics if the fields do not form a valid product.
#[must_use]
pub fn product(id: &str, name: &str, price: &str) -> Product {
    Product::parse(id, name, price, &format!("/static/img/{id}.jpg")).expect("Invalid test product")
}
