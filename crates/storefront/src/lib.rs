//! Clothes store storefront library.
//!
//! Client-side cart and wishlist for the storefront pages:
//!
//! - [`stores`] - cart and wishlist state persisted in a key-value store
//! - [`storage`] - key-value backends (JSON file, in-memory)
//! - [`views`] - view-models and templates for the cart and wishlist regions
//! - [`page`] - the element surface the views write to, plus the cart badge
//! - [`notify`] - transient toast messages
//! - [`interactions`] - wiring from page controls to store actions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod icons;
pub mod interactions;
pub mod notify;
pub mod page;
pub mod storage;
pub mod stores;
pub mod views;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use interactions::{Outcome, StorefrontPage, VariantSelection};
pub use page::{MemoryPage, Page};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use stores::{CartStore, WishlistStore};
