//! Core types for the clothes store.
//!
//! This module provides type-safe wrappers for the cart and wishlist domain.

pub mod id;
pub mod item;
pub mod price;
pub mod variant;

pub use id::*;
pub use item::{LineItem, MAX_PRICE, Product, ProductError, WishlistItem};
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use variant::{LineKey, Variant};
