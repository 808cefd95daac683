//! Clothes Store Core - Shared cart and wishlist types.
//!
//! This crate provides the domain types used across all clothes store components:
//! - `storefront` - Stores, storage backends, view-models and the page adapter
//! - `cli` - Command-line access to a persisted cart and wishlist
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. Validation of loosely-typed input (product card attributes,
//! variant selection) happens here so every other crate works with checked
//! values.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, variants, line items and wishlist items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
