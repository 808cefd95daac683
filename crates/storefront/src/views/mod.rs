//! View-models and rendering.
//!
//! Rendering is split in two. [`cart::CartView::build`] and
//! [`wishlist::WishlistView::build`] are pure functions from a snapshot to a
//! view-model; [`cart::render`] and [`wishlist::render`] write a view-model
//! into a [`Page`](crate::page::Page) through askama templates and the icon
//! pass. Both halves are idempotent.

use clothes_store_core::{CurrencyCode, Price};
use rust_decimal::Decimal;

use crate::config::{DeliveryPolicy, StoreConfig};

pub mod cart;
pub mod wishlist;

pub use cart::{CartRowView, CartSummary, CartSummaryView, CartView, DeliveryCharge};
pub use wishlist::{WishlistCardView, WishlistView};

/// Currency and delivery settings used to build views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pricing {
    pub currency: CurrencyCode,
    pub delivery: DeliveryPolicy,
}

impl Pricing {
    /// Format an amount in the display currency (e.g., "$19.99").
    #[must_use]
    pub fn money(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency).display()
    }
}

impl From<&StoreConfig> for Pricing {
    fn from(config: &StoreConfig) -> Self {
        Self {
            currency: config.currency,
            delivery: config.delivery,
        }
    }
}

/// Storefront link for a product.
fn product_url(id: &str) -> String {
    format!("/product/{id}")
}
