//! Products, cart line items and wishlist items.
//!
//! The JSON shape of [`LineItem`] and [`WishlistItem`] is the persisted
//! snapshot format: prices are plain JSON numbers, optional variant fields
//! are omitted when unset, and an empty `size`/`color` reads as unset.

use std::num::NonZeroU32;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::variant::{LineKey, Variant, empty_as_none};

/// Errors raised when product input from the page is invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product id attribute is missing or blank.
    #[error("product id cannot be empty")]
    EmptyId,
    /// The product name attribute is missing or blank.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The price attribute is not a number.
    #[error("invalid product price: {0}")]
    InvalidPrice(String),
    /// The price is below zero.
    #[error("product price cannot be negative")]
    NegativePrice,
    /// The price is above [`MAX_PRICE`].
    #[error("product price cannot exceed 1000000000000")]
    PriceTooLarge,
}

/// Highest accepted unit price (1e12).
///
/// Keeps `price * qty` and cart sums far inside `Decimal` range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Check that `price` is within `0..=MAX_PRICE`.
fn check_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::NegativePrice);
    }
    if price > MAX_PRICE {
        return Err(ProductError::PriceTooLarge);
    }
    Ok(price)
}

/// Deserialize a price, rejecting values outside `0..=MAX_PRICE`.
fn bounded_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let price = <Decimal as Deserialize>::deserialize(deserializer)?;
    check_price(price).map_err(serde::de::Error::custom)
}

/// A product as presented on a product card or product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "bounded_price"
    )]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Create a validated product.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or name is blank, or the price is negative
    /// or above [`MAX_PRICE`].
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Result<Self, ProductError> {
        let id = id.into();
        let name = name.into();

        if id.trim().is_empty() {
            return Err(ProductError::EmptyId);
        }
        if name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        let price = check_price(price)?;

        Ok(Self {
            id: ProductId::new(id),
            name,
            price,
            image: image.into(),
        })
    }

    /// Create a product from raw attribute strings, parsing the price.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is not a decimal number, or if
    /// [`Product::new`] rejects the values.
    pub fn parse(id: &str, name: &str, price: &str, image: &str) -> Result<Self, ProductError> {
        let price = Decimal::from_str(price.trim())
            .or_else(|_| Decimal::from_scientific(price.trim()))
            .map_err(|_| ProductError::InvalidPrice(price.to_owned()))?;
        Self::new(id, name, price, image)
    }
}

/// One entry in the cart, unique per product id and variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "bounded_price"
    )]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub size: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub color: Option<String>,
    pub qty: NonZeroU32,
}

impl LineItem {
    /// A new line for `product` in `variant` with quantity 1.
    #[must_use]
    pub fn new(product: &Product, variant: Variant) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            size: variant.size,
            color: variant.color,
            qty: NonZeroU32::MIN,
        }
    }

    /// The chosen variant of this line.
    #[must_use]
    pub fn variant(&self) -> Variant {
        Variant {
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.id.clone(), self.variant())
    }

    /// Returns true if this line is identified by `key`.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id && self.size == key.variant.size && self.color == key.variant.color
    }

    /// Quantity as a plain integer.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.qty.get()
    }

    /// Price multiplied by quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.qty.get()))
            .unwrap_or(Decimal::MAX)
    }

    /// Add one to the quantity, saturating at `u32::MAX`.
    pub const fn increment(&mut self) {
        self.qty = self.qty.saturating_add(1);
    }

    /// Set the quantity, flooring at 1.
    pub fn set_quantity(&mut self, qty: i64) {
        let clamped = u32::try_from(qty.max(1)).unwrap_or(u32::MAX);
        self.qty = NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN);
    }
}

/// A saved product in the wishlist, unique per product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "bounded_price"
    )]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
}

impl From<Product> for WishlistItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
        }
    }
}

impl From<&WishlistItem> for Product {
    fn from(item: &WishlistItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}
