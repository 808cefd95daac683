//! Unified error handling with Sentry integration.
//!
//! Provides a unified `StoreError` type for every fallible storefront
//! operation. Corrupt snapshots are not errors (they read as empty), so
//! what remains is persistence, rendering and input validation.

use thiserror::Error;

use clothes_store_core::ProductError;

use crate::storage::StorageError;

/// Error type for store, render and page operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A snapshot could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Product attributes from the page are invalid.
    #[error("Invalid product: {0}")]
    Product(#[from] ProductError),
}

impl StoreError {
    /// Report this error to Sentry and the log.
    pub fn capture(&self) {
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Storefront error"
        );
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
