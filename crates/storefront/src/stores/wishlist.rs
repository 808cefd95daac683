//! Wishlist store.

use std::rc::Rc;

use clothes_store_core::{Product, ProductId, WishlistItem};
use tracing::{debug, instrument};

use super::{read_snapshot, write_snapshot};
use crate::error::Result;
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, keys};

/// The wishlist, persisted under [`keys::WISHLIST`]. One entry per product id.
pub struct WishlistStore {
    storage: Rc<dyn KeyValueStore>,
    notifier: Rc<dyn Notifier>,
}

impl WishlistStore {
    #[must_use]
    pub fn new(storage: Rc<dyn KeyValueStore>, notifier: Rc<dyn Notifier>) -> Self {
        Self { storage, notifier }
    }

    /// All saved items in insertion order. Repeated ids keep their first entry.
    #[must_use]
    pub fn get_all(&self) -> Vec<WishlistItem> {
        let stored: Vec<WishlistItem> = read_snapshot(self.storage.as_ref(), keys::WISHLIST);
        let mut items: Vec<WishlistItem> = Vec::with_capacity(stored.len());
        for item in stored {
            if !items.iter().any(|existing| existing.id == item.id) {
                items.push(item);
            }
        }
        items
    }

    #[must_use]
    pub fn has(&self, id: &ProductId) -> bool {
        self.get_all().iter().any(|item| &item.id == id)
    }

    /// Remove `product` if it is saved, otherwise save it.
    ///
    /// Returns true if the product is saved after the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated wishlist cannot be persisted.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn toggle(&self, product: &Product) -> Result<bool> {
        let mut items = self.get_all();

        let (saved, message) = match items.iter().position(|item| item.id == product.id) {
            Some(index) => {
                items.remove(index);
                (false, format!("{} removed from wishlist", product.name))
            }
            None => {
                items.push(WishlistItem::from(product.clone()));
                (true, format!("{} added to wishlist", product.name))
            }
        };

        write_snapshot(self.storage.as_ref(), keys::WISHLIST, &items)?;
        debug!(saved, items = items.len(), "Wishlist saved");
        self.notifier.notify(&message);
        Ok(saved)
    }

    /// Remove the item with `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated wishlist cannot be persisted.
    #[instrument(skip(self, id), fields(id = %id))]
    pub fn remove(&self, id: &ProductId) -> Result<()> {
        let mut items = self.get_all();
        let before = items.len();
        items.retain(|item| &item.id != id);

        if items.len() != before {
            write_snapshot(self.storage.as_ref(), keys::WISHLIST, &items)?;
            debug!(items = items.len(), "Wishlist saved");
        }
        Ok(())
    }
}
