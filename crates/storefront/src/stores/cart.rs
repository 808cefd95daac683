//! Cart store.

use std::rc::Rc;

use clothes_store_core::{LineItem, LineKey, Product, Variant};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::{CountIndicator, read_snapshot, write_snapshot};
use crate::error::Result;
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, keys};

/// The shopping cart, persisted under [`keys::CART`].
///
/// Lines are unique per [`LineKey`]; adding a product that already has a
/// line for the same variant bumps its quantity instead.
pub struct CartStore {
    storage: Rc<dyn KeyValueStore>,
    notifier: Rc<dyn Notifier>,
    indicator: Option<Rc<dyn CountIndicator>>,
}

impl CartStore {
    #[must_use]
    pub fn new(storage: Rc<dyn KeyValueStore>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            storage,
            notifier,
            indicator: None,
        }
    }

    /// Refresh `indicator` with the cart count after every change.
    #[must_use]
    pub fn with_indicator(mut self, indicator: Rc<dyn CountIndicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// All lines in insertion order.
    ///
    /// Lines that share a key in storage are merged into the first one.
    #[must_use]
    pub fn get_all(&self) -> Vec<LineItem> {
        let stored: Vec<LineItem> = read_snapshot(self.storage.as_ref(), keys::CART);
        let mut lines: Vec<LineItem> = Vec::with_capacity(stored.len());

        for item in stored {
            let key = item.key();
            match lines.iter_mut().find(|line| line.matches(&key)) {
                Some(line) => line.qty = line.qty.saturating_add(item.qty.get()),
                None => lines.push(item),
            }
        }

        lines
    }

    /// Sum of quantities.
    #[must_use]
    pub fn count(&self) -> u32 {
        count_of(&self.get_all())
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        total_of(&self.get_all())
    }

    /// Add one of `product` in `variant`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn add(&self, product: &Product, variant: Variant) -> Result<()> {
        let mut lines = self.get_all();
        let key = LineKey::new(product.id.clone(), variant);

        match lines.iter_mut().find(|line| line.matches(&key)) {
            Some(line) => line.increment(),
            None => lines.push(LineItem::new(product, key.variant)),
        }

        self.commit(&lines)?;
        self.notifier
            .notify(&format!("{} added to cart", product.name));
        Ok(())
    }

    /// Remove the line identified by `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    #[instrument(skip(self, key), fields(key = %key))]
    pub fn remove(&self, key: &LineKey) -> Result<()> {
        let mut lines = self.get_all();
        lines.retain(|line| !line.matches(key));
        self.commit(&lines)
    }

    /// Set the quantity of the line identified by `key`, flooring at 1.
    ///
    /// Does nothing if there is no such line.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be persisted.
    #[instrument(skip(self, key), fields(key = %key))]
    pub fn update_qty(&self, key: &LineKey, qty: i64) -> Result<()> {
        let mut lines = self.get_all();
        let Some(line) = lines.iter_mut().find(|line| line.matches(key)) else {
            debug!("No matching line, quantity unchanged");
            return Ok(());
        };

        line.set_quantity(qty);
        self.commit(&lines)
    }

    /// Delete the cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be removed.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(keys::CART)?;
        debug!("Cart cleared");
        self.refresh_indicator_with(0);
        Ok(())
    }

    /// Push the current count to the indicator.
    pub fn refresh_indicator(&self) {
        if self.indicator.is_some() {
            self.refresh_indicator_with(self.count());
        }
    }

    fn commit(&self, lines: &[LineItem]) -> Result<()> {
        write_snapshot(self.storage.as_ref(), keys::CART, lines)?;
        debug!(lines = lines.len(), "Cart saved");
        self.refresh_indicator_with(count_of(lines));
        Ok(())
    }

    fn refresh_indicator_with(&self, count: u32) {
        if let Some(indicator) = &self.indicator {
            indicator.refresh(count);
        }
    }
}

fn count_of(lines: &[LineItem]) -> u32 {
    lines
        .iter()
        .fold(0u32, |sum, line| sum.saturating_add(line.quantity()))
}

/// Sum of line totals, saturating at `Decimal::MAX`.
pub(crate) fn total_of(lines: &[LineItem]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.line_total()))
}
