//! Cart and wishlist stores.
//!
//! Each store is a thin service over one storage key. Every operation reads
//! the whole snapshot, changes it, and writes the whole snapshot back; the
//! stores keep nothing in memory between calls.
//!
//! Snapshots that cannot be read or parsed are treated as empty lists, and
//! invalid entries inside a parsed list are skipped. Both are logged, never
//! returned as an error.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::storage::KeyValueStore;

mod cart;
mod wishlist;

pub use cart::CartStore;
pub(crate) use cart::total_of;
pub use wishlist::WishlistStore;

/// Something that displays the cart count, refreshed after each cart change.
pub trait CountIndicator {
    fn refresh(&self, count: u32);
}

/// Read the list stored under `key`, or an empty list if there is none or it
/// is unreadable.
///
/// Entries that do not form a valid `T` are dropped one by one, so a single
/// bad entry does not cost the rest of the list.
fn read_snapshot<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read snapshot, treating as empty");
            return Vec::new();
        }
    };

    let entries = match serde_json::from_str::<Option<Vec<Value>>>(&raw) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(e) => {
            warn!(key, error = %e, "Corrupt snapshot, treating as empty");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, index, error = %e, "Dropping invalid snapshot entry");
                None
            }
        })
        .collect()
}

/// Replace the list stored under `key`.
fn write_snapshot<T: Serialize>(storage: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let encoded = serde_json::to_string(items)?;
    storage.set_item(key, &encoded)?;
    Ok(())
}
