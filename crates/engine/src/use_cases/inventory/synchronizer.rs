//! Inventory synchronizer.
//!
//! Writes go straight to the remote store and are followed by a full re-read,
//! so the display list always reflects the store rather than local guesses.
//! Writes to the same name are serialized inside this process; a refresh that
//! started before a later write was acknowledged is never published over the
//! result of that write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{watch, Mutex};

use pantry_domain::{DisplayList, Item, ItemName, Quantity};

use super::error::InventoryError;
use crate::infrastructure::ports::{ClockPort, ItemStore};

pub struct InventorySynchronizer {
    store: Arc<dyn ItemStore>,
    clock: Arc<dyn ClockPort>,
    display: watch::Sender<DisplayList>,
    write_locks: DashMap<ItemName, Arc<Mutex<()>>>,
    acknowledged_writes: AtomicU64,
}

impl InventorySynchronizer {
    pub fn new(store: Arc<dyn ItemStore>, clock: Arc<dyn ClockPort>) -> Self {
        let (display, _) = watch::channel(DisplayList::default());
        Self {
            store,
            clock,
            display,
            write_locks: DashMap::new(),
            acknowledged_writes: AtomicU64::new(0),
        }
    }

    /// Current display list. Empty until the first successful refresh.
    pub fn display_list(&self) -> DisplayList {
        self.display.borrow().clone()
    }

    /// Receiver that observes every published display list.
    pub fn subscribe(&self) -> watch::Receiver<DisplayList> {
        self.display.subscribe()
    }

    /// Entries of the current display list whose name contains `term`,
    /// ignoring case. Makes no remote call.
    pub fn filter(&self, term: &str) -> Vec<Item> {
        self.display.borrow().filtered(term)
    }

    /// Replace the display list with a full read of the store.
    ///
    /// If a write was acknowledged while the read was in flight, the read is
    /// discarded and the newer list is returned instead.
    pub async fn refresh(&self) -> Result<DisplayList, InventoryError> {
        let stamp = self.acknowledged_writes.load(Ordering::SeqCst);
        let items = self.store.list().await.map_err(|e| {
            tracing::warn!(error = %e, "Inventory refresh failed");
            e
        })?;
        let fresh = DisplayList::new(stamp, self.clock.now(), items);
        let count = fresh.len();

        let published = self.display.send_if_modified(|current| {
            if stamp >= current.version {
                *current = fresh;
                true
            } else {
                false
            }
        });
        if published {
            tracing::debug!(version = stamp, items = count, "Published inventory");
        } else {
            tracing::debug!(version = stamp, "Discarded stale inventory read");
        }

        Ok(self.display_list())
    }

    /// Add `quantity` (default 1) to the stored count for `name`, creating
    /// the item if it does not exist.
    pub async fn add(
        &self,
        name: &str,
        quantity: Option<Quantity>,
    ) -> Result<DisplayList, InventoryError> {
        let name = ItemName::new(name)?;
        let added = quantity.unwrap_or_default();

        let lock = self.lock_for(&name);
        let written: Result<(), InventoryError> = async {
            let _guard = lock.lock().await;
            let merged = match self.store.get(&name).await? {
                Some(existing) => existing.merge(added)?,
                None => added,
            };
            self.store.put(&name, merged).await?;
            self.acknowledge();
            tracing::info!(item = %name, added = %added, quantity = %merged, "Added item");
            Ok(())
        }
        .await;
        self.release(&name, lock);
        written?;

        self.refresh().await
    }

    /// Set the stored count for `name` to exactly `quantity`, creating the
    /// item if it does not exist. The previous value is never read.
    pub async fn update(&self, name: &str, quantity: Quantity) -> Result<DisplayList, InventoryError> {
        let name = ItemName::new(name)?;

        let lock = self.lock_for(&name);
        let written = {
            let _guard = lock.lock().await;
            self.store.put(&name, quantity).await
        };
        self.release(&name, lock);
        written?;
        self.acknowledge();
        tracing::info!(item = %name, quantity = %quantity, "Updated item");

        self.refresh().await
    }

    /// Delete `name` from the store if it exists. Removing an absent item
    /// makes no write and still refreshes.
    pub async fn remove(&self, name: &str) -> Result<DisplayList, InventoryError> {
        let name = ItemName::new(name)?;

        let lock = self.lock_for(&name);
        let written: Result<(), InventoryError> = async {
            let _guard = lock.lock().await;
            if self.store.get(&name).await?.is_none() {
                tracing::debug!(item = %name, "Remove of absent item");
                return Ok(());
            }
            self.store.delete(&name).await?;
            self.acknowledge();
            tracing::info!(item = %name, "Removed item");
            Ok(())
        }
        .await;
        self.release(&name, lock);
        written?;

        self.refresh().await
    }

    fn acknowledge(&self) {
        self.acknowledged_writes.fetch_add(1, Ordering::SeqCst);
    }

    fn lock_for(&self, name: &ItemName) -> Arc<Mutex<()>> {
        self.write_locks
            .entry(name.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // Drop the map entry once nobody else holds or waits on it.
    fn release(&self, name: &ItemName, lock: Arc<Mutex<()>>) {
        self.write_locks
            .remove_if(name, |_, held| Arc::ptr_eq(held, &lock) && Arc::strong_count(held) == 2);
    }
}
