//! Repository port for the remote item collection.

use async_trait::async_trait;
use pantry_domain::{Item, ItemName, Quantity};

use super::error::StoreError;

// =============================================================================
// Remote Item Store
// =============================================================================

/// One fixed collection of item documents keyed by name, each holding a
/// single integer `quantity` field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Full scan of the collection, in store order.
    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// Quantity stored under `name`, or `None` if there is no document.
    async fn get(&self, name: &ItemName) -> Result<Option<Quantity>, StoreError>;

    /// Full-document overwrite, creating the document if absent.
    async fn put(&self, name: &ItemName, quantity: Quantity) -> Result<(), StoreError>;

    /// Remove the document. Callers check existence with `get` first.
    async fn delete(&self, name: &ItemName) -> Result<(), StoreError>;
}
