//! In-memory item store for development and testing
//!
//! Uses a `HashMap` behind an async `RwLock`. Nothing is persisted, and list
//! order is whatever the map yields, mirroring the remote store's lack of a
//! defined order.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use pantry_domain::{Item, ItemName, Quantity};

use crate::infrastructure::ports::{ItemStore, StoreError};

/// In-memory item store
#[derive(Default)]
pub struct InMemoryItemStore {
    documents: RwLock<HashMap<ItemName, Quantity>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `items`.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let documents = items
            .into_iter()
            .map(|item| (item.name, item.quantity))
            .collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .map(|(name, quantity)| Item::new(name.clone(), *quantity))
            .collect())
    }

    async fn get(&self, name: &ItemName) -> Result<Option<Quantity>, StoreError> {
        Ok(self.documents.read().await.get(name).copied())
    }

    async fn put(&self, name: &ItemName, quantity: Quantity) -> Result<(), StoreError> {
        self.documents.write().await.insert(name.clone(), quantity);
        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> Result<(), StoreError> {
        self.documents.write().await.remove(name);
        Ok(())
    }
}
