//! Display list - the locally held snapshot of every stored item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::Item;
use crate::filter::filter_items;

/// Snapshot of the remote collection as of one full read.
///
/// `version` is the number of acknowledged writes observed when the read
/// started. A snapshot is only ever replaced by one with an equal or higher
/// version. Item order is whatever the store returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayList {
    pub version: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub items: Vec<Item>,
}

impl DisplayList {
    pub fn new(version: u64, refreshed_at: DateTime<Utc>, items: Vec<Item>) -> Self {
        Self {
            version,
            refreshed_at: Some(refreshed_at),
            items,
        }
    }

    /// Whether this snapshot has been filled by at least one read.
    pub fn is_loaded(&self) -> bool {
        self.refreshed_at.is_some()
    }

    /// Look up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries whose name contains `term`, ignoring case.
    pub fn filtered(&self, term: &str) -> Vec<Item> {
        filter_items(&self.items, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemName, Quantity};

    fn item(name: &str, quantity: i64) -> Item {
        Item::new(ItemName::new(name).unwrap(), Quantity::new(quantity))
    }

    #[test]
    fn test_default_is_unloaded_and_empty() {
        let list = DisplayList::default();
        assert!(!list.is_loaded());
        assert!(list.is_empty());
        assert_eq!(list.version, 0);
    }

    #[test]
    fn test_get_is_exact() {
        let list = DisplayList::new(1, Utc::now(), vec![item("Apple", 2)]);
        assert_eq!(list.get("Apple").map(|i| i.quantity.value()), Some(2));
        assert!(list.get("apple").is_none());
    }

    #[test]
    fn test_filtered_delegates_to_filter() {
        let list = DisplayList::new(
            1,
            Utc::now(),
            vec![item("apple", 2), item("banana", 1)],
        );
        assert_eq!(list.filtered("AN"), vec![item("banana", 1)]);
        assert_eq!(list.len(), 2);
    }
}
